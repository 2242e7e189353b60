mod diagnostics;
mod health;
mod proxy;

pub use diagnostics::{mexc_server_time, mexc_test};
pub use health::health_check;
pub use proxy::{not_found, proxy_bingx, proxy_bitget, proxy_mexc};
