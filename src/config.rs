use serde::{Deserialize, Serialize};
use std::fs;

use crate::exchange::ExchangeId;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default)]
    pub use_json: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8003,
        }
    }
}

/// Exchange REST hosts and the outbound call timeout.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub mexc_base_url: String,
    pub bingx_base_url: String,
    pub bitget_base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            mexc_base_url: "https://contract.mexc.com".to_string(),
            bingx_base_url: "https://open-api.bingx.com".to_string(),
            bitget_base_url: "https://api.bitget.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl UpstreamConfig {
    pub fn base_url(&self, exchange: ExchangeId) -> &str {
        match exchange {
            ExchangeId::Mexc => &self.mexc_base_url,
            ExchangeId::BingX => &self.bingx_base_url,
            ExchangeId::Bitget => &self.bitget_base_url,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
            use_json: false,
            rotation: default_rotation(),
            gateway: GatewayConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

fn default_log_file() -> String {
    "exgate.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("gateway:\n  host: \"127.0.0.1\"\n  port: 9000\n").unwrap();
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(
            config.upstream.base_url(ExchangeId::BingX),
            "https://open-api.bingx.com"
        );
    }

    #[test]
    fn test_base_url_per_exchange() {
        let upstream = UpstreamConfig::default();
        assert_eq!(upstream.base_url(ExchangeId::Mexc), "https://contract.mexc.com");
        assert_eq!(upstream.base_url(ExchangeId::Bitget), "https://api.bitget.com");
    }
}
