//! Application-wide configuration settings

use serde::{Deserialize, Serialize};

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name for logging and identification
    pub name: String,

    /// Global log level (overridden by `RUST_LOG` when set)
    pub log_level: LogLevel,
}

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "fxgap".to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl AppConfig {
    /// `tracing_subscriber::EnvFilter` directive covering the workspace crates
    pub fn filter_directive(&self) -> String {
        let level = self.log_level.as_str();
        format!("fxgap={level},fxgap_core={level},fxgap_io={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let config = AppConfig::default();
        assert_eq!(
            config.filter_directive(),
            "fxgap=info,fxgap_core=info,fxgap_io=info"
        );
    }

    #[test]
    fn test_filter_directive_follows_level() {
        let config = AppConfig {
            log_level: LogLevel::Trace,
            ..Default::default()
        };
        assert_eq!(
            config.filter_directive(),
            "fxgap=trace,fxgap_core=trace,fxgap_io=trace"
        );
    }
}
