use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub default_directive: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// `RUST_LOG` still takes precedence over `logging.level` at init time.
    pub fn from_settings(settings: &LoggingSettings, environment: Environment) -> Self {
        Self {
            environment,
            default_directive: format!(
                "{level},truthbot={level},tower_http=info",
                level = settings.level
            ),
            json_format: settings.enable_json || environment == Environment::Prod,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            default_directive: String::from("info,truthbot=debug,tower_http=debug"),
            json_format: false,
        }
    }
}
