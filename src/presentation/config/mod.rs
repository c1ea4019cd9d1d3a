mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ExtractionSettings, ImageStrategySetting, LlmProvider, LlmSettings, LoggingSettings,
    SearchSettings, ServerSettings, Settings,
};
