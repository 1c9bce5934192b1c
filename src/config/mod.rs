//! Configuration management for studykit.
//!
//! This module handles loading and saving configuration from `~/.studykit/`.

mod credentials;
mod paths;
mod settings;

pub use credentials::Credentials;
pub use paths::Paths;
pub use settings::{ApiConfig, ColorSetting, Config, GeneralConfig, TimerConfig, DEFAULT_BASE_URL};
