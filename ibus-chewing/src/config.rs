/// Front-end configuration that extends the engine `Config` from core.
///
/// The engine settings are flattened into the same TOML table, so a file
/// written by `chewing_core::Config::save_toml` loads here unchanged. The
/// extra keys only concern how the console front end starts a session.
use std::path::Path;

use chewing_core::{Config, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Engine settings (layout, selection keys, candidate paging, ...)
    #[serde(flatten)]
    pub base: Config,

    /// Send a focus-in before replaying a script.
    pub focus_on_start: bool,

    /// Caps Lock LED state the console host starts with.
    pub caps_lock_led: bool,

    /// Start in English mode instead of Chinese.
    pub start_in_english: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            base: Config::default(),
            focus_on_start: true,
            caps_lock_led: false,
            start_in_english: false,
        }
    }
}

impl FrontendConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FrontendConfig = toml::from_str(content)?;
        config.base.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get a reference to the engine config
    pub fn base(&self) -> &Config {
        &self.base
    }

    /// Get a mutable reference to the engine config
    pub fn base_mut(&mut self) -> &mut Config {
        &mut self.base
    }
}
