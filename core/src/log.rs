//! Engine log configuration.
//!
//! The engine keeps its own verbosity threshold and log domain in a
//! [`Logger`] value owned by the engine, and forwards whatever passes the
//! threshold to `tracing`. Subscribers decide where the output goes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verbosity levels, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Msg,
    Info,
    Debug,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Warn
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Msg => "msg",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Matching `tracing` level; `Msg` sits between warnings and info and
    /// is reported as info.
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Msg | LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "msg" | "message" => Ok(LogLevel::Msg),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Longest domain kept; longer names are truncated.
pub const MAX_DOMAIN_LEN: usize = 19;

/// Threshold and domain for engine log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    level: LogLevel,
    domain: String,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::default(), "MKDG")
    }
}

impl Logger {
    pub fn new(level: LogLevel, domain: &str) -> Self {
        let mut logger = Self { level, domain: String::new() };
        logger.set_domain(domain);
        logger
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn set_domain(&mut self, domain: &str) {
        self.domain = domain.chars().take(MAX_DOMAIN_LEN).collect();
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Emit `args` at `level` if the threshold allows it.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let domain = self.domain.as_str();
        match level {
            LogLevel::Error => tracing::error!(domain, "{}", args),
            LogLevel::Warn => tracing::warn!(domain, "{}", args),
            LogLevel::Msg | LogLevel::Info => tracing::info!(domain, level = level.as_str(), "{}", args),
            LogLevel::Debug => tracing::debug!(domain, "{}", args),
        }
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args)
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args)
    }

    pub fn msg(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Msg, args)
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args)
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args)
    }
}
