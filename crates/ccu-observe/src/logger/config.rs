use crate::logger::error::LoggerError;
use crate::logger::format::LoggerFormat;

/// Environment variable holding the env-filter directive (`info`, `debug`, ...).
pub const ENV_LOG_LEVEL: &str = "CCU_LOG_LEVEL";
/// Environment variable selecting the output format (`text` or `json`).
pub const ENV_LOG_FORMAT: &str = "CCU_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || atty::is(atty::Stream::Stdout);
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    /// Build a config from `CCU_LOG_LEVEL` / `CCU_LOG_FORMAT`, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> Result<Self, LoggerError> {
        let mut cfg = Self::default();

        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            cfg.level = level;
        }
        if let Ok(format) = std::env::var(ENV_LOG_FORMAT) {
            cfg.format = format.parse()?;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LoggerConfig::default();

        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level, "info");
        assert!(cfg.with_targets);
        // Under test the tty check is bypassed and color stays on.
        assert!(cfg.use_color);
    }
}
