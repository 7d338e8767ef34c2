use std::path::PathBuf;

use crate::source::optional;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for the daily-rolling JSON log file.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: optional(lookup, "LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            dir: optional(lookup, "LOG_DIR").map(PathBuf::from),
        }
    }
}
