// src/utils/error.rs
use thiserror::Error;

/// Errors raised while configuring a logger or writing to its sinks.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Debug level of '{0}' not recognized")]
    UnknownLevel(String),

    #[error("Can't specify log_only and no log_file")]
    LogOnlyWithoutFile,

    #[error("Invalid header date format: {0}")]
    InvalidDateFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Log file open/write failures

    #[error("Config file parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LogError {
    /// True for the errors that prevent a logger from being constructed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LogError::UnknownLevel(_)
                | LogError::LogOnlyWithoutFile
                | LogError::InvalidDateFormat(_)
                | LogError::Config(_)
                | LogError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(LogError::UnknownLevel("loud".into()).is_configuration());
        assert!(LogError::LogOnlyWithoutFile.is_configuration());
        let io = LogError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(!io.is_configuration());
        assert_eq!(io.to_string(), "I/O error: disk full");
    }
}
