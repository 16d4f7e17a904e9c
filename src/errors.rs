//! Typed error hierarchy for delivery-price.
//!
//! - `FetchError` / `UpdateError`: per-record failures reported by the billing API.
//!   The workflow downgrades these to an `error` outcome; they never abort a batch.
//! - `AuditError`: the audit trail could not be written. Always fatal.
//! - `BatchSourceError`: the batch CSV is missing or malformed. Fatal before any record runs.
//! - `ConfigError`: credentials or settings are missing or invalid. Fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

/// The current state of a subscription could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// The new delivery price could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UpdateError(pub String);

/// Errors writing or reading the audit log.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to create audit directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open audit log {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write audit log {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to sync audit log {}: {source}", path.display())]
    Sync {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read audit log {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors loading the batch CSV.
#[derive(Debug, Error)]
pub enum BatchSourceError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read batch file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Batch file {} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid row at {}:{line}: {message}", path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

/// Errors resolving runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set in environment variables")]
    MissingToken(&'static str),

    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid setting '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_displays_message_verbatim() {
        let err = FetchError("not found".to_string());
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn update_error_displays_message_verbatim() {
        let err = UpdateError("Failed to update subscription sub_1: locked".to_string());
        assert_eq!(err.to_string(), "Failed to update subscription sub_1: locked");
    }

    #[test]
    fn batch_source_missing_column_names_column() {
        let err = BatchSourceError::MissingColumn {
            path: PathBuf::from("prices.csv"),
            column: "new_delivery_price",
        };
        let msg = err.to_string();
        assert!(msg.contains("prices.csv"));
        assert!(msg.contains("new_delivery_price"));
    }

    #[test]
    fn batch_source_not_found_is_matchable() {
        let err = BatchSourceError::NotFound {
            path: PathBuf::from("missing.csv"),
        };
        assert!(matches!(err, BatchSourceError::NotFound { .. }));
        assert_eq!(err.to_string(), "File not found: missing.csv");
    }

    #[test]
    fn config_missing_token_names_variable() {
        let err = ConfigError::MissingToken("PAYWHIRL_API_TOKEN");
        assert_eq!(
            err.to_string(),
            "PAYWHIRL_API_TOKEN is not set in environment variables"
        );
    }

    #[test]
    fn audit_error_open_carries_path_and_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AuditError::Open {
            path: PathBuf::from("logs/audit.csv"),
            source: io_err,
        };
        match &err {
            AuditError::Open { path, source } => {
                assert_eq!(path, &PathBuf::from("logs/audit.csv"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Open variant"),
        }
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&FetchError("x".into()));
        assert_std_error(&UpdateError("x".into()));
        assert_std_error(&ConfigError::MissingToken("X"));
        assert_std_error(&BatchSourceError::NotFound {
            path: PathBuf::from("x"),
        });
    }
}
