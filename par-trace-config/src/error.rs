//! Typed error variants for the par-trace-config crate.
//!
//! `Config::load` still returns `anyhow::Result` so callers get file context;
//! the underlying `ConfigError` can be recovered with `downcast_ref`.
//!
//! # Example
//!
//! ```rust,no_run
//! use par_trace_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred reading the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML (including malformed style strings).
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the offending field and the reason.
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ConfigError::Validation("context.frame_before: too large".to_string());
        assert_eq!(
            err.to_string(),
            "Config validation error: context.frame_before: too large"
        );
    }

    #[test]
    fn test_io_source_is_preserved() {
        use std::error::Error;
        let err = ConfigError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error reading config"));
    }
}
