//! The top-level `Config` and its YAML persistence.

use crate::error::ConfigError;
use crate::themes::Theme;
use crate::types::{ColorChoice, ContextConfig, Verbosity};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted context size; anything bigger is almost certainly a typo.
pub const MAX_CONTEXT_LINES: usize = 1000;

/// Renderer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default verbosity when no `-v`/`-q` flag is given.
    pub verbosity: Verbosity,
    pub color: ColorChoice,
    pub context: ContextConfig,
    pub theme: Theme,
}

impl Config {
    /// Load configuration from the default path, or defaults when the file
    /// does not exist. Unlike a full application config this is never
    /// written back automatically.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            log::debug!("Config file not found at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes as `null`, which serde_yaml_ng rejects.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check field values that the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ctx = &self.context;
        for (field, value) in [
            ("context.innermost_before", ctx.innermost_before),
            ("context.innermost_after", ctx.innermost_after),
            ("context.frame_before", ctx.frame_before),
            ("context.frame_after", ctx.frame_after),
        ] {
            if value > MAX_CONTEXT_LINES {
                return Err(ConfigError::Validation(format!(
                    "{field} is {value}, maximum is {MAX_CONTEXT_LINES}"
                )));
            }
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("par-trace")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("par-trace")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::{Color, Style};

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("   \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml(
            "verbosity: verbose\ncontext:\n  innermost_before: 6\ntheme:\n  highlight:\n    keyword: \"fg=magenta;options=bold\"\n",
        )
        .unwrap();

        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.context.innermost_before, 6);
        assert_eq!(config.context.innermost_after, 4);
        assert_eq!(
            config.theme.highlight.keyword,
            Style::fg(Color::Magenta).bold()
        );
        assert_eq!(
            config.theme.highlight.string,
            Style::fg(Color::LightYellow)
        );
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn test_bad_style_is_a_parse_error() {
        let err = Config::from_yaml("theme:\n  trace:\n    error: \"fg=purple\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("purple"));
    }

    #[test]
    fn test_oversized_context_is_rejected() {
        let err = Config::from_yaml("context:\n  frame_after: 5000\n").unwrap_err();
        match err {
            ConfigError::Validation(msg) => assert!(msg.contains("context.frame_after")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_yaml_roundtrip_preserves_config() {
        let mut config = Config::default();
        config.color = ColorChoice::Never;
        config.context.frame_before = 3;
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("color: never"));
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "color: always\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.color, ColorChoice::Always);
    }

    #[test]
    fn test_load_from_missing_file_keeps_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_config_path_ends_with_yaml() {
        let path = Config::config_path();
        assert!(path.ends_with("par-trace/config.yaml") || path.ends_with("config.yaml"));
    }
}
