use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides the settings file location when set.
pub const CONFIG_ENV_VAR: &str = "CONFLINE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid space_marker in {config_path}: {reason}")]
    InvalidSpaceMarker {
        config_path: PathBuf,
        reason: &'static str,
    },
}

fn default_space_marker() -> String {
    ".".to_string()
}

/// Preferences for dumping parsed configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// File dumped when no path is given on the command line. Relative
    /// paths are taken from the directory holding the settings file.
    #[serde(default)]
    pub default_input: Option<PathBuf>,
    /// Shown in place of each space in a dumped value.
    #[serde(default = "default_space_marker")]
    pub space_marker: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_input: None,
            space_marker: default_space_marker(),
        }
    }
}

impl Settings {
    /// Loads and validates the settings at `config_path`; `Ok(None)` if absent.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        settings.validated(config_path).map(Some)
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// `$CONFLINE_CONFIG` if set, else `~/.config/confline/config.toml`.
    pub fn config_path() -> PathBuf {
        let override_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::config_path_from(override_path)
    }

    fn config_path_from(override_path: Option<PathBuf>) -> PathBuf {
        match override_path {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                let config_dir = shellexpand::tilde("~/.config/confline");
                PathBuf::from(config_dir.as_ref()).join("config.toml")
            }
        }
    }

    fn validated(mut self, config_path: &Path) -> Result<Self, ConfigError> {
        // The dump prints one entry per line, so the marker must stay on one line.
        let reason = if self.space_marker.is_empty() {
            Some("must not be empty")
        } else if self.space_marker.contains(['\n', '\r']) {
            Some("must not contain line breaks")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ConfigError::InvalidSpaceMarker {
                config_path: config_path.to_path_buf(),
                reason,
            });
        }

        let base_dir = config_path.parent().unwrap_or(Path::new(""));
        self.default_input = self
            .default_input
            .map(|path| Self::resolve_input(&path, base_dir));
        Ok(self)
    }

    /// Expands `~` and `$VAR`, then anchors relative paths at `base_dir`.
    /// Paths whose expansion fails are kept as written.
    fn resolve_input(path: &Path, base_dir: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = match shellexpand::full(&path_str) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => path.to_path_buf(),
        };
        if expanded.is_relative() {
            base_dir.join(expanded)
        } else {
            expanded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_settings(dir: &TempDir, content: &str) -> PathBuf {
        let config_file = dir.path().join("config.toml");
        std::fs::write(&config_file, content).unwrap();
        config_file
    }

    #[test]
    fn test_default_config_path() {
        let config_path = Settings::config_path_from(None);
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/confline/config.toml"));
    }

    #[test]
    fn test_config_path_override() {
        let path = Settings::config_path_from(Some(PathBuf::from("/etc/confline.toml")));
        assert_eq!(path, PathBuf::from("/etc/confline.toml"));

        let empty = Settings::config_path_from(Some(PathBuf::new()));
        assert!(empty.ends_with(".config/confline/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_settings(&temp_dir, "");

        let settings = Settings::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.space_marker, ".");
    }

    #[test]
    fn test_load_settings_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");

        assert!(Settings::load_from_path(&missing).unwrap().is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_settings(&temp_dir, "space_marker = [unterminated");

        let err = Settings::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_empty_space_marker_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_settings(&temp_dir, "space_marker = \"\"\n");

        let err = Settings::load_from_path(&config_file).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidSpaceMarker {
                reason: "must not be empty",
                ..
            }
        ));
    }

    #[test]
    fn test_multiline_space_marker_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_settings(&temp_dir, "space_marker = \"a\\nb\"\n");

        let err = Settings::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSpaceMarker { .. }));
    }

    #[test]
    fn test_relative_default_input_is_anchored_at_settings_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_settings(&temp_dir, "default_input = \"userinfo.properties\"\n");

        let settings = Settings::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            settings.default_input,
            Some(temp_dir.path().join("userinfo.properties"))
        );
    }

    #[test]
    fn test_default_input_expands_tilde() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_settings(
            &temp_dir,
            "default_input = \"~/swamp/userinfo.properties\"\nspace_marker = \"_\"\n",
        );

        let settings = Settings::load_from_path(&config_file).unwrap().unwrap();

        let input = settings.default_input.unwrap();
        assert!(!input.to_string_lossy().starts_with('~'));
        assert!(input.ends_with("swamp/userinfo.properties"));
        assert_eq!(settings.space_marker, "_");
    }

    #[test]
    fn test_resolve_input_with_env_var() {
        unsafe {
            env::set_var("CONFLINE_TEST_ROOT", "/test/env/path");
        }

        let resolved = Settings::resolve_input(
            Path::new("$CONFLINE_TEST_ROOT/userinfo.properties"),
            Path::new("/ignored"),
        );

        assert_eq!(resolved, PathBuf::from("/test/env/path/userinfo.properties"));

        unsafe {
            env::remove_var("CONFLINE_TEST_ROOT");
        }
    }

    #[test]
    fn test_resolve_input_keeps_unexpandable_path() {
        let resolved = Settings::resolve_input(
            Path::new("/data/$CONFLINE_SURELY_UNDEFINED_VAR/x"),
            Path::new("/ignored"),
        );
        assert_eq!(resolved, PathBuf::from("/data/$CONFLINE_SURELY_UNDEFINED_VAR/x"));
    }
}
