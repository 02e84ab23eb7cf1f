use serde::Deserialize;
use tracing::debug;

use pantry_base::{FilePath, PalHandle, PantryResult, ResultExt};

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "pantry.toml";

/// Runtime configuration. Every field has a default, so the file may be absent or partial.
///
/// The data file names and the filter rules are fixed and not part of it.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: LoggingConfig,
}

/// Diagnostics settings.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber` filter directives, e.g. `"pantry_engine=debug"`.
    /// `RUST_LOG` takes precedence when set.
    pub filter: Option<String>,
}

/// Loads the configuration from `path`, falling back to defaults when the file does not exist.
pub fn load_config(pal: &PalHandle, path: &FilePath) -> PantryResult<Config> {
    if !pal.file_exists(path)? {
        debug!(path = %path, "no config file, using defaults");
        return Ok(Config::default());
    }
    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read config {}", path))?;
    toml::from_str(&text).map_err(|e| pantry_base::err!("Invalid config {}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_base::MockPal;

    fn pal_with(content: Option<&str>) -> PalHandle {
        let mock = MockPal::new();
        if let Some(content) = content {
            mock.add_file(FilePath::from(CONFIG_FILE), content.as_bytes().to_vec());
        }
        PalHandle::new(mock)
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(&pal_with(None), &FilePath::from(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.logging.filter, None);
    }

    #[test]
    fn test_logging_filter_is_read() {
        let pal = pal_with(Some("[logging]\nfilter = \"pantry_engine=debug\"\n"));
        let config = load_config(&pal, &FilePath::from(CONFIG_FILE)).unwrap();
        assert_eq!(config.logging.filter.as_deref(), Some("pantry_engine=debug"));
    }

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let config = load_config(&pal_with(Some("")), &FilePath::from(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let pal = pal_with(Some("[storage]\nfile = \"other.txt\"\n"));
        let err = load_config(&pal, &FilePath::from(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config pantry.toml"));
    }
}
