//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::Path;

/// File names searched, in order, when no path is given
pub const CONFIG_CANDIDATES: [&str; 3] = [".xeluxe.toml", "xeluxe.toml", ".config/xeluxe.toml"];

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings were read from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from `path`, or from the first standard location
    /// that exists, or fall back to defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations is not.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(Path::new(".")),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema = toml::from_str(content)?;
        Ok(Self { schema, path: None })
    }
}

/// Find a configuration file under `root`
fn find_config_file(root: &Path) -> Option<String> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
        .map(|path| path.display().to_string())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {path}: {e}")).with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {path}: {e}"),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.retry.max_retries, 3);
    }

    #[test]
    fn test_config_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("xeluxe.toml");
        std::fs::write(&path, "[cache]\nenabled = true\ndefault_ttl_ms = 1000\n").unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert!(config.schema.cache.enabled);
        assert_eq!(config.schema.cache.default_ttl_ms, 1000);
        assert!(config.path.is_some());
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let err = Config::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_config_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = Config::load(Some(path.to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_find_config_file_order() {
        let temp = TempDir::new().unwrap();
        assert!(find_config_file(temp.path()).is_none());

        std::fs::create_dir(temp.path().join(".config")).unwrap();
        std::fs::write(temp.path().join(".config/xeluxe.toml"), "").unwrap();
        std::fs::write(temp.path().join("xeluxe.toml"), "").unwrap();

        let found = find_config_file(temp.path()).unwrap();
        assert!(found.ends_with("xeluxe.toml"));
        assert!(!found.contains(".config"));
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml("[api]\ntimeout_secs = 5").unwrap();
        assert_eq!(config.schema.api.timeout_secs, 5);
    }
}
