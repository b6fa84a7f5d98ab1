//! Configuration management.

use crate::codegen::SuggestHttpConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration for bytestash.
#[derive(Debug, Clone)]
pub struct StashConfig {
    /// Path to the snippet store file.
    pub store_path: PathBuf,
    /// Whether search terms also match fragment code.
    pub search_code: bool,
    /// Code suggestion backend configuration.
    pub codegen: CodegenConfig,
}

/// Code suggestion backend configuration.
#[derive(Debug, Clone, Default)]
pub struct CodegenConfig {
    /// Endpoint override (for self-hosted or remote servers).
    pub endpoint: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl CodegenConfig {
    /// Resolves the HTTP settings, file values over environment ones.
    #[must_use]
    pub fn http_config(&self) -> SuggestHttpConfig {
        let mut settings = SuggestHttpConfig::from_env();
        if let Some(timeout_ms) = self.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = self.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Snippet store file path.
    pub store_path: Option<String>,
    /// Whether search terms also match fragment code.
    pub search_code: Option<bool>,
    /// Codegen section.
    pub codegen: Option<ConfigFileCodegen>,
}

/// Codegen section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileCodegen {
    /// Endpoint URL.
    pub endpoint: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            search_code: false,
            codegen: CodegenConfig::default(),
        }
    }
}

impl StashConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/bytestash/` on macOS)
    /// 2. XDG config dir (`~/.config/bytestash/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("bytestash").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("bytestash")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `StashConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(store_path) = file.store_path {
            config.store_path = PathBuf::from(store_path);
        }
        if let Some(search_code) = file.search_code {
            config.search_code = search_code;
        }
        if let Some(codegen) = file.codegen {
            config.codegen.endpoint = codegen.endpoint;
            config.codegen.model = codegen.model;
            config.codegen.timeout_ms = codegen.timeout_ms;
            config.codegen.connect_timeout_ms = codegen.connect_timeout_ms;
        }

        config
    }

    /// Sets the snippet store file path.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Enables or disables code search.
    #[must_use]
    pub const fn with_search_code(mut self, search_code: bool) -> Self {
        self.search_code = search_code;
        self
    }
}

fn default_store_path() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".bytestash").join("snippets.json"),
        |dirs| dirs.data_dir().join("bytestash").join("snippets.json"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StashConfig::new();
        assert!(!config.search_code);
        assert!(config.codegen.model.is_none());
        assert!(config.store_path.ends_with("snippets.json"));
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            store_path = "/tmp/stash.json"
            search_code = true

            [codegen]
            model = "codellama"
            timeout_ms = 5000
            "#,
        )
        .unwrap();

        let config = StashConfig::from_config_file(file);
        assert_eq!(config.store_path, PathBuf::from("/tmp/stash.json"));
        assert!(config.search_code);
        assert_eq!(config.codegen.model.as_deref(), Some("codellama"));
        assert_eq!(config.codegen.http_config().timeout_ms, 5000);
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let file: ConfigFile = toml::from_str("search_code = true").unwrap();
        let config = StashConfig::from_config_file(file);
        assert!(config.search_code);
        assert!(config.codegen.endpoint.is_none());
    }
}
