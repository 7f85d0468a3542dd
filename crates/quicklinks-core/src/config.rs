//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/quicklinks/config.toml)
//! 3. Environment variables (QUICKLINKS_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "QUICKLINKS";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (stored options, debug log)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL that admin-relative link paths are resolved against
    #[serde(default = "default_admin_url")]
    pub admin_url: String,

    /// Admin-relative path of the quick links settings screen
    #[serde(default = "default_settings_page")]
    pub settings_page: String,

    /// Whether a page-builder theme is installed (adds its seed block)
    #[serde(default)]
    pub page_builder: bool,

    /// Token required to save or reset, if set
    #[serde(default)]
    pub access_token: Option<String>,

    /// Refuse all saves and resets
    #[serde(default)]
    pub read_only: bool,

    /// Log file for the TUI (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            admin_url: default_admin_url(),
            settings_page: default_settings_page(),
            page_builder: false,
            access_token: None,
            read_only: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (QUICKLINKS_DATA_DIR, QUICKLINKS_ADMIN_URL, ...)
    /// 2. Config file (~/.config/quicklinks/config.toml or QUICKLINKS_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load from an explicit `--config` path if given, else the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_ADMIN_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.admin_url = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_PAGE_BUILDER", ENV_PREFIX)) {
            self.page_builder = parse_flag(&val);
        }

        // Empty string clears it
        if let Ok(val) = std::env::var(format!("{}_ACCESS_TOKEN", ENV_PREFIX)) {
            self.access_token = if val.is_empty() { None } else { Some(val) };
        }

        if let Ok(val) = std::env::var(format!("{}_READ_ONLY", ENV_PREFIX)) {
            self.read_only = parse_flag(&val);
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with QUICKLINKS_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quicklinks")
            .join("config.toml")
    }

    /// Directory holding stored options
    pub fn options_dir(&self) -> PathBuf {
        self.data_dir.join("options")
    }

    /// Path of the TUI debug log
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

fn parse_flag(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quicklinks")
}

fn default_admin_url() -> String {
    "/admin/".to_string()
}

fn default_settings_page() -> String {
    "admin.php?page=quick-links".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "QUICKLINKS_DATA_DIR",
        "QUICKLINKS_ADMIN_URL",
        "QUICKLINKS_PAGE_BUILDER",
        "QUICKLINKS_ACCESS_TOKEN",
        "QUICKLINKS_READ_ONLY",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.page_builder);
        assert!(!config.read_only);
        assert!(config.access_token.is_none());
        assert_eq!(config.admin_url, "/admin/");
        assert_eq!(config.settings_page, "admin.php?page=quick-links");
        assert!(config.data_dir.ends_with("quicklinks"));
    }

    #[test]
    fn test_file_paths() {
        let config = Config {
            data_dir: PathBuf::from("/data/ql"),
            ..Config::default()
        };

        assert_eq!(config.options_dir(), PathBuf::from("/data/ql/options"));
        assert_eq!(config.log_path(), PathBuf::from("/data/ql/debug.log"));

        let config = Config {
            log_file: Some(PathBuf::from("/tmp/ql.log")),
            ..config
        };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/ql.log"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("QUICKLINKS_DATA_DIR", "/tmp/quicklinks-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/quicklinks-test"));
    }

    #[test]
    fn test_env_override_flags() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUICKLINKS_PAGE_BUILDER", "true");
        env::set_var("QUICKLINKS_READ_ONLY", "1");
        config.apply_env_overrides();
        assert!(config.page_builder);
        assert!(config.read_only);

        env::set_var("QUICKLINKS_PAGE_BUILDER", "no");
        env::set_var("QUICKLINKS_READ_ONLY", "false");
        config.apply_env_overrides();
        assert!(!config.page_builder);
        assert!(!config.read_only);
    }

    #[test]
    fn test_env_override_access_token() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("QUICKLINKS_ACCESS_TOKEN", "abc123");
        config.apply_env_overrides();
        assert_eq!(config.access_token, Some("abc123".to_string()));

        env::set_var("QUICKLINKS_ACCESS_TOKEN", "");
        config.apply_env_overrides();
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_env_override_admin_url_ignores_empty() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("QUICKLINKS_ADMIN_URL", "https://example.com/wp-admin/");
        config.apply_env_overrides();
        assert_eq!(config.admin_url, "https://example.com/wp-admin/");

        env::set_var("QUICKLINKS_ADMIN_URL", "");
        config.apply_env_overrides();
        assert_eq!(config.admin_url, "https://example.com/wp-admin/");
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/quicklinks"),
            admin_url: "https://example.com/admin/".to_string(),
            page_builder: true,
            access_token: Some("tok".to_string()),
            ..Config::default()
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("admin_url"));
        assert!(toml_str.contains("page_builder"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.admin_url, config.admin_url);
        assert_eq!(parsed.page_builder, config.page_builder);
        assert_eq!(parsed.access_token, config.access_token);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            admin_url = "https://site.test/admin/"
            page_builder = true
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.admin_url, "https://site.test/admin/");
        assert!(config.page_builder);
        // Unset keys keep their defaults
        assert_eq!(config.settings_page, "admin.php?page=quick-links");
    }

    #[test]
    fn test_load_from_path_and_save() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            read_only: true,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded.data_dir, temp_dir.path().join("data"));
        assert!(loaded.read_only);
        // Loading creates the data directory
        assert!(loaded.data_dir.exists());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("QUICKLINKS_DATA_DIR", temp_dir.path().join("data"));

        let path = temp_dir.path().join("nonexistent.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(!config.page_builder);
        assert_eq!(config.admin_url, "/admin/");
    }
}
