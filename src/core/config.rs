//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.waypost/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::resolver::AppRoots;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WaypostConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub app_context: Option<String>,
    pub page_segment: Option<String>,
    pub start_address: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_APP_CONTEXT: &str = "/share";
pub const DEFAULT_PAGE_SEGMENT: &str = "page";
pub const DEFAULT_START_ADDRESS: &str = "http://localhost:8080/share/page/home";
pub const DEFAULT_LOG_FILE: &str = "waypost.log";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub app_context: String,
    pub page_segment: String,
    pub start_address: String,
    pub log_level: LevelFilter,
    pub log_file: String,
}

impl ResolvedConfig {
    pub fn roots(&self) -> AppRoots {
        AppRoots::new(&self.app_context, &self.page_segment)
    }
}

/// Overrides supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub app_context: Option<String>,
    pub start_address: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.waypost/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".waypost").join("config.toml"))
}

/// Where the settings came from. Determined before loading so the binary can
/// log it once its logger is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file yet; loading writes a commented default here.
    Generated(PathBuf),
    /// No home directory.
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded from {}", path.display()),
            ConfigSource::Generated(path) => write!(f, "default generated at {}", path.display()),
            ConfigSource::Defaults => f.write_str("no home directory, built-in defaults"),
        }
    }
}

pub fn config_source(path: Option<&Path>) -> ConfigSource {
    match path {
        Some(path) if path.exists() => ConfigSource::File(path.to_path_buf()),
        Some(path) => ConfigSource::Generated(path.to_path_buf()),
        None => ConfigSource::Defaults,
    }
}

/// Load config from `~/.waypost/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WaypostConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WaypostConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WaypostConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<WaypostConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WaypostConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WaypostConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Waypost Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [navigation]
# app_context = "/share"             # Or set WAYPOST_APP_CONTEXT
# page_segment = "page"              # Or set WAYPOST_PAGE_SEGMENT
# start_address = "http://localhost:8080/share/page/home"

# [logging]
# level = "debug"                    # "off", "error", "warn", "info", "debug", "trace"
# file = "waypost.log"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WaypostConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &WaypostConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // App context: CLI → env → config → default
    let app_context = cli
        .app_context
        .clone()
        .or_else(|| env("WAYPOST_APP_CONTEXT"))
        .or_else(|| config.navigation.app_context.clone())
        .unwrap_or_else(|| DEFAULT_APP_CONTEXT.to_string());

    // Page segment: env → config → default
    let page_segment = env("WAYPOST_PAGE_SEGMENT")
        .or_else(|| config.navigation.page_segment.clone())
        .unwrap_or_else(|| DEFAULT_PAGE_SEGMENT.to_string());

    // Start address: CLI → env → config → default
    let start_address = cli
        .start_address
        .clone()
        .or_else(|| env("WAYPOST_START_ADDRESS"))
        .or_else(|| config.navigation.start_address.clone())
        .unwrap_or_else(|| DEFAULT_START_ADDRESS.to_string());

    let log_level = env("WAYPOST_LOG_LEVEL")
        .or_else(|| config.logging.level.clone())
        .and_then(|level| match LevelFilter::from_str(&level) {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Unknown log level \"{}\", using {}", level, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        app_context,
        page_segment,
        start_address,
        log_level,
        log_file: config
            .logging
            .file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&WaypostConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.app_context, DEFAULT_APP_CONTEXT);
        assert_eq!(resolved.page_segment, DEFAULT_PAGE_SEGMENT);
        assert_eq!(resolved.start_address, DEFAULT_START_ADDRESS);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.roots().page_root, "/share/page");
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = WaypostConfig {
            navigation: NavigationConfig {
                app_context: Some("alfresco".to_string()),
                page_segment: Some("p".to_string()),
                start_address: None,
            },
            logging: LoggingConfig {
                level: Some("warn".to_string()),
                file: Some("custom.log".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.roots().context_root, "/alfresco");
        assert_eq!(resolved.roots().page_root, "/alfresco/p");
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.log_file, "custom.log");
    }

    #[test]
    fn test_env_beats_file_and_cli_beats_env() {
        let config = WaypostConfig {
            navigation: NavigationConfig {
                app_context: Some("from-file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "WAYPOST_APP_CONTEXT" => Some("from-env".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.app_context, "from-env");

        let cli = CliOverrides {
            app_context: Some("from-cli".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.app_context, "from-cli");
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = WaypostConfig {
            logging: LoggingConfig {
                level: Some("loud".to_string()),
                file: None,
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[navigation]
page_segment = "pages"
"#;
        let config: WaypostConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.navigation.page_segment.as_deref(), Some("pages"));
        assert!(config.navigation.app_context.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("waypost-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[navigation\napp_context = 1").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("waypost-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        assert_eq!(config_source(Some(&path)), ConfigSource::Generated(path.clone()));
        let config = load_config_from(&path).unwrap();
        assert!(config.navigation.app_context.is_none());
        let generated = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_dir_all(&dir);
        assert!(generated.starts_with("# Waypost Configuration"));
        // The generated file is all comments, so it parses to the defaults.
        assert!(toml::from_str::<WaypostConfig>(&generated).is_ok());
    }

    #[test]
    fn test_config_source_known_before_loading() {
        let path = std::env::temp_dir().join(format!("waypost-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "").unwrap();
        let source = config_source(Some(&path));
        let _ = fs::remove_file(&path);
        assert_eq!(source, ConfigSource::File(path.clone()));
        assert!(source.to_string().starts_with("loaded from"));
        assert_eq!(config_source(None), ConfigSource::Defaults);
    }
}
