// Configuration
//
// Loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/docdrop/config.toml)
// 3. Built-in defaults (lowest priority)

use crate::convert::{DEFAULT_UPLOAD_URL, UPLOAD_TIMEOUT};
use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Conversion endpoint URL
    pub upload_url: String,

    /// Client-side upload timeout in seconds
    pub timeout_secs: u64,

    /// Directory saved results are written to
    pub output_dir: PathBuf,

    /// Whether to run the TUI (disabled for one-shot conversions)
    pub enable_tui: bool,

    /// Demo mode: simulate the conversion backend
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Whether to also write logs to rotating files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,

    /// Rotation policy for log files
    pub file_rotation: LogRotation,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "docdrop".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            timeout_secs: UPLOAD_TIMEOUT.as_secs(),
            output_dir: PathBuf::from("."),
            enable_tui: true,
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    upload_url: Option<String>,
    timeout_secs: Option<u64>,
    output_dir: Option<String>,

    logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<String>,
}

impl Config {
    /// Config file path: ~/.config/docdrop/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("docdrop").join("config.toml"))
    }

    /// Create the config file with defaults if it doesn't exist, to help
    /// users discover the options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A config file that exists but cannot be parsed fails fast with a
    /// clear error instead of silently falling back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to parse config file {}:", path.display());
                    eprintln!("  {e}");
                    eprintln!("Delete the file to regenerate defaults, or fix the syntax.");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("Cannot read config file {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let defaults = Config::default();

        let upload_url = std::env::var("DOCDROP_URL")
            .ok()
            .or(file.upload_url)
            .unwrap_or(defaults.upload_url);

        let timeout_secs = std::env::var("DOCDROP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .unwrap_or(defaults.timeout_secs);

        let output_dir = std::env::var("DOCDROP_OUTPUT_DIR")
            .ok()
            .or(file.output_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        // Runtime flags: env only
        let enable_tui = std::env::var("DOCDROP_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);
        let demo_mode = std::env::var("DOCDROP_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let fl = file.logging.unwrap_or_default();
        let log_defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: std::env::var("DOCDROP_LOG_LEVEL")
                .ok()
                .or(fl.level)
                .unwrap_or(log_defaults.level),
            file_enabled: fl.file_enabled.unwrap_or(log_defaults.file_enabled),
            file_dir: fl
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(log_defaults.file_dir),
            file_prefix: fl.file_prefix.unwrap_or(log_defaults.file_prefix),
            file_rotation: fl
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(log_defaults.file_rotation),
        };

        Self {
            upload_url,
            timeout_secs,
            output_dir,
            enable_tui,
            demo_mode,
            logging,
        }
    }

    /// Render this config as a TOML template (single source of truth for
    /// the generated config file)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# docdrop configuration
# Values here are overridden by DOCDROP_* environment variables.

# Conversion endpoint
upload_url = "{url}"

# Client-side upload timeout (seconds)
timeout_secs = {timeout}

# Where saved results land
output_dir = "{output}"

[logging]
# Log level: error, warn, info, debug, trace
level = "{level}"
# Also write logs to rotating files
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
# Rotation: hourly, daily, never
file_rotation = "{rotation}"
"#,
            url = self.upload_url,
            timeout = self.timeout_secs,
            output = self.output_dir.display(),
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            rotation = self.logging.file_rotation.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.upload_url, DEFAULT_UPLOAD_URL);
        assert_eq!(config.timeout_secs, 300);
        assert!(config.enable_tui);
        assert!(!config.demo_mode);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    }

    #[test]
    fn test_template_round_trips_through_toml() {
        let template = Config::default().to_toml();
        let parsed: FileConfig = toml::from_str(&template).unwrap();
        assert_eq!(parsed.upload_url.as_deref(), Some(DEFAULT_UPLOAD_URL));
        assert_eq!(parsed.timeout_secs, Some(300));
        let logging = parsed.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.file_enabled, Some(false));
        assert_eq!(logging.file_rotation.as_deref(), Some("daily"));
    }

    #[test]
    fn test_rotation_parse() {
        assert_eq!(LogRotation::parse("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
        assert_eq!(LogRotation::parse("daily"), LogRotation::Daily);
        // Unrecognized values fall back to daily
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    }
}
