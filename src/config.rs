use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub verification: VerificationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Settings for talking to the ATP site
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    /// Hosts (and their subdomains) a profile URL may point at
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,
    /// Path fragment every profile URL must contain
    #[serde(default = "default_profile_path_marker")]
    pub profile_path_marker: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            allowed_hosts: default_allowed_hosts(),
            profile_path_marker: default_profile_path_marker(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

fn default_allowed_hosts() -> Vec<String> { vec!["atptour.com".to_string()] }
fn default_profile_path_marker() -> String { "/players/".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}
fn default_accept_language() -> String { "en-US,en;q=0.9".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Text,
}

impl LoggingSettings {
    /// Parsed `format`; unrecognised values fall back to plain text
    pub fn log_format(&self) -> LogFormat {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Text,
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GSM__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GSM__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("GSM")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("verification.allowed_hosts")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_verification_settings() {
        let settings = VerificationSettings::default();
        assert_eq!(settings.allowed_hosts, vec!["atptour.com"]);
        assert_eq!(settings.profile_path_marker, "/players/");
        assert_eq!(settings.timeout_secs, 10);
        assert!(settings.accept_language.starts_with("en"));
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
        assert_eq!(LoggingSettings::default().log_format(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_parsing() {
        let with_format = |format: &str| LoggingSettings {
            level: default_log_level(),
            format: format.to_string(),
        };
        assert_eq!(with_format("JSON").log_format(), LogFormat::Json);
        assert_eq!(with_format("pretty").log_format(), LogFormat::Pretty);
        assert_eq!(with_format("text").log_format(), LogFormat::Text);
        assert_eq!(with_format("compact").log_format(), LogFormat::Text);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("gsm-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[verification]
allowed_hosts = ["atptour.com", "127.0.0.1"]
timeout_secs = 3
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.verification.allowed_hosts, vec!["atptour.com", "127.0.0.1"]);
        assert_eq!(settings.verification.timeout_secs, 3);
        assert_eq!(settings.verification.profile_path_marker, "/players/");
        assert_eq!(settings.logging.level, "info");
    }
}
