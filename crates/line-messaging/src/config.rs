//! Configuration for the client and CLI.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LineError, LineResult};
use crate::validate::DEFAULT_MAX_DEPTH;

pub const ENV_ACCESS_TOKEN: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const ENV_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";
pub const ENV_ORIGIN: &str = "LINE_API_ORIGIN";

/// Production API origin.
pub const DEFAULT_ORIGIN: &str = "https://api.line.me";

/// Client configuration: typically stored at
/// `~/.config/line-messaging/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Channel access token (or read from LINE_CHANNEL_ACCESS_TOKEN).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Channel secret (or read from LINE_CHANNEL_SECRET).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_secret: Option<String>,

    /// API origin.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Per-request timeout; unset means none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            channel_secret: None,
            origin: default_origin(),
            timeout_secs: None,
            validation: ValidationConfig::default(),
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.into()
}

/// Local validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Nesting guard for boxes and filter operators.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl ClientConfig {
    /// `~/.config/line-messaging/config.toml`, when a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("line-messaging").join("config.toml"))
    }

    /// Parse a TOML document.
    pub fn from_toml(raw: &str) -> LineResult<Self> {
        toml::from_str(raw).map_err(|e| LineError::Config(e.to_string()))
    }

    /// Read a config file.
    pub fn from_file(path: &Path) -> LineResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LineError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    /// The default file when present, then environment overrides.
    pub fn load() -> LineResult<Self> {
        let config = match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply LINE_CHANNEL_ACCESS_TOKEN, LINE_CHANNEL_SECRET and LINE_API_ORIGIN
    /// as returned by `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(secret) = lookup(ENV_CHANNEL_SECRET) {
            self.channel_secret = Some(secret);
        }
        if let Some(origin) = lookup(ENV_ORIGIN) {
            self.origin = origin;
        }
        self
    }

    /// The access token, or a config error naming where to set it.
    pub fn require_access_token(&self) -> LineResult<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LineError::Config(format!("no channel access token; set {ENV_ACCESS_TOKEN}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = ClientConfig::from_toml("access_token = \"abc\"\n").unwrap();
        assert_eq!(config.origin, "https://api.line.me");
        assert_eq!(config.validation.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.require_access_token().unwrap(), "abc");
    }

    #[test]
    fn test_nested_validation_table() {
        let raw = r#"
            origin = "http://localhost:9000"
            timeout_secs = 5

            [validation]
            max_depth = 16
        "#;
        let config = ClientConfig::from_toml(raw).unwrap();
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.validation.max_depth, 16);
    }

    #[test]
    fn test_env_overrides_win() {
        let config = ClientConfig::default().with_env_overrides(|key| match key {
            ENV_ACCESS_TOKEN => Some("from-env".into()),
            ENV_ORIGIN => Some("http://127.0.0.1:8080".into()),
            _ => None,
        });
        assert_eq!(config.access_token.as_deref(), Some("from-env"));
        assert_eq!(config.origin, "http://127.0.0.1:8080");
        assert_eq!(config.channel_secret, None);
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = ClientConfig::default().require_access_token().unwrap_err();
        assert!(matches!(err, LineError::Config(_)));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            ClientConfig::from_toml("origin = ["),
            Err(LineError::Config(_))
        ));
    }
}
