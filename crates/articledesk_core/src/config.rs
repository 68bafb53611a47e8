//! Runtime configuration resolved from the environment.
//!
//! | Variable                 | Meaning                                   |
//! |--------------------------|-------------------------------------------|
//! | `ARTICLEDESK_DB_PATH`    | store file, default `<tmp>/articledesk.sqlite3` |
//! | `ARTICLEDESK_LOG_LEVEL`  | one of trace, debug, info, warn, error    |
//! | `ARTICLEDESK_LOG_DIR`    | absolute log directory; unset disables file logs |
//! | `ARTICLEDESK_AUTH_URL`   | base URL of the hosted auth service       |
//! | `ARTICLEDESK_AUTH_KEY`   | project API key for the auth service      |

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ARTICLEDESK_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ARTICLEDESK_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ARTICLEDESK_LOG_DIR";
pub const AUTH_URL_VAR: &str = "ARTICLEDESK_AUTH_URL";
pub const AUTH_KEY_VAR: &str = "ARTICLEDESK_AUTH_KEY";

const DEFAULT_DB_FILE_NAME: &str = "articledesk.sqlite3";

/// Hosted auth service coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub url: String,
    pub api_key: String,
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    /// `None` when URL or key is missing; account actions then fail.
    pub auth: Option<AuthConfig>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let auth = match (read(AUTH_URL_VAR), read(AUTH_KEY_VAR)) {
            (Some(url), Some(api_key)) => Some(AuthConfig { url, api_key }),
            _ => None,
        };

        Self {
            db_path: read(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR).map(PathBuf::from),
            auth,
        }
    }
}
