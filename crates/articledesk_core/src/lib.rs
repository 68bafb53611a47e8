//! Core domain logic for ArticleDesk.
//! This crate is the single source of truth for article, validation and
//! session invariants.

pub mod auth;
pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use auth::{AuthError, AuthGateway, AuthUser, HostedAuthGateway, UserId};
pub use config::{AppConfig, AuthConfig};
pub use kv::{KeyValueStore, KvError, SqliteKvStore, ARTICLES_KEY, SESSION_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::{
    Article, ArticleFields, ArticleId, ArticleValidationError, Category, FileAttachment,
    MAX_ATTACHMENT_BYTES,
};
pub use model::session::SessionMarker;
pub use repo::article_repo::{ArticleRepository, KvArticleRepository};
pub use repo::session_repo::SessionCache;
pub use repo::{RepoError, RepoResult};
pub use service::account_service::{AccountError, AccountService};
pub use service::article_service::{ArticleService, ArticleServiceError};
pub use validation::{ArticleForm, FormKind, SignInForm, SignUpForm, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
