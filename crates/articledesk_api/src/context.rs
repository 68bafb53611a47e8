//! Application context: the explicit handle every screen action runs against.

use articledesk_core::db::{open_db, open_db_in_memory, DbError};
use articledesk_core::{
    init_logging, AccountService, AppConfig, ArticleService, AuthError, AuthGateway, AuthUser,
    HostedAuthGateway, KvArticleRepository, LoggingError, RepoResult, SessionMarker,
    SqliteKvStore, UserId,
};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure while opening or closing an [`AppContext`].
#[derive(Debug)]
pub enum ContextError {
    Db(DbError),
    Logging(LoggingError),
    Auth(AuthError),
}

impl Display for ContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "store open failed: {err}"),
            Self::Logging(err) => write!(f, "logging init failed: {err}"),
            Self::Auth(err) => write!(f, "auth gateway init failed: {err}"),
        }
    }
}

impl Error for ContextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Auth(err) => Some(err),
        }
    }
}

impl From<DbError> for ContextError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Opened store plus auth gateway.
///
/// Created by [`AppContext::open`] and released by [`AppContext::close`].
/// Screens borrow it per action; nothing is held between actions.
pub struct AppContext {
    conn: Connection,
    gateway: Box<dyn AuthGateway>,
}

pub(crate) type ArticleServiceHandle<'a> = ArticleService<KvArticleRepository<SqliteKvStore<'a>>>;
pub(crate) type AccountServiceHandle<'a> = AccountService<&'a dyn AuthGateway, SqliteKvStore<'a>>;

impl AppContext {
    /// Starts logging (when a log dir is configured), opens the store file
    /// and builds the hosted auth gateway (when URL and key are configured).
    pub fn open(config: &AppConfig) -> Result<Self, ContextError> {
        if let Some(log_dir) = &config.log_dir {
            init_logging(&config.log_level, log_dir).map_err(ContextError::Logging)?;
        }

        let gateway: Box<dyn AuthGateway> = match &config.auth {
            Some(auth) => Box::new(
                HostedAuthGateway::new(&auth.url, &auth.api_key).map_err(ContextError::Auth)?,
            ),
            None => Box::new(UnconfiguredGateway),
        };

        let conn = open_db(&config.db_path)?;
        info!(
            "event=context_open module=api status=ok auth_configured={}",
            config.auth.is_some()
        );
        Ok(Self { conn, gateway })
    }

    /// Opens a throwaway in-memory store with no auth service configured.
    pub fn in_memory() -> Result<Self, ContextError> {
        Ok(Self {
            conn: open_db_in_memory()?,
            gateway: Box::new(UnconfiguredGateway),
        })
    }

    /// Replaces the auth gateway.
    pub fn with_gateway(mut self, gateway: impl AuthGateway + 'static) -> Self {
        self.gateway = Box::new(gateway);
        self
    }

    /// Closes the store, surfacing any error the final flush reports.
    pub fn close(self) -> Result<(), ContextError> {
        self.conn
            .close()
            .map_err(|(_, err)| ContextError::Db(DbError::Sqlite(err)))?;
        info!("event=context_close module=api status=ok");
        Ok(())
    }

    pub(crate) fn articles(&self) -> ArticleServiceHandle<'_> {
        ArticleService::new(KvArticleRepository::new(SqliteKvStore::new(&self.conn)))
    }

    pub(crate) fn accounts(&self) -> AccountServiceHandle<'_> {
        AccountService::new(self.gateway.as_ref(), SqliteKvStore::new(&self.conn))
    }

    /// Marker cached by the last successful sign-in, if any.
    pub fn current_session(&self) -> RepoResult<Option<SessionMarker>> {
        self.accounts().current_session()
    }

    /// Raw connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Stand-in gateway used when no auth service is configured.
struct UnconfiguredGateway;

impl AuthGateway for UnconfiguredGateway {
    fn sign_up(&self, _: &str, _: &str, _: &str) -> Result<UserId, AuthError> {
        Err(AuthError::NotConfigured)
    }

    fn sign_in(&self, _: &str, _: &str) -> Result<AuthUser, AuthError> {
        Err(AuthError::NotConfigured)
    }
}
