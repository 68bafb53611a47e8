//! Account use-case service: sign-up, sign-in and the cached session.
//!
//! # Invariants
//! - The auth gateway is never called with a form that failed validation.
//! - The session marker is written only after the gateway confirmed the
//!   credentials.

use crate::auth::{AuthError, AuthGateway, UserId};
use crate::kv::KeyValueStore;
use crate::model::session::SessionMarker;
use crate::repo::session_repo::SessionCache;
use crate::repo::{RepoError, RepoResult};
use crate::validation::{SignInForm, SignUpForm, ValidationError};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for account use-cases.
#[derive(Debug)]
pub enum AccountError {
    Validation(ValidationError),
    Auth(AuthError),
    /// Caching the session marker failed.
    Repo(RepoError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Auth(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Auth(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AuthError> for AccountError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<RepoError> for AccountError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Account service over an auth gateway and the local session cache.
pub struct AccountService<G: AuthGateway, S: KeyValueStore> {
    gateway: G,
    sessions: SessionCache<S>,
    clock: fn() -> DateTime<Utc>,
}

impl<G: AuthGateway, S: KeyValueStore> AccountService<G, S> {
    pub fn new(gateway: G, store: S) -> Self {
        Self::with_clock(gateway, store, Utc::now)
    }

    /// Uses `clock` to stamp `loginTime` on new session markers.
    pub fn with_clock(gateway: G, store: S, clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            gateway,
            sessions: SessionCache::new(store),
            clock,
        }
    }

    /// Validates the form and creates the account remotely.
    ///
    /// Nothing is cached locally; the user still has to sign in.
    pub fn sign_up(&self, form: &SignUpForm) -> Result<UserId, AccountError> {
        form.validate()?;
        Ok(self
            .gateway
            .sign_up(&form.email, &form.password, &form.full_name)?)
    }

    /// Validates the form, verifies credentials remotely and caches the
    /// resulting session marker.
    pub fn sign_in(&self, form: &SignInForm) -> Result<SessionMarker, AccountError> {
        form.validate()?;
        let user = self.gateway.sign_in(&form.email, &form.password)?;
        let email = if user.email.is_empty() {
            form.email.clone()
        } else {
            user.email
        };
        let marker = SessionMarker::new(user.id, email, (self.clock)());
        self.sessions.save_session(&marker)?;
        Ok(marker)
    }

    /// Returns the marker cached by the last successful sign-in.
    pub fn current_session(&self) -> RepoResult<Option<SessionMarker>> {
        self.sessions.load_session()
    }
}
