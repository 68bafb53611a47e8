//! Boundary to the hosted authentication service.
//!
//! # Responsibility
//! - Define the two remote operations the app consumes: sign-up, sign-in.
//! - Keep credential storage, hashing and confirmation out of core.
//!
//! # Invariants
//! - Gateways are only called after local form validation passed.
//! - Rejection messages from the service are passed through verbatim.

mod hosted;

pub use hosted::HostedAuthGateway;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// User identifier issued by the auth service.
pub type UserId = String;

/// Identity confirmed by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

/// Failure reported by, or while reaching, the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The service answered and refused; holds its message verbatim.
    Rejected(String),
    /// The service could not be reached or its reply could not be read.
    Transport(String),
    /// No auth service URL/key is configured.
    NotConfigured,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(message) | Self::Transport(message) => f.write_str(message),
            Self::NotConfigured => write!(f, "authentication service is not configured"),
        }
    }
}

impl Error for AuthError {}

/// Remote account operations.
pub trait AuthGateway {
    /// Creates an account and returns its user id.
    fn sign_up(&self, email: &str, password: &str, display_name: &str)
        -> Result<UserId, AuthError>;

    /// Verifies credentials and returns the signed-in identity.
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;
}

impl<G: AuthGateway + ?Sized> AuthGateway for &G {
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserId, AuthError> {
        (**self).sign_up(email, password, display_name)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        (**self).sign_in(email, password)
    }
}
