//! Repository layer over the local key-value store.
//!
//! # Responsibility
//! - Map the article collection and session marker onto their fixed keys.
//! - Keep JSON encoding details out of service and screen code.
//!
//! # Invariants
//! - Every article mutation is one read and one write of the whole
//!   collection, inside one `KeyValueStore::update_entry` call.
//! - Read paths reject malformed persisted state instead of masking it.
//!   Malformed means unparsable, a half-set attachment or a duplicate id;
//!   field-level form rules are enforced on writes only.

pub mod article_repo;
pub mod session_repo;

use crate::kv::KvError;
use crate::model::article::{ArticleId, ArticleValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for article and session persistence.
#[derive(Debug)]
pub enum RepoError {
    /// A record about to be written breaks a model invariant.
    Validation(ArticleValidationError),
    /// The backing store failed.
    Storage(KvError),
    /// The persisted value is not a well-formed collection or marker.
    Corrupt(String),
    NotFound(ArticleId),
    Serialization(serde_json::Error),
    /// The largest stored numeric id leaves no room for a newer one.
    IdSpaceExhausted,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Corrupt(message) => write!(f, "stored data is corrupt: {message}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::Serialization(err) => write!(f, "failed to encode stored data: {err}"),
            Self::IdSpaceExhausted => write!(f, "no article id is left to assign"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Corrupt(_) | Self::NotFound(_) | Self::IdSpaceExhausted => None,
        }
    }
}

impl From<ArticleValidationError> for RepoError {
    fn from(value: ArticleValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}
