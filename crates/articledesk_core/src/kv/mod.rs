//! Local key-value store that holds the opaque serialized app state.
//!
//! # Responsibility
//! - Provide string get/set/remove over fixed well-known keys.
//! - Offer one atomic read-modify-write primitive for whole-value rewrites.
//!
//! # Invariants
//! - Values are opaque UTF-8 strings; the store never interprets them.
//! - `update_entry` either writes the new value or leaves the old one intact.

mod sqlite;

pub use sqlite::SqliteKvStore;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized article collection.
pub const ARTICLES_KEY: &str = "articles";
/// Key holding the serialized session marker.
pub const SESSION_KEY: &str = "user";

pub type KvResult<T> = Result<T, KvError>;

/// Transport-level failure of the backing store.
#[derive(Debug)]
pub enum KvError {
    Sqlite(rusqlite::Error),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "local store failure: {err}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    fn remove(&self, key: &str) -> KvResult<()>;

    /// Reads `key`, passes the current value to `f`, and stores the value `f`
    /// returns, as one atomic step.
    ///
    /// When `f` fails nothing is written and its error is returned unchanged.
    fn update_entry<T, E, F>(&self, key: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(Option<String>) -> Result<(String, T), E>,
        E: From<KvError>;
}
