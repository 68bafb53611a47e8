//! Session marker cache under [`SESSION_KEY`].

use super::{RepoError, RepoResult};
use crate::kv::{KeyValueStore, SESSION_KEY};
use crate::model::session::SessionMarker;
use log::info;

/// Reads and writes the cached session marker.
pub struct SessionCache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replaces the cached marker.
    pub fn save_session(&self, marker: &SessionMarker) -> RepoResult<()> {
        let encoded = serde_json::to_string(marker).map_err(RepoError::Serialization)?;
        self.store.set(SESSION_KEY, &encoded)?;
        info!("event=session_save module=repo status=ok");
        Ok(())
    }

    /// Returns the cached marker, or `None` before the first sign-in.
    pub fn load_session(&self) -> RepoResult<Option<SessionMarker>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| RepoError::Corrupt(format!("invalid `{SESSION_KEY}` value: {err}")))
    }
}
