//! Cached sign-in session marker.
//!
//! The marker records who last signed in and when. It grants nothing:
//! article storage does not consult it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Locally cached proof of a successful prior sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMarker {
    /// User id issued by the auth service.
    pub id: String,
    pub email: String,
    /// Serialized as an RFC 3339 UTC timestamp.
    pub login_time: DateTime<Utc>,
}

impl SessionMarker {
    pub fn new(id: impl Into<String>, email: impl Into<String>, login_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            login_time,
        }
    }
}
