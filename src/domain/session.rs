use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side record of a logged-in browser. The session cookie is only
/// honoured while its record exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
