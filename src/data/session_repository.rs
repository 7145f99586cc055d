use crate::domain::repository::SessionRepository;
use crate::domain::session::Session;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    storage: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self), fields(session_id = %session.id, user_id = %session.user_id))]
    async fn save_session(&self, session: Session) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(session.id.clone(), session);
        debug!("Session stored");
        Ok(())
    }

    async fn find_session(&self, id: &str) -> Result<Option<Session>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    #[instrument(skip(self), fields(session_id = id))]
    async fn delete_session(&self, id: &str) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let removed = storage.remove(id).is_some();
        debug!(removed, "Session delete requested");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut storage = self.storage.write().await;
        let before = storage.len();
        storage.retain(|_, session| session.expires_at >= now);
        let purged = before - storage.len();
        if purged > 0 {
            debug!(purged, remaining = storage.len(), "Purged expired sessions");
        }
        Ok(purged)
    }
}
