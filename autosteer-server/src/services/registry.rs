use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::SessionSnapshot;

/// Latest snapshot of every connected session.
///
/// Sessions keep sole ownership of their controllers; only copies land here.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionSnapshot>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the snapshot of a session.
    pub async fn publish(&self, snapshot: SessionSnapshot) {
        self.sessions.write().await.insert(snapshot.id, snapshot);
    }

    pub async fn remove(&self, id: &Uuid) -> Option<SessionSnapshot> {
        self.sessions.write().await.remove(id)
    }

    pub async fn get(&self, id: &Uuid) -> Option<SessionSnapshot> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn list(&self) -> Vec<SessionSnapshot> {
        let mut sessions: Vec<_> = self.sessions.read().await.values().cloned().collect();
        sessions.sort_by_key(|snapshot| snapshot.id);
        sessions
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
