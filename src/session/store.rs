//! In-memory session store.
//!
//! Sessions live in a moka cache with a time-to-idle, so an abandoned form is
//! dropped without any cleanup job. Each entry is behind its own mutex; a
//! lock is only ever held for one synchronous edit, never across `.await`.

use moka::future::Cache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::model::InvoiceSession;
use super::SessionError;

pub type SharedSession = Arc<Mutex<InvoiceSession>>;

#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<Uuid, SharedSession>,
}

impl SessionStore {
    pub fn new(time_to_idle: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_idle(time_to_idle)
            .max_capacity(max_capacity)
            .build();
        Self { cache }
    }

    /// Create a fresh session and return a snapshot of it.
    pub async fn create(&self) -> InvoiceSession {
        let session = InvoiceSession::new();
        let snapshot = session.clone();
        self.cache
            .insert(session.id, Arc::new(Mutex::new(session)))
            .await;
        log::info!("Created invoice session {}", snapshot.id);
        snapshot
    }

    pub async fn get(&self, id: &Uuid) -> Result<SharedSession, SessionError> {
        self.cache
            .get(id)
            .await
            .ok_or(SessionError::NotFound(*id))
    }

    /// Run `f` against the session while holding its lock.
    pub async fn with_session<R, F>(&self, id: &Uuid, f: F) -> Result<R, SessionError>
    where
        F: FnOnce(&mut InvoiceSession) -> R,
    {
        let session = self.get(id).await?;
        let mut guard = session.lock();
        let result = f(&mut *guard);
        Ok(result)
    }

    pub async fn snapshot(&self, id: &Uuid) -> Result<InvoiceSession, SessionError> {
        self.with_session(id, |session| session.clone()).await
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.cache.remove(id).await.is_some();
        if removed {
            log::info!("Removed invoice session {}", id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::RowInput;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(60), 10)
    }

    #[actix_web::test]
    async fn test_create_and_get() {
        let store = store();
        let created = store.create().await;
        let fetched = store.snapshot(&created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.rows.len(), 1);
    }

    #[actix_web::test]
    async fn test_edits_are_visible_to_later_reads() {
        let store = store();
        let id = store.create().await.id;

        store
            .with_session(&id, |session| {
                session.update_row(0, RowInput::new("Pen", "2.50", "4")).map(|_| ())
            })
            .await
            .unwrap()
            .unwrap();

        let snapshot = store.snapshot(&id).await.unwrap();
        assert_eq!(snapshot.valid_items().len(), 1);
    }

    #[actix_web::test]
    async fn test_sessions_are_isolated() {
        let store = store();
        let first = store.create().await.id;
        let second = store.create().await.id;

        store
            .with_session(&first, |session| {
                session.update_row(0, RowInput::new("Pen", "1", "1")).map(|_| ())
            })
            .await
            .unwrap()
            .unwrap();

        assert!(store.snapshot(&second).await.unwrap().rows[0].is_blank());
    }

    #[actix_web::test]
    async fn test_remove_and_missing() {
        let store = store();
        let id = store.create().await.id;

        assert!(store.remove(&id).await);
        assert!(!store.remove(&id).await);
        assert!(matches!(
            store.get(&id).await,
            Err(SessionError::NotFound(missing)) if missing == id
        ));
    }
}
