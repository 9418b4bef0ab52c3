use gatehouse_core::Session;
use tokio::sync::RwLock;

/// In-memory copy of the current session.
///
/// Empty on every fresh start; the durable slot is the source of truth
/// across reloads.
#[derive(Debug, Default)]
pub struct SessionCache {
    current: RwLock<Option<Session>>,
}

impl SessionCache {
    /// Creates a new empty SessionCache.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Replaces the cached session.
    pub async fn set(&self, session: Session) {
        *self.current.write().await = Some(session);
    }

    pub async fn clear(&self) {
        *self.current.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_replaces_wholesale() {
        let cache = SessionCache::new();
        assert!(cache.get().await.is_none());

        cache.set(Session::new("first@example.com")).await;
        cache.set(Session::new("second@example.com")).await;
        assert_eq!(cache.get().await.unwrap().email, "second@example.com");

        cache.clear().await;
        assert!(cache.get().await.is_none());
    }
}
