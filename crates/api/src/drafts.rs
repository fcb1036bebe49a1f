//! Registry of live draft sessions.
//!
//! One `DraftSession` per document being edited, created lazily on the
//! first draft write and removed when the editor closes. The registry
//! shares a single `DraftStore` across sessions.

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use despacho_core::draft::{DraftSession, DraftStore};

/// Draft sessions keyed by document id.
pub struct DraftSessions<S: DraftStore> {
    store: Arc<S>,
    sessions: DashMap<Uuid, Arc<DraftSession<S>>>,
}

impl<S: DraftStore> DraftSessions<S> {
    /// Create an empty registry writing through `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            sessions: DashMap::new(),
        }
    }

    /// Session for a document, created on first use.
    pub fn session(&self, document_id: Uuid) -> Arc<DraftSession<S>> {
        self.sessions
            .entry(document_id)
            .or_insert_with(|| {
                Arc::new(DraftSession::new(Arc::clone(&self.store), document_id))
            })
            .clone()
    }

    /// Existing session for a document, if the editor is open.
    #[must_use]
    pub fn get(&self, document_id: Uuid) -> Option<Arc<DraftSession<S>>> {
        self.sessions.get(&document_id).map(|s| s.clone())
    }

    /// Close and remove a document's session, cancelling pending timers.
    ///
    /// Returns false when no session was open.
    pub fn close(&self, document_id: Uuid) -> bool {
        if let Some((_, session)) = self.sessions.remove(&document_id) {
            session.close();
            true
        } else {
            false
        }
    }

    /// Number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use despacho_core::draft::{DraftError, DraftPatch};

    struct NoopStore;

    impl DraftStore for NoopStore {
        async fn save_draft(&self, _document_id: Uuid, _patch: DraftPatch) -> Result<(), DraftError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_session_is_created_once_per_document() {
        let registry = DraftSessions::new(Arc::new(NoopStore));
        let id = Uuid::new_v4();

        let first = registry.session(id);
        let second = registry.session(id);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_documents_get_distinct_sessions() {
        let registry = DraftSessions::new(Arc::new(NoopStore));

        let a = registry.session(Uuid::new_v4());
        let b = registry.session(Uuid::new_v4());

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_close_removes_session() {
        let registry = DraftSessions::new(Arc::new(NoopStore));
        let id = Uuid::new_v4();

        registry.session(id);
        assert!(registry.close(id));
        assert!(registry.is_empty());
        assert!(registry.get(id).is_none());
    }

    #[tokio::test]
    async fn test_close_without_session_is_false() {
        let registry = DraftSessions::new(Arc::new(NoopStore));
        assert!(!registry.close(Uuid::new_v4()));
    }
}
