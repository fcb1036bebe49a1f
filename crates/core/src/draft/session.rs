//! Per-document editing session with debounced durable writes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

use super::debounce::DebounceTimer;
use super::error::DraftError;

/// Quiet window for body-text edits.
pub const CONTENT_QUIET_WINDOW: Duration = Duration::from_millis(2000);
/// Quiet window for date-field edits.
pub const DATE_QUIET_WINDOW: Duration = Duration::from_millis(1000);

/// A partial durable write carrying only the fields being saved.
///
/// Body and date saves may be in flight simultaneously; they stay
/// disjoint so neither clobbers the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    /// Rich-text body, when this is a body save.
    pub editor_content: Option<String>,
    /// Document date, when this is a date save.
    pub created_date: Option<NaiveDate>,
}

/// Durable store consumed by the editing session.
///
/// Implemented by the db crate's document repository.
pub trait DraftStore: Send + Sync + 'static {
    /// Persist the fields present in `patch` for a document.
    fn save_draft(
        &self,
        document_id: Uuid,
        patch: DraftPatch,
    ) -> impl std::future::Future<Output = Result<(), DraftError>> + Send;
}

struct SessionInner<S> {
    store: Arc<S>,
    document_id: Uuid,
    latest_content: Mutex<Option<String>>,
    latest_date: Mutex<Option<NaiveDate>>,
    content_timer: Mutex<DebounceTimer>,
    date_timer: Mutex<DebounceTimer>,
    saves_in_flight: AtomicUsize,
    saving_tx: watch::Sender<bool>,
}

impl<S: DraftStore> SessionInner<S> {
    /// Dispatch one durable write. The saving flag is true strictly
    /// between dispatch and completion, shared across field groups.
    async fn flush(self: Arc<Self>, patch: DraftPatch) {
        self.save_started();

        if let Err(e) = self.store.save_draft(self.document_id, patch).await {
            warn!(document_id = %self.document_id, error = %e, "draft autosave failed");
        }

        self.save_finished();
    }

    /// Counter and flag change together under the watch sender's lock;
    /// the flag always reads as `saves_in_flight > 0`.
    fn save_started(&self) {
        self.saving_tx.send_modify(|saving| {
            self.saves_in_flight.fetch_add(1, Ordering::SeqCst);
            *saving = true;
        });
    }

    fn save_finished(&self) {
        self.saving_tx.send_modify(|saving| {
            if self.saves_in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
                *saving = false;
            }
        });
    }
}

/// Editing session for one document.
///
/// Call [`edit_content`](Self::edit_content) /
/// [`edit_date`](Self::edit_date) on every change; the session coalesces
/// bursts into a single write carrying the latest value. Call
/// [`close`](Self::close) on teardown so a stale save cannot fire after
/// the user has left.
pub struct DraftSession<S: DraftStore> {
    inner: Arc<SessionInner<S>>,
}

impl<S: DraftStore> DraftSession<S> {
    /// Create a session for a document.
    #[must_use]
    pub fn new(store: Arc<S>, document_id: Uuid) -> Self {
        let (saving_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(SessionInner {
                store,
                document_id,
                latest_content: Mutex::new(None),
                latest_date: Mutex::new(None),
                content_timer: Mutex::new(DebounceTimer::new()),
                date_timer: Mutex::new(DebounceTimer::new()),
                saves_in_flight: AtomicUsize::new(0),
                saving_tx,
            }),
        }
    }

    /// Record a body edit and restart the body quiet window.
    pub fn edit_content(&self, value: String) {
        *self.inner.latest_content.lock().expect("lock poisoned") = Some(value);

        let inner = Arc::clone(&self.inner);
        self.inner
            .content_timer
            .lock()
            .expect("lock poisoned")
            .schedule(CONTENT_QUIET_WINDOW, move || {
                // Snapshot at fire time: only the latest value is written.
                let content = inner
                    .latest_content
                    .lock()
                    .expect("lock poisoned")
                    .clone();
                let Some(editor_content) = content else {
                    return;
                };
                let patch = DraftPatch {
                    editor_content: Some(editor_content),
                    created_date: None,
                };
                // Detached: a later reschedule must not abort a save
                // already dispatched.
                tokio::spawn(Arc::clone(&inner).flush(patch));
            });
    }

    /// Record a date edit and restart the date quiet window.
    pub fn edit_date(&self, value: NaiveDate) {
        *self.inner.latest_date.lock().expect("lock poisoned") = Some(value);

        let inner = Arc::clone(&self.inner);
        self.inner
            .date_timer
            .lock()
            .expect("lock poisoned")
            .schedule(DATE_QUIET_WINDOW, move || {
                let date = *inner.latest_date.lock().expect("lock poisoned");
                let Some(created_date) = date else {
                    return;
                };
                let patch = DraftPatch {
                    editor_content: None,
                    created_date: Some(created_date),
                };
                tokio::spawn(Arc::clone(&inner).flush(patch));
            });
    }

    /// Observable saving flag: true strictly between save dispatch and
    /// completion (success or failure).
    #[must_use]
    pub fn saving(&self) -> watch::Receiver<bool> {
        self.inner.saving_tx.subscribe()
    }

    /// Current value of the saving flag.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        *self.inner.saving_tx.borrow()
    }

    /// Document this session edits.
    #[must_use]
    pub fn document_id(&self) -> Uuid {
        self.inner.document_id
    }

    /// Cancel all pending timers. Called on session teardown; edits not
    /// yet flushed are discarded.
    pub fn close(&self) {
        self.inner
            .content_timer
            .lock()
            .expect("lock poisoned")
            .cancel();
        self.inner.date_timer.lock().expect("lock poisoned").cancel();
    }
}
