//! Fail-open audit recording.
//!
//! [`AuditRecorder::record`] hands the event to a background worker over
//! an unbounded channel and returns immediately. The worker appends
//! through the repository and recovers every failure locally; nothing on
//! this path can fail or delay the request being observed.

use hauldesk_core::models::audit::NewAuditRecord;
use hauldesk_core::repository::AuditLogRepository;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle for submitting audit events. Cheap to clone; all clones feed
/// the same worker.
#[derive(Clone)]
pub struct AuditRecorder {
    tx: mpsc::UnboundedSender<NewAuditRecord>,
}

impl AuditRecorder {
    /// Spawn the background worker draining events into `repo`.
    ///
    /// The worker runs until every recorder clone is dropped; the
    /// returned handle completes once the queue has fully drained.
    pub fn spawn<L>(repo: L) -> (Self, JoinHandle<()>)
    where
        L: AuditLogRepository + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<NewAuditRecord>();

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let endpoint = event.endpoint.clone();
                if let Err(e) = repo.append(event).await {
                    tracing::warn!(error = %e, endpoint = %endpoint, "audit append failed");
                }
            }
        });

        (Self { tx }, handle)
    }

    /// Submit an event. Never fails the caller: if the worker is gone
    /// (process shutdown) the event is dropped with a warning.
    pub fn record(&self, event: NewAuditRecord) {
        if self.tx.send(event).is_err() {
            tracing::warn!("audit worker stopped; event dropped");
        }
    }
}
