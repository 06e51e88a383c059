use std::sync::Arc;

use tessera_application::{AuditEvent, AuditEventRepository, AuditRecorder};
use tessera_core::{AppError, AppResult, RequestContext};
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Recorder that enqueues events on a bounded channel and persists them
/// from a background task.
///
/// `record` never waits: when the queue is full or the drain task is gone
/// the event is dropped with a warning.
#[derive(Clone)]
pub struct QueuedAuditRecorder {
    sender: Sender<AuditEvent>,
}

/// Handle to the task that drains a [`QueuedAuditRecorder`] queue.
///
/// Dropping the handle leaves the task running until every recorder clone
/// is gone. Call [`AuditQueueDrain::shutdown`] to flush the queue while
/// recorders are still shared.
#[derive(Debug)]
pub struct AuditQueueDrain {
    close: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl QueuedAuditRecorder {
    /// Spawns the drain task on the current Tokio runtime.
    #[must_use]
    pub fn spawn(
        repository: Arc<dyn AuditEventRepository>,
        capacity: usize,
    ) -> (Self, AuditQueueDrain) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (close, close_signal) = oneshot::channel();
        let handle = tokio::spawn(drain_events(receiver, repository, close_signal));

        (Self { sender }, AuditQueueDrain { close, handle })
    }
}

impl AuditQueueDrain {
    /// Closes the queue, persists every event already enqueued and waits for
    /// the drain task to finish.
    ///
    /// Events recorded after the queue is closed are dropped with a warning.
    pub async fn shutdown(self) -> AppResult<()> {
        // The task may already have stopped; the join result reports it.
        let _ = self.close.send(());

        self.handle
            .await
            .map_err(|error| AppError::Internal(format!("audit drain task failed: {error}")))
    }
}

impl AuditRecorder for QueuedAuditRecorder {
    fn record(&self, _context: &RequestContext, event: AuditEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(
                    action = %event.action,
                    target_type = %event.target.object_type,
                    target_id = %event.target.primary_key,
                    "audit queue is full; dropping event"
                );
            }
            Err(TrySendError::Closed(event)) => {
                warn!(
                    action = %event.action,
                    target_type = %event.target.object_type,
                    target_id = %event.target.primary_key,
                    "audit queue is closed; dropping event"
                );
            }
        }
    }
}

async fn drain_events(
    mut receiver: Receiver<AuditEvent>,
    repository: Arc<dyn AuditEventRepository>,
    mut close_signal: oneshot::Receiver<()>,
) {
    let mut close_pending = true;

    loop {
        tokio::select! {
            biased;

            signal = &mut close_signal, if close_pending => {
                close_pending = false;
                // A dropped drain handle is not a shutdown request.
                if signal.is_ok() {
                    receiver.close();
                }
            }
            event = receiver.recv() => {
                let Some(event) = event else {
                    break;
                };

                let action = event.action;
                if let Err(error) = repository.append_event(event).await {
                    warn!(action = %action, error = %error, "failed to persist audit event");
                }
            }
        }
    }

    debug!("audit queue drained");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tessera_application::{AuditEvent, AuditEventRepository, AuditRecorder, build_event};
    use tessera_core::{AppError, AppResult, RequestContext};
    use tessera_domain::{AuditAction, AuditObject, User};

    use super::QueuedAuditRecorder;
    use crate::InMemoryAuditEventRepository;
    use crate::test_support::LogCapture;

    fn user_update_event(name: &str) -> AuditEvent {
        let doer = AuditObject::from(User {
            id: 1,
            name: "admin".to_owned(),
        });
        let user = AuditObject::from(User {
            id: 2,
            name: name.to_owned(),
        });

        build_event(
            &RequestContext::background(),
            AuditAction::UserUpdate,
            &doer,
            Some(&user),
            &user,
            format_args!("Updated settings of user {name}."),
        )
    }

    #[tokio::test]
    async fn shutdown_persists_queued_events_in_order() {
        let repository = Arc::new(InMemoryAuditEventRepository::new());
        let (recorder, drain) = QueuedAuditRecorder::spawn(repository.clone(), 8);
        let context = RequestContext::background();

        for name in ["alice", "bob", "carol"] {
            recorder.record(&context, user_update_event(name));
        }
        assert!(drain.shutdown().await.is_ok());

        let messages: Vec<String> = repository
            .events()
            .await
            .into_iter()
            .map(|event| event.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Updated settings of user alice.",
                "Updated settings of user bob.",
                "Updated settings of user carol.",
            ]
        );
    }

    #[tokio::test]
    async fn dropping_every_recorder_also_ends_the_drain() {
        let repository = Arc::new(InMemoryAuditEventRepository::new());
        let (recorder, drain) = QueuedAuditRecorder::spawn(repository.clone(), 8);

        recorder.record(&RequestContext::background(), user_update_event("alice"));
        drop(recorder);
        assert!(drain.handle.await.is_ok());

        assert_eq!(repository.events().await.len(), 1);
    }

    #[tokio::test]
    async fn full_queue_drops_events_without_blocking() {
        let repository = Arc::new(InMemoryAuditEventRepository::new());
        let (recorder, drain) = QueuedAuditRecorder::spawn(repository.clone(), 1);
        let context = RequestContext::background();
        let capture = LogCapture::default();

        // The current-thread test runtime does not poll the drain task
        // until this task yields, so the second event finds the queue full.
        tracing::subscriber::with_default(capture.subscriber(), || {
            recorder.record(&context, user_update_event("alice"));
            recorder.record(&context, user_update_event("bob"));
        });
        assert!(drain.shutdown().await.is_ok());

        assert!(capture.contents().contains("audit queue is full; dropping event"));
        let events = repository.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Updated settings of user alice.");
    }

    struct FlakyAuditEventRepository {
        attempts: AtomicUsize,
        inner: InMemoryAuditEventRepository,
    }

    #[async_trait]
    impl AuditEventRepository for FlakyAuditEventRepository {
        async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(AppError::Internal("database unavailable".to_owned()));
            }
            self.inner.append_event(event).await
        }
    }

    #[tokio::test]
    async fn persistence_failure_does_not_stop_the_drain() {
        let repository = Arc::new(FlakyAuditEventRepository {
            attempts: AtomicUsize::new(0),
            inner: InMemoryAuditEventRepository::new(),
        });
        let (recorder, drain) = QueuedAuditRecorder::spawn(repository.clone(), 8);
        let context = RequestContext::background();

        recorder.record(&context, user_update_event("alice"));
        recorder.record(&context, user_update_event("bob"));
        assert!(drain.shutdown().await.is_ok());

        let events = repository.inner.events().await;
        assert_eq!(repository.attempts.load(Ordering::SeqCst), 2);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Updated settings of user bob.");
    }

    #[tokio::test]
    async fn records_after_shutdown_are_dropped_with_a_warning() {
        let repository = Arc::new(InMemoryAuditEventRepository::new());
        let (recorder, drain) = QueuedAuditRecorder::spawn(repository.clone(), 4);
        assert!(drain.shutdown().await.is_ok());

        let capture = LogCapture::default();
        tracing::subscriber::with_default(capture.subscriber(), || {
            recorder.record(&RequestContext::background(), user_update_event("alice"));
        });

        let output = capture.contents();
        assert!(output.contains("audit queue is closed; dropping event"));
        assert!(output.contains("action=user:update"));
        assert!(repository.events().await.is_empty());
    }
}
