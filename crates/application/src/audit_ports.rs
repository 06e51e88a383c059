use async_trait::async_trait;
use tessera_core::{AppResult, RequestContext};

use crate::AuditEvent;

/// Sink that accepts finished audit events.
///
/// Recording is fire-and-forget for the business operation that triggered
/// it: implementations must return after at most a short constant-time
/// enqueue and must never fail the caller.
pub trait AuditRecorder: Send + Sync {
    /// Hands one finished event to the sink.
    ///
    /// The event is self-contained; `context` is the call context it was
    /// built in and is only used for sink-side correlation.
    fn record(&self, context: &RequestContext, event: AuditEvent);
}

/// Repository port for durable, append-only audit storage.
#[async_trait]
pub trait AuditEventRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
