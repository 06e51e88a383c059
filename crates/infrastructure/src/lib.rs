//! Infrastructure adapters for audit recording ports.

#![forbid(unsafe_code)]

mod audit_sink_config;
mod in_memory_audit_event_repository;
mod postgres_audit_event_repository;
mod queued_audit_recorder;
#[cfg(test)]
mod test_support;
mod tracing_audit_recorder;

pub use audit_sink_config::{AuditSink, AuditSinkConfig, AuditSinkKind, connect_audit_sink};
pub use in_memory_audit_event_repository::InMemoryAuditEventRepository;
pub use postgres_audit_event_repository::PostgresAuditEventRepository;
pub use queued_audit_recorder::{AuditQueueDrain, QueuedAuditRecorder};
pub use tracing_audit_recorder::TracingAuditRecorder;
