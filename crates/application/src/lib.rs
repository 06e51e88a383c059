//! Audit event construction and recording ports.

#![forbid(unsafe_code)]

mod audit_descriptor;
mod audit_event;
mod audit_ports;
mod audit_service;

pub use audit_descriptor::{TypeDescriptor, describe_scope, describe_target};
pub use audit_event::{AuditEvent, build_event};
pub use audit_ports::{AuditEventRepository, AuditRecorder};
pub use audit_service::AuditService;
