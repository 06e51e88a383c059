use std::fmt;
use std::sync::Arc;

use tessera_core::RequestContext;
use tessera_domain::{AuditAction, AuditObject};

use crate::{AuditEvent, AuditRecorder, build_event};

/// Application service that builds audit events and hands them to a recorder.
#[derive(Clone)]
pub struct AuditService {
    recorder: Arc<dyn AuditRecorder>,
}

impl AuditService {
    /// Creates a service from a recorder implementation.
    #[must_use]
    pub fn new(recorder: Arc<dyn AuditRecorder>) -> Self {
        Self { recorder }
    }

    /// Builds and records one audit event.
    ///
    /// # Panics
    ///
    /// Panics when `scope` is an entity kind that cannot own other entities.
    pub fn record(
        &self,
        context: &RequestContext,
        action: AuditAction,
        doer: &AuditObject,
        scope: Option<&AuditObject>,
        target: &AuditObject,
        message: fmt::Arguments<'_>,
    ) {
        let event = build_event(context, action, doer, scope, target, message);
        self.record_event(context, event);
    }

    /// Records an event that was already built.
    pub fn record_event(&self, context: &RequestContext, event: AuditEvent) {
        self.recorder.record(context, event);
    }
}
