use tessera_application::{AuditEvent, AuditRecorder};
use tessera_core::RequestContext;
use tracing::info;

/// Recorder that writes every event as one structured log line under the
/// `audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditRecorder;

impl TracingAuditRecorder {
    /// Creates a log-backed recorder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AuditRecorder for TracingAuditRecorder {
    fn record(&self, context: &RequestContext, event: AuditEvent) {
        info!(
            target: "audit",
            action = %event.action,
            background = context.request().is_none(),
            doer_type = %event.doer.object_type,
            doer_id = %event.doer.primary_key,
            doer_name = %event.doer.friendly_name,
            scope_type = %event.scope.object_type,
            scope_id = %event.scope.primary_key,
            scope_name = %event.scope.friendly_name,
            target_type = %event.target.object_type,
            target_id = %event.target.primary_key,
            target_name = %event.target.friendly_name,
            ip_address = %event.ip_address,
            time = %event.time.to_rfc3339(),
            "{}",
            event.message
        );
    }
}

#[cfg(test)]
mod tests {
    use tessera_application::{AuditRecorder, build_event};
    use tessera_core::{RequestContext, RequestMetadata};
    use tessera_domain::{AuditAction, AuditObject, Organization, Team, User};

    use super::TracingAuditRecorder;
    use crate::test_support::LogCapture;

    #[test]
    fn event_is_logged_with_structured_fields() {
        let capture = LogCapture::default();

        let doer = AuditObject::from(User {
            id: 1,
            name: "admin".to_owned(),
        });
        let organization = AuditObject::from(Organization {
            id: 2,
            name: "acme".to_owned(),
        });
        let team = AuditObject::from(Team {
            id: 4,
            name: "Owners".to_owned(),
        });
        let context = RequestContext::with_request(RequestMetadata::new("198.51.100.7:40000"));
        let event = build_event(
            &context,
            AuditAction::OrganizationTeamAdd,
            &doer,
            Some(&organization),
            &team,
            format_args!("Added team {}.", "Owners"),
        );

        tracing::subscriber::with_default(capture.subscriber(), || {
            TracingAuditRecorder::new().record(&context, event);
        });

        let output = capture.contents();
        assert!(output.contains("Added team Owners."));
        assert!(output.contains("action=organization:team:add"));
        assert!(output.contains("scope_type=organization"));
        assert!(output.contains("target_type=team"));
        assert!(output.contains("target_id=4"));
        assert!(output.contains("ip_address=198.51.100.7"));
        assert!(output.contains("background=false"));
    }
}
