use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tessera_core::RequestContext;
use tessera_domain::{AuditAction, AuditObject};

use crate::audit_descriptor::{TypeDescriptor, describe_scope, describe_target};

/// Immutable audit record describing one security-relevant change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Actor that performed the change.
    pub doer: TypeDescriptor,
    /// Owning context of the changed entity.
    pub scope: TypeDescriptor,
    /// Entity that was created, changed or removed.
    pub target: TypeDescriptor,
    /// Human-readable summary.
    pub message: String,
    /// Construction time.
    pub time: DateTime<Utc>,
    /// Origin address of the inbound request, empty outside request handling.
    pub ip_address: String,
}

/// Builds an audit event from raw entity references.
///
/// Prefer the [`audit_event!`](crate::audit_event) macro, which formats the
/// message in place.
///
/// # Panics
///
/// Panics when `scope` is an entity kind that cannot own other entities.
#[must_use]
pub fn build_event(
    context: &RequestContext,
    action: AuditAction,
    doer: &AuditObject,
    scope: Option<&AuditObject>,
    target: &AuditObject,
    message: fmt::Arguments<'_>,
) -> AuditEvent {
    AuditEvent {
        action,
        doer: describe_target(doer),
        scope: describe_scope(scope),
        target: describe_target(target),
        message: fmt::format(message),
        time: Utc::now(),
        ip_address: context.ip_address(),
    }
}

/// Builds an [`AuditEvent`] with a `format!`-style message.
///
/// ```ignore
/// let event = audit_event!(
///     &context,
///     AuditAction::UserUpdate,
///     &doer,
///     Some(&user),
///     &user,
///     "Updated settings of user {}.",
///     name,
/// );
/// ```
#[macro_export]
macro_rules! audit_event {
    ($context:expr, $action:expr, $doer:expr, $scope:expr, $target:expr $(,)?) => {
        $crate::build_event($context, $action, $doer, $scope, $target, format_args!(""))
    };
    ($context:expr, $action:expr, $doer:expr, $scope:expr, $target:expr, $($message:tt)+) => {
        $crate::build_event(
            $context,
            $action,
            $doer,
            $scope,
            $target,
            format_args!($($message)+),
        )
    };
}
