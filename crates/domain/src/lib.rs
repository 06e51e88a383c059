//! Domain types for audited actions and entities.

#![forbid(unsafe_code)]

mod audit_action;
mod audit_object;
mod scoped_actions;

pub use audit_action::AuditAction;
pub use audit_object::{
    AccessToken, AuditObject, AuditObjectType, AuditPrimaryKey, AuthenticationSource, DeployKey,
    ExternalLoginUser, GpgKey, OAuth2Application, OAuth2Grant, Organization, ProtectedBranch,
    ProtectedTag, PublicKey, PushMirror, RepoTransfer, Repository, Secret, Team, TwoFactor, User,
    UserEmailAddress, UserOpenId, WebAuthnCredential, Webhook,
};
pub use scoped_actions::ScopedActions;
