use serde::Serialize;
use tessera_domain::{AuditObject, AuditObjectType, AuditPrimaryKey};

/// Normalized description of one entity referenced by an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Entity kind.
    #[serde(rename = "type")]
    pub object_type: AuditObjectType,
    /// Stable identifier of the entity.
    pub primary_key: AuditPrimaryKey,
    /// Best-effort human label. Empty for entities without a natural name.
    pub friendly_name: String,
    /// Original reference, kept for renderers. Absent for the system scope.
    pub target: Option<AuditObject>,
}

impl TypeDescriptor {
    /// Descriptor used when an action has no owning entity.
    #[must_use]
    pub fn system() -> Self {
        Self {
            object_type: AuditObjectType::System,
            primary_key: AuditPrimaryKey::Id(0),
            friendly_name: "System".to_owned(),
            target: None,
        }
    }

    fn new(
        object_type: AuditObjectType,
        primary_key: impl Into<AuditPrimaryKey>,
        friendly_name: impl Into<String>,
        target: &AuditObject,
    ) -> Self {
        Self {
            object_type,
            primary_key: primary_key.into(),
            friendly_name: friendly_name.into(),
            target: Some(target.clone()),
        }
    }
}

/// Describes the owning scope of an audited change.
///
/// An absent scope is the system scope. Only users, organizations and
/// repositories own other entities.
///
/// # Panics
///
/// Panics for any other entity kind. Call sites are fixed at compile time,
/// so an ineligible scope is a bug in the caller and must not be recorded
/// under a guessed description.
#[must_use]
pub fn describe_scope(scope: Option<&AuditObject>) -> TypeDescriptor {
    match scope {
        None => TypeDescriptor::system(),
        Some(
            object @ (AuditObject::User(_)
            | AuditObject::Organization(_)
            | AuditObject::Repository(_)),
        ) => describe_target(object),
        Some(other) => panic!(
            "unsupported audit scope type: {}",
            describe_target(other).object_type
        ),
    }
}

/// Describes the doer or target of an audited change.
#[must_use]
pub fn describe_target(target: &AuditObject) -> TypeDescriptor {
    match target {
        AuditObject::User(user) => {
            TypeDescriptor::new(AuditObjectType::User, user.id, user.name.as_str(), target)
        }
        AuditObject::Organization(organization) => TypeDescriptor::new(
            AuditObjectType::Organization,
            organization.id,
            organization.name.as_str(),
            target,
        ),
        AuditObject::Repository(repository) => TypeDescriptor::new(
            AuditObjectType::Repository,
            repository.id,
            repository.full_name(),
            target,
        ),
        AuditObject::Team(team) => {
            TypeDescriptor::new(AuditObjectType::Team, team.id, team.name.as_str(), target)
        }
        AuditObject::TwoFactor(two_factor) => {
            TypeDescriptor::new(AuditObjectType::TwoFactor, two_factor.id, "", target)
        }
        AuditObject::WebAuthnCredential(credential) => TypeDescriptor::new(
            AuditObjectType::WebAuthnCredential,
            credential.id,
            credential.name.as_str(),
            target,
        ),
        AuditObject::OpenId(open_id) => TypeDescriptor::new(
            AuditObjectType::OpenId,
            open_id.id,
            open_id.uri.as_str(),
            target,
        ),
        AuditObject::AccessToken(token) => TypeDescriptor::new(
            AuditObjectType::AccessToken,
            token.id,
            token.name.as_str(),
            target,
        ),
        AuditObject::OAuth2Application(application) => TypeDescriptor::new(
            AuditObjectType::OAuth2Application,
            application.id,
            application.name.as_str(),
            target,
        ),
        AuditObject::OAuth2Grant(grant) => {
            TypeDescriptor::new(AuditObjectType::OAuth2Grant, grant.id, "", target)
        }
        AuditObject::AuthenticationSource(source) => TypeDescriptor::new(
            AuditObjectType::AuthenticationSource,
            source.id,
            source.name.as_str(),
            target,
        ),
        AuditObject::ExternalLoginUser(login) => TypeDescriptor::new(
            AuditObjectType::ExternalLoginUser,
            AuditPrimaryKey::External(login.external_id.clone()),
            login.external_id.as_str(),
            target,
        ),
        AuditObject::PublicKey(key) => TypeDescriptor::new(
            AuditObjectType::PublicKey,
            key.id,
            key.fingerprint.as_str(),
            target,
        ),
        AuditObject::GpgKey(key) => {
            TypeDescriptor::new(AuditObjectType::GpgKey, key.id, key.key_id.as_str(), target)
        }
        AuditObject::DeployKey(key) => {
            TypeDescriptor::new(AuditObjectType::DeployKey, key.id, key.name.as_str(), target)
        }
        AuditObject::Secret(secret) => {
            TypeDescriptor::new(AuditObjectType::Secret, secret.id, secret.name.as_str(), target)
        }
        AuditObject::Webhook(webhook) => {
            TypeDescriptor::new(AuditObjectType::Webhook, webhook.id, webhook.url.as_str(), target)
        }
        AuditObject::ProtectedTag(tag) => TypeDescriptor::new(
            AuditObjectType::ProtectedTag,
            tag.id,
            tag.name_pattern.as_str(),
            target,
        ),
        AuditObject::ProtectedBranch(branch) => TypeDescriptor::new(
            AuditObjectType::ProtectedBranch,
            branch.id,
            branch.rule_name.as_str(),
            target,
        ),
        AuditObject::PushMirror(mirror) => {
            TypeDescriptor::new(AuditObjectType::PushMirror, mirror.id, "", target)
        }
        AuditObject::RepoTransfer(transfer) => {
            TypeDescriptor::new(AuditObjectType::RepoTransfer, transfer.id, "", target)
        }
        AuditObject::EmailAddress(email) => TypeDescriptor::new(
            AuditObjectType::EmailAddress,
            email.id,
            email.email.as_str(),
            target,
        ),
    }
}

#[cfg(test)]
mod tests;
