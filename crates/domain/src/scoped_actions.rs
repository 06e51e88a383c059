use crate::{AuditAction, AuditObject};

/// Action variants for a resource that can be owned by a user, an
/// organization, a repository or the instance itself.
///
/// Secrets, webhooks and OAuth2 applications are audited with a different
/// action depending on where they live; callers pass the same scope they hand
/// to the event builder and get the matching action back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedActions {
    /// Action used when the resource belongs to a user.
    pub user: Option<AuditAction>,
    /// Action used when the resource belongs to an organization.
    pub organization: Option<AuditAction>,
    /// Action used when the resource belongs to a repository.
    pub repository: Option<AuditAction>,
    /// Action used when the resource has no owner.
    pub system: Option<AuditAction>,
}

impl ScopedActions {
    /// Secret added.
    pub const SECRET_ADD: Self = Self {
        user: Some(AuditAction::UserSecretAdd),
        organization: Some(AuditAction::OrganizationSecretAdd),
        repository: Some(AuditAction::RepositorySecretAdd),
        system: None,
    };

    /// Secret updated.
    pub const SECRET_UPDATE: Self = Self {
        user: Some(AuditAction::UserSecretUpdate),
        organization: Some(AuditAction::OrganizationSecretUpdate),
        repository: Some(AuditAction::RepositorySecretUpdate),
        system: None,
    };

    /// Secret removed.
    pub const SECRET_REMOVE: Self = Self {
        user: Some(AuditAction::UserSecretRemove),
        organization: Some(AuditAction::OrganizationSecretRemove),
        repository: Some(AuditAction::RepositorySecretRemove),
        system: None,
    };

    /// Webhook added.
    pub const WEBHOOK_ADD: Self = Self {
        user: Some(AuditAction::UserWebhookAdd),
        organization: Some(AuditAction::OrganizationWebhookAdd),
        repository: Some(AuditAction::RepositoryWebhookAdd),
        system: Some(AuditAction::SystemWebhookAdd),
    };

    /// Webhook updated.
    pub const WEBHOOK_UPDATE: Self = Self {
        user: Some(AuditAction::UserWebhookUpdate),
        organization: Some(AuditAction::OrganizationWebhookUpdate),
        repository: Some(AuditAction::RepositoryWebhookUpdate),
        system: Some(AuditAction::SystemWebhookUpdate),
    };

    /// Webhook removed.
    pub const WEBHOOK_REMOVE: Self = Self {
        user: Some(AuditAction::UserWebhookRemove),
        organization: Some(AuditAction::OrganizationWebhookRemove),
        repository: Some(AuditAction::RepositoryWebhookRemove),
        system: Some(AuditAction::SystemWebhookRemove),
    };

    /// OAuth2 application created.
    pub const OAUTH2_APPLICATION_ADD: Self = Self {
        user: Some(AuditAction::UserOAuth2ApplicationAdd),
        organization: Some(AuditAction::OrganizationOAuth2ApplicationAdd),
        repository: None,
        system: Some(AuditAction::SystemOAuth2ApplicationAdd),
    };

    /// OAuth2 application updated.
    pub const OAUTH2_APPLICATION_UPDATE: Self = Self {
        user: Some(AuditAction::UserOAuth2ApplicationUpdate),
        organization: Some(AuditAction::OrganizationOAuth2ApplicationUpdate),
        repository: None,
        system: Some(AuditAction::SystemOAuth2ApplicationUpdate),
    };

    /// OAuth2 application secret regenerated.
    pub const OAUTH2_APPLICATION_SECRET: Self = Self {
        user: Some(AuditAction::UserOAuth2ApplicationSecret),
        organization: Some(AuditAction::OrganizationOAuth2ApplicationSecret),
        repository: None,
        system: Some(AuditAction::SystemOAuth2ApplicationSecret),
    };

    /// OAuth2 application deleted.
    pub const OAUTH2_APPLICATION_REMOVE: Self = Self {
        user: Some(AuditAction::UserOAuth2ApplicationRemove),
        organization: Some(AuditAction::OrganizationOAuth2ApplicationRemove),
        repository: None,
        system: Some(AuditAction::SystemOAuth2ApplicationRemove),
    };

    /// Picks the action matching the owning scope.
    ///
    /// # Panics
    ///
    /// Panics when the scope is not a user, organization, repository or
    /// absent, or when this resource has no action for that scope. Both are
    /// caller bugs.
    #[must_use]
    pub fn for_scope(&self, scope: Option<&AuditObject>) -> AuditAction {
        let (action, scope_name) = match scope {
            None => (self.system, "system"),
            Some(AuditObject::User(_)) => (self.user, "user"),
            Some(AuditObject::Organization(_)) => (self.organization, "organization"),
            Some(AuditObject::Repository(_)) => (self.repository, "repository"),
            Some(other) => panic!("unsupported audit scope for action selection: {other:?}"),
        };

        match action {
            Some(action) => action,
            None => panic!("no audit action defined for {scope_name} scope"),
        }
    }
}
