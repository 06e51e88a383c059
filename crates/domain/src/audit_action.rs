use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tessera_core::AppError;

macro_rules! audit_actions {
    ($($(#[$meta:meta])* $variant:ident => $value:literal,)+) => {
        /// Stable audit actions emitted by application use-cases.
        ///
        /// Storage values are persisted indefinitely and compared by equality,
        /// so variants are append-only: never rename or reuse a value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum AuditAction {
            $($(#[$meta])* $variant,)+
        }

        impl AuditAction {
            /// Returns a stable storage value for this action.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// Returns all known actions in declaration order.
            #[must_use]
            pub fn all() -> &'static [Self] {
                const ALL: &[AuditAction] = &[$(AuditAction::$variant,)+];

                ALL
            }
        }
    };
}

audit_actions! {
    /// An administrator signed in as another user.
    UserImpersonation => "user:impersonation",
    /// A user account was created.
    UserCreate => "user:create",
    /// User settings were updated.
    UserUpdate => "user:update",
    /// A user account was deleted.
    UserDelete => "user:delete",
    /// A sign-in failed the second factor check.
    UserAuthenticationFailTwoFactor => "user:authentication:fail:twofactor",
    /// The authentication source of a user changed.
    UserAuthenticationSource => "user:authentication:source",
    /// A user account was activated or deactivated.
    UserActive => "user:active",
    /// A user account was restricted or unrestricted.
    UserRestricted => "user:restricted",
    /// Administrator privileges of a user changed.
    UserAdmin => "user:admin",
    /// A user was renamed.
    UserName => "user:name",
    /// A user changed their password.
    UserPassword => "user:password",
    /// A user password was reset.
    UserPasswordReset => "user:password:reset",
    /// Profile visibility of a user changed.
    UserVisibility => "user:visibility",
    /// The primary email address of a user changed.
    UserEmailPrimaryChange => "user:email:primary",
    /// An email address was added to a user.
    UserEmailAdd => "user:email:add",
    /// An email address was activated.
    UserEmailActivate => "user:email:activate",
    /// An email address was removed from a user.
    UserEmailRemove => "user:email:remove",
    /// Two-factor authentication was enabled.
    UserTwoFactorEnable => "user:twofactor:enable",
    /// Two-factor scratch token was regenerated.
    UserTwoFactorRegenerate => "user:twofactor:regenerate",
    /// Two-factor authentication was disabled.
    UserTwoFactorDisable => "user:twofactor:disable",
    /// A WebAuthn credential was registered.
    UserWebAuthAdd => "user:webauth:add",
    /// A WebAuthn credential was removed.
    UserWebAuthRemove => "user:webauth:remove",
    /// An external login was linked.
    UserExternalLoginAdd => "user:externallogin:add",
    /// An external login was unlinked.
    UserExternalLoginRemove => "user:externallogin:remove",
    /// An OpenID URI was added.
    UserOpenIdAdd => "user:openid:add",
    /// An OpenID URI was removed.
    UserOpenIdRemove => "user:openid:remove",
    /// A personal access token was created.
    UserAccessTokenAdd => "user:accesstoken:add",
    /// A personal access token was deleted.
    UserAccessTokenRemove => "user:accesstoken:remove",
    /// A user OAuth2 application was created.
    UserOAuth2ApplicationAdd => "user:oauth2application:add",
    /// A user OAuth2 application was updated.
    UserOAuth2ApplicationUpdate => "user:oauth2application:update",
    /// A user OAuth2 application secret was regenerated.
    UserOAuth2ApplicationSecret => "user:oauth2application:secret",
    /// A user granted access to an OAuth2 application.
    UserOAuth2ApplicationGrant => "user:oauth2application:grant",
    /// A user revoked an OAuth2 application grant.
    UserOAuth2ApplicationRevoke => "user:oauth2application:revoke",
    /// A user OAuth2 application was deleted.
    UserOAuth2ApplicationRemove => "user:oauth2application:remove",
    /// An SSH key was added.
    UserKeySshAdd => "user:key:ssh:add",
    /// An SSH key was removed.
    UserKeySshRemove => "user:key:ssh:remove",
    /// An SSH principal was added.
    UserKeyPrincipalAdd => "user:key:principal:add",
    /// An SSH principal was removed.
    UserKeyPrincipalRemove => "user:key:principal:remove",
    /// A GPG key was added.
    UserKeyGpgAdd => "user:key:gpg:add",
    /// A GPG key was removed.
    UserKeyGpgRemove => "user:key:gpg:remove",
    /// A user secret was added.
    UserSecretAdd => "user:secret:add",
    /// A user secret was updated.
    UserSecretUpdate => "user:secret:update",
    /// A user secret was removed.
    UserSecretRemove => "user:secret:remove",
    /// A user webhook was added.
    UserWebhookAdd => "user:webhook:add",
    /// A user webhook was updated.
    UserWebhookUpdate => "user:webhook:update",
    /// A user webhook was removed.
    UserWebhookRemove => "user:webhook:remove",

    /// An organization was created.
    OrganizationCreate => "organization:create",
    /// Organization settings were updated.
    OrganizationUpdate => "organization:update",
    /// An organization was deleted.
    OrganizationDelete => "organization:delete",
    /// An organization was renamed.
    OrganizationName => "organization:name",
    /// Organization visibility changed.
    OrganizationVisibility => "organization:visibility",
    /// A team was created.
    OrganizationTeamAdd => "organization:team:add",
    /// A team was updated.
    OrganizationTeamUpdate => "organization:team:update",
    /// A team was deleted.
    OrganizationTeamRemove => "organization:team:remove",
    /// Team permissions changed.
    OrganizationTeamPermission => "organization:team:permission",
    /// A member joined a team.
    OrganizationTeamMemberAdd => "organization:team:member:add",
    /// A member left a team.
    OrganizationTeamMemberRemove => "organization:team:member:remove",
    /// An organization OAuth2 application was created.
    OrganizationOAuth2ApplicationAdd => "organization:oauth2application:add",
    /// An organization OAuth2 application was updated.
    OrganizationOAuth2ApplicationUpdate => "organization:oauth2application:update",
    /// An organization OAuth2 application secret was regenerated.
    OrganizationOAuth2ApplicationSecret => "organization:oauth2application:secret",
    /// An organization OAuth2 application was deleted.
    OrganizationOAuth2ApplicationRemove => "organization:oauth2application:remove",
    /// An organization secret was added.
    OrganizationSecretAdd => "organization:secret:add",
    /// An organization secret was updated.
    OrganizationSecretUpdate => "organization:secret:update",
    /// An organization secret was removed.
    OrganizationSecretRemove => "organization:secret:remove",
    /// An organization webhook was added.
    OrganizationWebhookAdd => "organization:webhook:add",
    /// An organization webhook was updated.
    OrganizationWebhookUpdate => "organization:webhook:update",
    /// An organization webhook was removed.
    OrganizationWebhookRemove => "organization:webhook:remove",

    /// A repository was created.
    RepositoryCreate => "repository:create",
    /// A repository was forked.
    RepositoryCreateFork => "repository:create:fork",
    /// Repository settings were updated.
    RepositoryUpdate => "repository:update",
    /// A repository was archived.
    RepositoryArchive => "repository:archive",
    /// A repository was unarchived.
    RepositoryUnarchive => "repository:unarchive",
    /// A repository was deleted.
    RepositoryDelete => "repository:delete",
    /// A repository was renamed.
    RepositoryName => "repository:name",
    /// Repository visibility changed.
    RepositoryVisibility => "repository:visibility",
    /// A fork was converted to a regular repository.
    RepositoryConvertFork => "repository:convert:fork",
    /// A mirror was converted to a regular repository.
    RepositoryConvertMirror => "repository:convert:mirror",
    /// A push mirror was added.
    RepositoryMirrorPushAdd => "repository:mirror:push:add",
    /// A push mirror was removed.
    RepositoryMirrorPushRemove => "repository:mirror:push:remove",
    /// Signing verification settings changed.
    RepositorySigningVerification => "repository:signingverification",
    /// A repository transfer was started.
    RepositoryTransferStart => "repository:transfer:start",
    /// A repository transfer was accepted.
    RepositoryTransferAccept => "repository:transfer:accept",
    /// A repository transfer was rejected.
    RepositoryTransferReject => "repository:transfer:reject",
    /// The repository wiki was deleted.
    RepositoryWikiDelete => "repository:wiki:delete",
    /// A collaborator was added.
    RepositoryCollaboratorAdd => "repository:collaborator:add",
    /// Collaborator access mode changed.
    RepositoryCollaboratorAccess => "repository:collaborator:access",
    /// A collaborator was removed.
    RepositoryCollaboratorRemove => "repository:collaborator:remove",
    /// A team was granted repository access.
    RepositoryCollaboratorTeamAdd => "repository:collaborator:team:add",
    /// A team lost repository access.
    RepositoryCollaboratorTeamRemove => "repository:collaborator:team:remove",
    /// The default branch changed.
    RepositoryBranchDefault => "repository:branch:default",
    /// A branch protection rule was added.
    RepositoryBranchProtectionAdd => "repository:branch:protection:add",
    /// A branch protection rule was updated.
    RepositoryBranchProtectionUpdate => "repository:branch:protection:update",
    /// A branch protection rule was removed.
    RepositoryBranchProtectionRemove => "repository:branch:protection:remove",
    /// A tag protection rule was added.
    RepositoryTagProtectionAdd => "repository:tag:protection:add",
    /// A tag protection rule was updated.
    RepositoryTagProtectionUpdate => "repository:tag:protection:update",
    /// A tag protection rule was removed.
    RepositoryTagProtectionRemove => "repository:tag:protection:remove",
    /// A repository webhook was added.
    RepositoryWebhookAdd => "repository:webhook:add",
    /// A repository webhook was updated.
    RepositoryWebhookUpdate => "repository:webhook:update",
    /// A repository webhook was removed.
    RepositoryWebhookRemove => "repository:webhook:remove",
    /// A deploy key was added.
    RepositoryDeployKeyAdd => "repository:deploykey:add",
    /// A deploy key was removed.
    RepositoryDeployKeyRemove => "repository:deploykey:remove",
    /// A repository secret was added.
    RepositorySecretAdd => "repository:secret:add",
    /// A repository secret was updated.
    RepositorySecretUpdate => "repository:secret:update",
    /// A repository secret was removed.
    RepositorySecretRemove => "repository:secret:remove",

    /// A system webhook was added.
    SystemWebhookAdd => "system:webhook:add",
    /// A system webhook was updated.
    SystemWebhookUpdate => "system:webhook:update",
    /// A system webhook was removed.
    SystemWebhookRemove => "system:webhook:remove",
    /// An authentication source was added.
    SystemAuthenticationSourceAdd => "system:authenticationsource:add",
    /// An authentication source was updated.
    SystemAuthenticationSourceUpdate => "system:authenticationsource:update",
    /// An authentication source was removed.
    SystemAuthenticationSourceRemove => "system:authenticationsource:remove",
    /// An instance-wide OAuth2 application was created.
    SystemOAuth2ApplicationAdd => "system:oauth2application:add",
    /// An instance-wide OAuth2 application was updated.
    SystemOAuth2ApplicationUpdate => "system:oauth2application:update",
    /// An instance-wide OAuth2 application secret was regenerated.
    SystemOAuth2ApplicationSecret => "system:oauth2application:secret",
    /// An instance-wide OAuth2 application was deleted.
    SystemOAuth2ApplicationRemove => "system:oauth2application:remove",
}

impl AuditAction {
    /// Returns the top-level namespace segment, e.g. `repository`.
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        let value = self.as_str();
        value.split_once(':').map_or(value, |(namespace, _)| namespace)
    }

    /// Returns whether the action lives under the provided colon-separated prefix.
    ///
    /// Matching is segment-aware: `repository:mirror` matches
    /// `repository:mirror:push:add` but not `repository:mirrors:x`.
    #[must_use]
    pub fn belongs_to(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_end_matches(':');
        if prefix.is_empty() {
            return false;
        }

        let value = self.as_str();
        value == prefix
            || value
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(':'))
    }

    /// Returns all actions under the provided prefix.
    pub fn in_namespace(prefix: &str) -> impl Iterator<Item = Self> + '_ {
        Self::all()
            .iter()
            .copied()
            .filter(move |action| action.belongs_to(prefix))
    }
}

impl Display for AuditAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown audit action value '{value}'")))
    }
}

impl TryFrom<String> for AuditAction {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<AuditAction> for String {
    fn from(value: AuditAction) -> Self {
        value.as_str().to_owned()
    }
}
