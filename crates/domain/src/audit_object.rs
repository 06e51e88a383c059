//! Entity references that can appear in audit events.
//!
//! These are the projections callers already hold when they audit a change;
//! the audit subsystem only reads them.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Entity kind tag stored with every resolved audit descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditObjectType {
    /// Instance-level scope used when an action has no owning entity.
    #[serde(rename = "system")]
    System,
    /// User account.
    #[serde(rename = "user")]
    User,
    /// Organization account.
    #[serde(rename = "organization")]
    Organization,
    /// Repository.
    #[serde(rename = "repository")]
    Repository,
    /// Organization team.
    #[serde(rename = "team")]
    Team,
    /// Two-factor enrollment.
    #[serde(rename = "twofactor")]
    TwoFactor,
    /// WebAuthn credential.
    #[serde(rename = "webauthn")]
    WebAuthnCredential,
    /// OpenID URI linked to a user.
    #[serde(rename = "openid")]
    OpenId,
    /// Personal access token.
    #[serde(rename = "access_token")]
    AccessToken,
    /// OAuth2 application.
    #[serde(rename = "oauth2_application")]
    OAuth2Application,
    /// OAuth2 grant issued by a user.
    #[serde(rename = "oauth2_grant")]
    OAuth2Grant,
    /// Authentication source.
    #[serde(rename = "authentication_source")]
    AuthenticationSource,
    /// External login linked to a user.
    #[serde(rename = "external_login_user")]
    ExternalLoginUser,
    /// SSH public key or principal.
    #[serde(rename = "public_key")]
    PublicKey,
    /// GPG key.
    #[serde(rename = "gpg_key")]
    GpgKey,
    /// Repository deploy key.
    #[serde(rename = "deploy_key")]
    DeployKey,
    /// Actions secret.
    #[serde(rename = "secret")]
    Secret,
    /// Webhook.
    #[serde(rename = "webhook")]
    Webhook,
    /// Tag protection rule.
    #[serde(rename = "protected_tag")]
    ProtectedTag,
    /// Branch protection rule.
    #[serde(rename = "protected_branch")]
    ProtectedBranch,
    /// Push mirror.
    #[serde(rename = "push_mirror")]
    PushMirror,
    /// Pending repository transfer.
    #[serde(rename = "repo_transfer")]
    RepoTransfer,
    /// Email address of a user.
    #[serde(rename = "email_address")]
    EmailAddress,
}

impl AuditObjectType {
    /// Returns a stable storage value for this entity kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Organization => "organization",
            Self::Repository => "repository",
            Self::Team => "team",
            Self::TwoFactor => "twofactor",
            Self::WebAuthnCredential => "webauthn",
            Self::OpenId => "openid",
            Self::AccessToken => "access_token",
            Self::OAuth2Application => "oauth2_application",
            Self::OAuth2Grant => "oauth2_grant",
            Self::AuthenticationSource => "authentication_source",
            Self::ExternalLoginUser => "external_login_user",
            Self::PublicKey => "public_key",
            Self::GpgKey => "gpg_key",
            Self::DeployKey => "deploy_key",
            Self::Secret => "secret",
            Self::Webhook => "webhook",
            Self::ProtectedTag => "protected_tag",
            Self::ProtectedBranch => "protected_branch",
            Self::PushMirror => "push_mirror",
            Self::RepoTransfer => "repo_transfer",
            Self::EmailAddress => "email_address",
        }
    }
}

impl Display for AuditObjectType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Primary key of an audited entity.
///
/// Almost every entity is keyed by a numeric row identifier; external logins
/// are keyed by the identity provider's opaque id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditPrimaryKey {
    /// Numeric row identifier.
    Id(i64),
    /// Opaque identifier issued by an external system.
    External(String),
}

impl Display for AuditPrimaryKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(formatter, "{id}"),
            Self::External(id) => formatter.write_str(id),
        }
    }
}

impl From<i64> for AuditPrimaryKey {
    fn from(value: i64) -> Self {
        Self::Id(value)
    }
}

/// User account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row identifier.
    pub id: i64,
    /// Login name.
    pub name: String,
}

/// Organization account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Row identifier.
    pub id: i64,
    /// Organization name.
    pub name: String,
}

/// Repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Row identifier.
    pub id: i64,
    /// Repository name without owner.
    pub name: String,
    /// Name of the owning user or organization.
    pub owner_name: String,
}

impl Repository {
    /// Returns `owner/name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner_name, self.name)
    }
}

/// Organization team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Row identifier.
    pub id: i64,
    /// Team name.
    pub name: String,
}

/// Two-factor enrollment of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactor {
    /// Row identifier.
    pub id: i64,
}

/// WebAuthn credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAuthnCredential {
    /// Row identifier.
    pub id: i64,
    /// User-chosen credential label.
    pub name: String,
}

/// OpenID URI linked to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOpenId {
    /// Row identifier.
    pub id: i64,
    /// OpenID URI.
    pub uri: String,
}

/// Personal access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Row identifier.
    pub id: i64,
    /// Token label.
    pub name: String,
}

/// OAuth2 application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Application {
    /// Row identifier.
    pub id: i64,
    /// Application name.
    pub name: String,
}

/// OAuth2 grant issued by a user to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Grant {
    /// Row identifier.
    pub id: i64,
}

/// Authentication source (LDAP, OAuth2 provider, SMTP, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationSource {
    /// Row identifier.
    pub id: i64,
    /// Source name.
    pub name: String,
}

/// External login linked to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLoginUser {
    /// Identifier issued by the external provider.
    pub external_id: String,
    /// Authentication source that issued the identifier.
    pub login_source_id: i64,
}

/// SSH public key or principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Row identifier.
    pub id: i64,
    /// Key fingerprint.
    pub fingerprint: String,
}

/// GPG key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpgKey {
    /// Row identifier.
    pub id: i64,
    /// Long key id.
    pub key_id: String,
}

/// Repository deploy key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployKey {
    /// Row identifier.
    pub id: i64,
    /// Key title.
    pub name: String,
}

/// Actions secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Row identifier.
    pub id: i64,
    /// Secret name.
    pub name: String,
}

/// Webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Row identifier.
    pub id: i64,
    /// Delivery URL.
    pub url: String,
}

/// Tag protection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedTag {
    /// Row identifier.
    pub id: i64,
    /// Glob or regex pattern matched against tag names.
    pub name_pattern: String,
}

/// Branch protection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedBranch {
    /// Row identifier.
    pub id: i64,
    /// Rule name or branch pattern.
    pub rule_name: String,
}

/// Push mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMirror {
    /// Row identifier.
    pub id: i64,
}

/// Pending repository transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTransfer {
    /// Row identifier.
    pub id: i64,
}

/// Email address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmailAddress {
    /// Row identifier.
    pub id: i64,
    /// Email address.
    pub email: String,
}

macro_rules! audit_objects {
    ($($(#[$meta:meta])* $variant:ident($entity:ty),)+) => {
        /// Any entity that can be referenced as doer, scope or target of an audit event.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
        pub enum AuditObject {
            $($(#[$meta])* $variant($entity),)+
        }

        $(
            impl From<$entity> for AuditObject {
                fn from(value: $entity) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

audit_objects! {
    /// User account reference.
    User(User),
    /// Organization reference.
    Organization(Organization),
    /// Repository reference.
    Repository(Repository),
    /// Team reference.
    Team(Team),
    /// Two-factor enrollment reference.
    TwoFactor(TwoFactor),
    /// WebAuthn credential reference.
    WebAuthnCredential(WebAuthnCredential),
    /// OpenID URI reference.
    OpenId(UserOpenId),
    /// Access token reference.
    AccessToken(AccessToken),
    /// OAuth2 application reference.
    OAuth2Application(OAuth2Application),
    /// OAuth2 grant reference.
    OAuth2Grant(OAuth2Grant),
    /// Authentication source reference.
    AuthenticationSource(AuthenticationSource),
    /// External login reference.
    ExternalLoginUser(ExternalLoginUser),
    /// SSH key reference.
    PublicKey(PublicKey),
    /// GPG key reference.
    GpgKey(GpgKey),
    /// Deploy key reference.
    DeployKey(DeployKey),
    /// Secret reference.
    Secret(Secret),
    /// Webhook reference.
    Webhook(Webhook),
    /// Tag protection rule reference.
    ProtectedTag(ProtectedTag),
    /// Branch protection rule reference.
    ProtectedBranch(ProtectedBranch),
    /// Push mirror reference.
    PushMirror(PushMirror),
    /// Repository transfer reference.
    RepoTransfer(RepoTransfer),
    /// Email address reference.
    EmailAddress(UserEmailAddress),
}
