use std::panic::catch_unwind;

use tessera_domain::{
    AccessToken, AuditObject, AuditObjectType, AuditPrimaryKey, AuthenticationSource, DeployKey,
    ExternalLoginUser, GpgKey, OAuth2Application, OAuth2Grant, Organization, ProtectedBranch,
    ProtectedTag, PublicKey, PushMirror, RepoTransfer, Repository, Secret, Team, TwoFactor, User,
    UserEmailAddress, UserOpenId, WebAuthnCredential, Webhook,
};

use super::{TypeDescriptor, describe_scope, describe_target};

fn test_user() -> AuditObject {
    AuditObject::from(User {
        id: 1,
        name: "TestUser".to_owned(),
    })
}

fn test_organization() -> AuditObject {
    AuditObject::from(Organization {
        id: 2,
        name: "TestOrg".to_owned(),
    })
}

fn test_repository() -> AuditObject {
    AuditObject::from(Repository {
        id: 3,
        name: "TestRepo".to_owned(),
        owner_name: "TestUser".to_owned(),
    })
}

fn expected(
    object_type: AuditObjectType,
    primary_key: i64,
    friendly_name: &str,
    target: &AuditObject,
) -> TypeDescriptor {
    TypeDescriptor {
        object_type,
        primary_key: AuditPrimaryKey::Id(primary_key),
        friendly_name: friendly_name.to_owned(),
        target: Some(target.clone()),
    }
}

#[test]
fn absent_scope_is_system() {
    let descriptor = describe_scope(None);

    assert_eq!(
        descriptor,
        TypeDescriptor {
            object_type: AuditObjectType::System,
            primary_key: AuditPrimaryKey::Id(0),
            friendly_name: "System".to_owned(),
            target: None,
        }
    );
}

#[test]
fn owning_entities_resolve_as_scope() {
    let cases = [
        (test_user(), AuditObjectType::User, 1, "TestUser"),
        (test_organization(), AuditObjectType::Organization, 2, "TestOrg"),
        (
            test_repository(),
            AuditObjectType::Repository,
            3,
            "TestUser/TestRepo",
        ),
    ];

    for (scope, object_type, primary_key, friendly_name) in cases {
        assert_eq!(
            describe_scope(Some(&scope)),
            expected(object_type, primary_key, friendly_name, &scope),
            "unexpected descriptor for scope {scope:?}"
        );
    }
}

#[test]
#[should_panic(expected = "unsupported audit scope type: team")]
fn team_is_not_a_scope() {
    let team = AuditObject::from(Team {
        id: 345,
        name: "Repo345".to_owned(),
    });
    let _ = describe_scope(Some(&team));
}

#[test]
fn every_non_owning_entity_is_rejected_as_scope() {
    let ineligible = [
        AuditObject::from(TwoFactor { id: 5 }),
        AuditObject::from(OAuth2Grant { id: 10 }),
        AuditObject::from(Secret {
            id: 15,
            name: "TestSecret".to_owned(),
        }),
        AuditObject::from(PushMirror { id: 19 }),
        AuditObject::from(ExternalLoginUser {
            external_id: "12".to_owned(),
            login_source_id: 11,
        }),
    ];

    for scope in ineligible {
        let result = catch_unwind(|| describe_scope(Some(&scope)));
        assert!(result.is_err(), "scope {scope:?} should be rejected");
    }
}

#[test]
fn every_entity_kind_resolves_as_target() {
    let cases = [
        (test_user(), AuditObjectType::User, 1, "TestUser"),
        (test_organization(), AuditObjectType::Organization, 2, "TestOrg"),
        (
            AuditObject::from(UserEmailAddress {
                id: 3,
                email: "user@example.com".to_owned(),
            }),
            AuditObjectType::EmailAddress,
            3,
            "user@example.com",
        ),
        (
            test_repository(),
            AuditObjectType::Repository,
            3,
            "TestUser/TestRepo",
        ),
        (
            AuditObject::from(Team {
                id: 4,
                name: "TestTeam".to_owned(),
            }),
            AuditObjectType::Team,
            4,
            "TestTeam",
        ),
        (
            AuditObject::from(TwoFactor { id: 5 }),
            AuditObjectType::TwoFactor,
            5,
            "",
        ),
        (
            AuditObject::from(WebAuthnCredential {
                id: 6,
                name: "TestCredential".to_owned(),
            }),
            AuditObjectType::WebAuthnCredential,
            6,
            "TestCredential",
        ),
        (
            AuditObject::from(UserOpenId {
                id: 7,
                uri: "test://uri".to_owned(),
            }),
            AuditObjectType::OpenId,
            7,
            "test://uri",
        ),
        (
            AuditObject::from(AccessToken {
                id: 8,
                name: "TestToken".to_owned(),
            }),
            AuditObjectType::AccessToken,
            8,
            "TestToken",
        ),
        (
            AuditObject::from(OAuth2Application {
                id: 9,
                name: "TestOAuth2Application".to_owned(),
            }),
            AuditObjectType::OAuth2Application,
            9,
            "TestOAuth2Application",
        ),
        (
            AuditObject::from(OAuth2Grant { id: 10 }),
            AuditObjectType::OAuth2Grant,
            10,
            "",
        ),
        (
            AuditObject::from(AuthenticationSource {
                id: 11,
                name: "TestSource".to_owned(),
            }),
            AuditObjectType::AuthenticationSource,
            11,
            "TestSource",
        ),
        (
            AuditObject::from(PublicKey {
                id: 13,
                fingerprint: "TestPublicKey".to_owned(),
            }),
            AuditObjectType::PublicKey,
            13,
            "TestPublicKey",
        ),
        (
            AuditObject::from(GpgKey {
                id: 14,
                key_id: "TestGPGKey".to_owned(),
            }),
            AuditObjectType::GpgKey,
            14,
            "TestGPGKey",
        ),
        (
            AuditObject::from(Secret {
                id: 15,
                name: "TestSecret".to_owned(),
            }),
            AuditObjectType::Secret,
            15,
            "TestSecret",
        ),
        (
            AuditObject::from(Webhook {
                id: 16,
                url: "test://webhook".to_owned(),
            }),
            AuditObjectType::Webhook,
            16,
            "test://webhook",
        ),
        (
            AuditObject::from(ProtectedTag {
                id: 17,
                name_pattern: "TestProtectedTag".to_owned(),
            }),
            AuditObjectType::ProtectedTag,
            17,
            "TestProtectedTag",
        ),
        (
            AuditObject::from(ProtectedBranch {
                id: 18,
                rule_name: "TestProtectedBranch".to_owned(),
            }),
            AuditObjectType::ProtectedBranch,
            18,
            "TestProtectedBranch",
        ),
        (
            AuditObject::from(PushMirror { id: 19 }),
            AuditObjectType::PushMirror,
            19,
            "",
        ),
        (
            AuditObject::from(RepoTransfer { id: 20 }),
            AuditObjectType::RepoTransfer,
            20,
            "",
        ),
        (
            AuditObject::from(DeployKey {
                id: 21,
                name: "TestDeployKey".to_owned(),
            }),
            AuditObjectType::DeployKey,
            21,
            "TestDeployKey",
        ),
    ];

    for (target, object_type, primary_key, friendly_name) in cases {
        assert_eq!(
            describe_target(&target),
            expected(object_type, primary_key, friendly_name, &target),
            "unexpected descriptor for target {target:?}"
        );
    }
}

#[test]
fn external_login_is_keyed_by_external_id() {
    let login = AuditObject::from(ExternalLoginUser {
        external_id: "12".to_owned(),
        login_source_id: 11,
    });

    assert_eq!(
        describe_target(&login),
        TypeDescriptor {
            object_type: AuditObjectType::ExternalLoginUser,
            primary_key: AuditPrimaryKey::External("12".to_owned()),
            friendly_name: "12".to_owned(),
            target: Some(login.clone()),
        }
    );
}
