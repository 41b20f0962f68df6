use super::*;

fn keycloak_payload() -> serde_json::Value {
    serde_json::json!({
        "exp": 1_900_000_000,
        "preferred_username": "ana@cinema.test",
        "realm_access": { "roles": ["admin", "offline_access"] },
        "resource_access": {
            "quarkus-api": { "roles": ["movies.write"] },
            "account": { "roles": ["manage-account"] }
        }
    })
}

#[test]
fn from_payload_reads_username_and_roles() {
    let claims = TokenClaims::from_payload(&keycloak_payload()).unwrap();
    assert_eq!(claims.username.as_deref(), Some("ana@cinema.test"));
    assert!(claims.has_realm_role("admin"));
    assert!(claims.has_realm_role("offline_access"));
    assert!(claims.has_client_role("movies.write", "quarkus-api"));
    assert!(claims.has_client_role("manage-account", "account"));
}

#[test]
fn from_payload_tolerates_missing_role_sections() {
    let claims = TokenClaims::from_payload(&serde_json::json!({ "sub": "u-1" })).unwrap();
    assert_eq!(claims.username, None);
    assert!(claims.realm_roles.is_empty());
    assert!(claims.client_roles.is_empty());
}

#[test]
fn realm_and_client_scopes_do_not_leak_into_each_other() {
    let claims = TokenClaims::from_payload(&keycloak_payload()).unwrap();
    assert!(!claims.has_client_role("admin", "quarkus-api"));
    assert!(!claims.has_realm_role("movies.write"));
    assert!(!claims.has_client_role("movies.write", "account"));
}

#[test]
fn from_json_rejects_malformed_payload() {
    assert!(matches!(TokenClaims::from_json("{"), Err(SessionError::Initialize(_))));
    assert!(matches!(
        TokenClaims::from_json(r#"{"realm_access":{"roles":"admin"}}"#),
        Err(SessionError::Initialize(_))
    ));
}

#[test]
fn absent_claims_hold_no_role() {
    for role in ["", "admin", "Customer", "movies.write"] {
        assert!(!has_realm_role(None, role));
        assert!(!has_client_role(None, role, "quarkus-api"));
        assert!(!has_client_role(None, role, ""));
    }
}

#[test]
fn empty_role_string_is_never_granted_by_empty_claims() {
    let claims = TokenClaims::default();
    assert!(!has_realm_role(Some(&claims), ""));
    assert!(!has_client_role(Some(&claims), "", "quarkus-api"));
}
