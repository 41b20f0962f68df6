use super::*;

fn claims_with(realm: &[&str], client: &[(&str, &[&str])]) -> TokenClaims {
    TokenClaims {
        username: Some("ana".to_owned()),
        realm_roles: realm.iter().map(|r| (*r).to_owned()).collect(),
        client_roles: client
            .iter()
            .map(|(id, roles)| ((*id).to_owned(), roles.iter().map(|r| (*r).to_owned()).collect()))
            .collect(),
    }
}

// =============================================================
// Session writes
// =============================================================

#[test]
fn mark_ready_reports_first_transition_only() {
    let mut session = Session::default();
    assert!(session.mark_ready());
    assert!(!session.mark_ready());
    assert!(session.ready());
}

#[test]
fn clearing_credentials_keeps_ready() {
    let mut session = Session::default();
    session.mark_ready();
    session.set_credentials(true, Some("t".to_owned()), Some(TokenClaims::default()));
    session.clear_credentials();
    assert!(session.ready());
    assert!(!session.authenticated());
}

#[test]
fn authenticated_requires_token_and_claims() {
    let mut session = Session::default();
    session.set_credentials(true, None, Some(TokenClaims::default()));
    assert!(!session.authenticated());

    session.set_credentials(true, Some("t".to_owned()), None);
    assert!(!session.authenticated());

    session.set_credentials(true, Some("t".to_owned()), Some(TokenClaims::default()));
    assert!(session.authenticated());
}

#[test]
fn unauthenticated_write_drops_token() {
    let mut session = Session::default();
    session.set_credentials(true, Some("t".to_owned()), Some(TokenClaims::default()));
    session.set_credentials(false, Some("t".to_owned()), Some(TokenClaims::default()));
    let view = session.view("quarkus-api");
    assert!(!view.authenticated);
    assert_eq!(view.token, None);
    assert_eq!(view.claims, None);
}

// =============================================================
// SessionView predicates
// =============================================================

#[test]
fn client_role_uses_default_client_when_unspecified() {
    let mut session = Session::default();
    session.set_credentials(
        true,
        Some("t".to_owned()),
        Some(claims_with(&[], &[("quarkus-api", &["admin"]), ("other", &["viewer"])])),
    );
    let view = session.view("quarkus-api");
    assert!(view.has_client_role("admin", None));
    assert!(!view.has_client_role("viewer", None));
    assert!(view.has_client_role("viewer", Some("other")));
}

#[test]
fn is_admin_requires_realm_role_and_authentication() {
    let view = SessionView {
        ready: true,
        authenticated: true,
        token: Some("t".to_owned()),
        claims: Some(claims_with(&["admin"], &[])),
        default_client_id: "quarkus-api".to_owned(),
    };
    assert!(view.is_admin("admin"));

    let client_only = SessionView {
        claims: Some(claims_with(&[], &[("quarkus-api", &["admin"])])),
        ..view.clone()
    };
    assert!(!client_only.is_admin("admin"));

    let signed_out = SessionView { authenticated: false, ..view };
    assert!(!signed_out.is_admin("admin"));
}

#[test]
fn default_view_has_no_identity() {
    let view = SessionView::default();
    assert_eq!(view.username(), None);
    assert!(!view.has_realm_role(""));
    assert!(!view.has_client_role("", None));
}
