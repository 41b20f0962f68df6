use super::*;

// =============================================================
// Movie
// =============================================================

#[test]
fn movie_reads_flask_payload() {
    let movie: Movie =
        serde_json::from_str(r#"{"id": 3, "title": "Alien", "genre": "Sci-Fi", "duration": 117}"#).unwrap();
    assert_eq!(
        movie,
        Movie { id: 3, title: "Alien".to_owned(), genre: "Sci-Fi".to_owned(), duration: 117 }
    );
}

#[test]
fn movie_accepts_integral_floats_and_string_ids() {
    let movie: Movie =
        serde_json::from_str(r#"{"id": "8", "title": "Heat", "genre": "Crime", "duration": 170.0}"#).unwrap();
    assert_eq!(movie.id, 8);
    assert_eq!(movie.duration, 170);
}

#[test]
fn movie_rejects_negative_or_fractional_duration() {
    assert!(serde_json::from_str::<Movie>(r#"{"id": 1, "title": "a", "genre": "b", "duration": -5}"#).is_err());
    assert!(serde_json::from_str::<Movie>(r#"{"id": 1, "title": "a", "genre": "b", "duration": 1.5}"#).is_err());
}

#[test]
fn draft_copies_editable_fields() {
    let movie = Movie { id: 4, title: "Up".to_owned(), genre: "Animation".to_owned(), duration: 96 };
    assert_eq!(
        MovieDraft::from(&movie),
        MovieDraft { title: "Up".to_owned(), genre: "Animation".to_owned(), duration: 96 }
    );
}

// =============================================================
// ManagedUser
// =============================================================

#[test]
fn managed_user_reads_keycloak_representation() {
    let user: ManagedUser = serde_json::from_str(
        r#"{"id":"u1","username":"ana","email":"ana@cinema.test","firstName":"Ana","enabled":true,"realmRoles":["Customer","offline_access"]}"#,
    )
    .unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Ana"));
    assert_eq!(user.last_name, None);
    assert!(user.enabled);
    assert!(user.has_realm_role("Customer"));
    assert!(!user.has_realm_role("admin"));
}

#[test]
fn list_entry_without_roles_has_no_roles() {
    let user: ManagedUser = serde_json::from_str(r#"{"id":"u2","username":"bo"}"#).unwrap();
    assert_eq!(user.realm_roles, None);
    assert!(!user.enabled);
    assert!(!user.has_realm_role("admin"));
}

#[test]
fn merge_prefers_detail_and_keeps_list_only_fields() {
    let listed = ManagedUser {
        id: "u1".to_owned(),
        username: Some("ana".to_owned()),
        email: Some("ana@cinema.test".to_owned()),
        enabled: true,
        ..ManagedUser::default()
    };
    let detail = ManagedUser {
        id: "u1".to_owned(),
        username: None,
        email: Some("ana@new.test".to_owned()),
        enabled: false,
        realm_roles: Some(vec!["admin".to_owned()]),
        ..ManagedUser::default()
    };

    let merged = listed.merge(detail);

    assert_eq!(merged.username.as_deref(), Some("ana"));
    assert_eq!(merged.email.as_deref(), Some("ana@new.test"));
    assert!(!merged.enabled);
    assert!(merged.has_realm_role("admin"));
}

#[test]
fn new_user_serializes_expected_body() {
    let body = serde_json::to_value(NewUser {
        username: "ana".to_owned(),
        email: "ana@cinema.test".to_owned(),
        password: "s3cret".to_owned(),
    })
    .unwrap();
    assert_eq!(body, serde_json::json!({"username":"ana","email":"ana@cinema.test","password":"s3cret"}));
}
