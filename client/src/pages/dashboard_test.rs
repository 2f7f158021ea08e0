use metro_session::UserRecord;

use super::*;

fn signed_in(display_name: &str, role: &str) -> AuthState {
    AuthState::Authenticated(UserRecord {
        id: "1".to_owned(),
        username: "admin".to_owned(),
        display_name: display_name.to_owned(),
        role: role.to_owned(),
        email: None,
    })
}

#[test]
fn greeting_uses_display_name_and_role() {
    assert_eq!(greeting(&signed_in("Administrador", "admin")), "Welcome, Administrador (admin)");
}

#[test]
fn greeting_falls_back_to_username_without_role() {
    assert_eq!(greeting(&signed_in("", "")), "Welcome, admin");
}

#[test]
fn greeting_is_empty_without_user() {
    assert_eq!(greeting(&AuthState::Loading), "");
}
