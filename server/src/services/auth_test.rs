use std::io::Write as _;

use super::*;

const DIRECTORY: &str = r#"
users:
  - id: "1"
    username: admin
    display_name: Administrador
    role: admin
    password_sha256: 8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918
  - id: "2"
    username: " operador "
    display_name: Operador de Turno
    role: operador
    email: turno@metro.local
    password_sha256: "5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8"
"#;

// =============================================================================
// bytes_to_hex / hash_password
// =============================================================================

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
}

#[test]
fn hash_password_known_vector() {
    assert_eq!(hash_password("admin"), DEMO_PASSWORD_SHA256);
    assert_eq!(
        hash_password("password"),
        "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
    );
}

#[test]
fn constant_time_eq_compares_contents_and_length() {
    assert!(constant_time_eq(b"abc", b"abc"));
    assert!(!constant_time_eq(b"abc", b"abd"));
    assert!(!constant_time_eq(b"abc", b"abcd"));
}

// =============================================================================
// UserDirectory
// =============================================================================

#[test]
fn demo_directory_accepts_admin_admin() {
    let directory = UserDirectory::demo();
    let user = directory.authenticate("admin", "admin").unwrap();
    assert_eq!(user.id, "1");
    assert_eq!(user.role, "admin");
}

#[test]
fn demo_directory_rejects_wrong_password() {
    assert!(UserDirectory::demo().authenticate("admin", "nope").is_none());
}

#[test]
fn unknown_user_is_rejected() {
    assert!(UserDirectory::demo().authenticate("ghost", "admin").is_none());
}

#[test]
fn load_without_path_is_demo() {
    let directory = UserDirectory::load(None).unwrap();
    assert_eq!(directory.len(), 1);
}

#[test]
fn from_yaml_parses_entries() {
    let directory = UserDirectory::from_yaml(DIRECTORY).unwrap();
    assert_eq!(directory.len(), 2);
    let user = directory.authenticate("operador", "password").unwrap();
    assert_eq!(user.username, "operador");
    assert_eq!(user.display_name, "Operador de Turno");
    assert_eq!(user.email.as_deref(), Some("turno@metro.local"));
}

#[test]
fn authenticate_trims_username() {
    let directory = UserDirectory::from_yaml(DIRECTORY).unwrap();
    assert!(directory.authenticate("  admin ", "admin").is_some());
}

#[test]
fn from_yaml_rejects_duplicates() {
    let raw = r#"
users:
  - { id: "1", username: admin, password_sha256: aa }
  - { id: "2", username: admin, password_sha256: bb }
"#;
    assert!(matches!(UserDirectory::from_yaml(raw), Err(DirectoryError::DuplicateUsername(name)) if name == "admin"));
}

#[test]
fn from_yaml_rejects_blank_username() {
    let raw = r#"
users:
  - { id: "1", username: "  ", password_sha256: aa }
"#;
    assert!(matches!(UserDirectory::from_yaml(raw), Err(DirectoryError::IncompleteEntry(_))));
}

#[test]
fn from_yaml_rejects_garbage() {
    assert!(matches!(UserDirectory::from_yaml("users: 12"), Err(DirectoryError::Parse(_))));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DIRECTORY.as_bytes()).unwrap();
    let directory = UserDirectory::load(Some(file.path())).unwrap();
    assert_eq!(directory.len(), 2);
}

#[test]
fn load_missing_file_errors() {
    let err = UserDirectory::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
    assert!(matches!(err, DirectoryError::Read { .. }));
}
