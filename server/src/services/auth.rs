//! Operator directory and password verification for the login endpoint.
//!
//! The directory is a read-only YAML file loaded at startup. Without one, a
//! single demo account (`admin` / `admin`) is available.

use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use metro_session::UserRecord;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// SHA-256 of `"admin"`.
const DEMO_PASSWORD_SHA256: &str = "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918";

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read user directory {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse user directory: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate username in user directory: {0}")]
    DuplicateUsername(String),
    #[error("user directory entry {0:?} lacks an id or username")]
    IncompleteEntry(String),
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Lowercase hex SHA-256 of a password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    bytes_to_hex(&Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    users: Vec<DirectoryEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    id: String,
    username: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    email: Option<String>,
    password_sha256: String,
}

#[derive(Debug, Clone)]
struct Account {
    user: UserRecord,
    password_sha256: String,
}

/// Known operators keyed by username.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    accounts: HashMap<String, Account>,
}

impl UserDirectory {
    /// Directory containing only the demo administrator.
    #[must_use]
    pub fn demo() -> Self {
        let user = UserRecord {
            id: "1".into(),
            username: "admin".into(),
            display_name: "Administrador".into(),
            role: "admin".into(),
            email: Some("admin@metro.local".into()),
        };
        let account = Account { user, password_sha256: DEMO_PASSWORD_SHA256.to_owned() };
        Self { accounts: HashMap::from([("admin".to_owned(), account)]) }
    }

    /// Load the directory file, or the demo directory when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] if the file cannot be read or is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, DirectoryError> {
        let Some(path) = path else {
            return Ok(Self::demo());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|source| DirectoryError::Read { path: path.display().to_string(), source })?;
        Self::from_yaml(&raw)
    }

    /// Parse a YAML directory document.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] on parse failure, blank ids/usernames or
    /// duplicate usernames.
    pub fn from_yaml(raw: &str) -> Result<Self, DirectoryError> {
        let file: DirectoryFile = serde_yaml::from_str(raw)?;
        let mut accounts = HashMap::with_capacity(file.users.len());

        for entry in file.users {
            let username = entry.username.trim().to_owned();
            let user = metro_session::validate_user(UserRecord {
                id: entry.id.trim().to_owned(),
                username: username.clone(),
                display_name: entry.display_name,
                role: entry.role,
                email: entry.email,
            })
            .map_err(|_| DirectoryError::IncompleteEntry(username.clone()))?;

            let account = Account { user, password_sha256: entry.password_sha256.trim().to_ascii_lowercase() };
            if accounts.insert(username.clone(), account).is_some() {
                return Err(DirectoryError::DuplicateUsername(username));
            }
        }

        Ok(Self { accounts })
    }

    /// Number of known accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Verify a username/password pair and return the matching user.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> Option<UserRecord> {
        let account = self.accounts.get(username.trim())?;
        let candidate = hash_password(password);
        constant_time_eq(candidate.as_bytes(), account.password_sha256.as_bytes()).then(|| account.user.clone())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
