//! User account storage
//!
//! Accounts live in a JSON file next to the spot store. Passwords are never
//! stored; each record keeps a salted blake3 digest. Verification compares
//! digests, not hex strings, so the comparison is constant-time.

use super::{Role, User};
use crate::constants::files::USERS_FILE_NAME;
use crate::error::{Error, Result};
use crate::store::SpotStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// A persisted user record, digest included. Never serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    id: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    role: Role,
    salt: String,
    digest: String,
}

impl StoredUser {
    fn public(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// File-backed user store
#[derive(Debug)]
pub struct UserStore {
    users: Vec<StoredUser>,
    path: PathBuf,
}

impl UserStore {
    /// Get the user store file path (shares the spot store's data dir)
    pub fn store_path() -> Result<PathBuf> {
        Ok(SpotStore::data_dir()?.join(USERS_FILE_NAME))
    }

    /// Load the store from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::store_path()?)
    }

    /// Load the store from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let users = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Store(format!("Failed to read user file: {}", e)))?;

            serde_json::from_str(&content)
                .map_err(|e| Error::Store(format!("Failed to parse user file: {}", e)))?
        } else {
            Vec::new()
        };

        Ok(Self { users, path })
    }

    /// Save the store to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("Failed to create data directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(&self.users)
            .map_err(|e| Error::Store(format!("Failed to serialize users: {}", e)))?;

        fs::write(&self.path, content)
            .map_err(|e| Error::Store(format!("Failed to write user file: {}", e)))?;

        Ok(())
    }

    /// Create a user account
    ///
    /// Email must be non-empty and unique; the password must be non-empty.
    pub fn add(
        &mut self,
        email: &str,
        password: &str,
        name: Option<String>,
        role: Role,
    ) -> Result<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::InvalidInput("Email must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(Error::InvalidInput(
                "Password must not be empty".to_string(),
            ));
        }
        if self.users.iter().any(|u| u.email == email) {
            return Err(Error::InvalidInput(format!(
                "User already exists: {}",
                email
            )));
        }

        let salt = Uuid::new_v4().simple().to_string();
        let user = StoredUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name,
            role,
            digest: digest(&salt, password).to_hex().to_string(),
            salt,
        };

        let public = user.public();
        self.users.push(user);
        self.save()?;
        Ok(public)
    }

    /// Verify credentials, returning the account on success
    pub fn verify(&self, email: &str, password: &str) -> Option<User> {
        let user = self.users.iter().find(|u| u.email == email)?;
        let stored = blake3::Hash::from_hex(&user.digest).ok()?;
        if digest(&user.salt, password) == stored {
            Some(user.public())
        } else {
            None
        }
    }

    /// Find an account by email
    pub fn find(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.email == email)
            .map(StoredUser::public)
    }

    /// Public views of all accounts
    pub fn list(&self) -> Vec<User> {
        self.users.iter().map(StoredUser::public).collect()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn digest(salt: &str, password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize()
}
