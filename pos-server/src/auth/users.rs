//! In-memory user directory
//!
//! Two fixed accounts (admin, cashier) with argon2-hashed passwords
//! taken from configuration at startup. Passwords never leave this
//! module; the directory hands out only the public `User` record.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use shared::models::{Role, User};

struct UserRecord {
    user: User,
    password_hash: String,
}

/// Fixed account directory
pub struct UserDirectory {
    records: Vec<UserRecord>,
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory")
            .field("users", &self.records.len())
            .finish()
    }
}

impl UserDirectory {
    /// Build the directory, hashing the configured passwords
    pub fn new(admin_password: &str, cashier_password: &str) -> Result<Self, anyhow::Error> {
        let records = vec![
            UserRecord {
                user: User {
                    id: "1".to_string(),
                    email: "admin@saif.cafe".to_string(),
                    role: Role::Admin,
                },
                password_hash: Self::hash_password(admin_password)
                    .map_err(|e| anyhow::anyhow!("failed to hash admin password: {}", e))?,
            },
            UserRecord {
                user: User {
                    id: "2".to_string(),
                    email: "cashier@saif.cafe".to_string(),
                    role: Role::Cashier,
                },
                password_hash: Self::hash_password(cashier_password)
                    .map_err(|e| anyhow::anyhow!("failed to hash cashier password: {}", e))?,
            },
        ];
        Ok(Self { records })
    }

    /// Look up a user by email and verify the password.
    ///
    /// Returns `None` for unknown email and wrong password alike; the
    /// caller reports one unified error either way.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let record = self.records.iter().find(|r| r.user.email == email)?;
        if Self::verify_password(password, &record.password_hash).unwrap_or(false) {
            Some(record.user.clone())
        } else {
            None
        }
    }

    /// Look up a user by id (token subject)
    pub fn get(&self, id: &str) -> Option<User> {
        self.records
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
    }

    /// Hash password using argon2
    fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Verify password using argon2
    fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
