use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

/// Newtype for password to prevent accidental logging
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Self {
        Self(password)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Hashes a signup password with Argon2id into a PHC string; the random salt
/// is embedded in the result.
pub fn hash_password(password: &Password) -> Result<String, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    fn verifies(password: &str, hash: &str) -> bool {
        let parsed = PasswordHash::new(hash).expect("Invalid PHC string");
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    #[test]
    fn test_hash_password() {
        let password = Password::new("clinic-visit-2024".to_string());
        let hash = hash_password(&password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("clinic-visit-2024"));
        assert!(verifies("clinic-visit-2024", &hash));
        assert!(!verifies("wrong", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = Password::new("clinic-visit-2024".to_string());
        let hash1 = hash_password(&password).expect("Failed to hash password");
        let hash2 = hash_password(&password).expect("Failed to hash password");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_debug_does_not_leak() {
        let password = Password::new("clinic-visit-2024".to_string());
        assert_eq!(format!("{:?}", password), "Password(***)");
    }
}
