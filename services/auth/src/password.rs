//! Argon2id credential hashing

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use tokio::task;
use tracing::warn;

use crate::error::AuthError;

/// One-way hashing and verification of stored credentials
#[derive(Clone, Default)]
pub struct CredentialHasher {
    params: Option<Params>,
}

impl CredentialHasher {
    /// Hasher with the library's default Argon2id cost
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters
    pub fn with_params(params: Params) -> Self {
        Self {
            params: Some(params),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        match &self.params {
            Some(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone()),
            None => Argon2::default(),
        }
    }

    /// Hash a password with a fresh random salt into a PHC string
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Constant-time check of a password against a stored PHC string
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(hash) => hash,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// [`hash`](Self::hash) on the blocking pool, leaving the runtime free
    pub async fn spawn_hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.clone();
        let password = password.to_owned();

        task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking pool
    pub async fn spawn_verify(&self, password: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let hasher = self.clone();
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();

        task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> CredentialHasher {
    CredentialHasher::with_params(Params::new(8, 1, 1, None).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("Str0ng!pass").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("Str0ng!pass", &hash));
        assert!(!hasher.verify("Str0ng!pasS", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = fast_hasher();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!fast_hasher().verify("anything", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn spawned_hash_verifies_like_the_inline_one() {
        let hasher = fast_hasher();
        let hash = hasher.spawn_hash("Str0ng!pass").await.unwrap();

        assert!(hasher.verify("Str0ng!pass", &hash));
        assert!(hasher.spawn_verify("Str0ng!pass", &hash).await.unwrap());
        assert!(!hasher.spawn_verify("wrong", &hash).await.unwrap());
    }

    // On a current-thread runtime an inline hash would finish inside the
    // first poll, before the sibling future ever runs.
    #[tokio::test]
    async fn hashing_does_not_stall_the_runtime() {
        let hasher = CredentialHasher::new();
        let finished = AtomicBool::new(false);

        let (hash, finished_before_sibling_ran) = tokio::join!(
            async {
                let hash = hasher.spawn_hash("Str0ng!pass").await;
                finished.store(true, Ordering::SeqCst);
                hash
            },
            async {
                task::yield_now().await;
                finished.load(Ordering::SeqCst)
            }
        );

        assert!(hash.unwrap().starts_with("$argon2id$"));
        assert!(!finished_before_sibling_ran);
    }
}
