//! Credential hashing and verification.
//!
//! Argon2id is CPU-heavy, so both operations run on the blocking pool.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use tokio::task;

use crate::config::SecurityConfig;

/// Credential collaborator: turns plaintext into a stored digest and back.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Hashes a plaintext password with the configured algorithm and cost.
    async fn hash_password(&self, plaintext: &str) -> Result<String>;

    /// Checks a plaintext password against a stored digest.
    ///
    /// A malformed digest is an error, a wrong password is `Ok(false)`.
    async fn verify_password(&self, plaintext: &str, digest: &str) -> Result<bool>;
}

pub struct Argon2Credentials {
    config: SecurityConfig,
}

impl Argon2Credentials {
    #[must_use]
    pub const fn new(config: SecurityConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CredentialService for Argon2Credentials {
    async fn hash_password(&self, plaintext: &str) -> Result<String> {
        let password = plaintext.to_string();
        let config = self.config.clone();

        task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .context("Password hashing task panicked")?
    }

    async fn verify_password(&self, plaintext: &str, digest: &str) -> Result<bool> {
        let password = plaintext.to_string();
        let digest = digest.to_string();

        task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&digest)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            // Params are read back from the PHC string, so older hashes still verify.
            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")?
    }
}

/// Hash a password using Argon2id with the configured params.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let credentials = Argon2Credentials::new(cheap_config());

        let digest = credentials.hash_password("s3cret").await.unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert_ne!(digest, "s3cret");

        assert!(credentials.verify_password("s3cret", &digest).await.unwrap());
        assert!(!credentials.verify_password("wrong", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_digest_is_an_error() {
        let credentials = Argon2Credentials::new(cheap_config());
        assert!(credentials.verify_password("x", "not-a-hash").await.is_err());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let config = SecurityConfig {
            argon2_time_cost: 0,
            ..cheap_config()
        };
        assert!(hash_password("x", &config).is_err());
    }
}
