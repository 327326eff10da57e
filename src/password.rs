use anyhow::Context;
use argon2::{password_hash::{rand_core::OsRng, SaltString}, Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use secrecy::{ExposeSecret, SecretString};

use crate::telemetry::spawn_blocking_with_tracing;

// Hash used when the username is unknown, so both login paths cost the same
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
    gZiV/M1gPc22ElAH/Jh1Hw$\
    CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

fn hasher() -> Result<Argon2<'static>, anyhow::Error>{
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

// Function to compute password hash
pub fn compute_password_hash(password: SecretString) -> Result<SecretString, anyhow::Error>{
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = hasher()?
                            .hash_password(password.expose_secret().as_bytes(), &salt)
                            .map_err(|_| anyhow::anyhow!("Failed to compute password hash"))?
                            .to_string();

    Ok(SecretString::from(password_hash))
}

// Function to verify if password matches hash, a missing hash never matches
pub async fn verify_password(password: SecretString, hashed_password: Option<String>) -> Result<bool, anyhow::Error>{
    let known_user = hashed_password.is_some();
    let hashed_password = hashed_password.unwrap_or_else(|| FALLBACK_PASSWORD_HASH.to_string());

    let verified = spawn_blocking_with_tracing(move ||{
        let hashed_password = PasswordHash::new(hashed_password.as_str())
                    .map_err(|_| anyhow::anyhow!("Failed to parse PasswordHash \
                            from stored hashed password"))?;

        Ok::<bool, anyhow::Error>(Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &hashed_password)
            .is_ok()
        )
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(verified && known_user)
}
