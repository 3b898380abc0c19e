//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    error::{AppError, AppResult},
    models::user::{Credentials, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user. The plaintext password is hashed before it
    /// reaches the repository and is never persisted or logged.
    pub async fn signup(&self, credentials: &Credentials) -> AppResult<User> {
        let hash = hash_password(&credentials.password)?;
        let user = self
            .repository
            .users
            .create(&credentials.username, &hash)
            .await?;

        tracing::info!("New user registered: {}", user.username);

        Ok(user)
    }

    /// Authenticate by exact username match and password verification
    pub async fn login(&self, credentials: &Credentials) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_username(&credentials.username)
            .await?
            .ok_or_else(|| AppError::BadRequest("User not found".to_string()))?;

        if !verify_password(&user.password, &credentials.password)? {
            return Err(AppError::BadRequest("Incorrect password".to_string()));
        }

        Ok(user)
    }
}

/// Hash a password using Argon2 with a fresh random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash
pub fn verify_password(stored_hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
