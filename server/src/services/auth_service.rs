// server/src/services/auth_service.rs

//! Password hashing (Argon2) and bearer tokens (HS256 JWT).

use crate::errors::AppError;
use anyhow::Context;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use storefront::{Role, User, UserId};
use tracing::{debug, error, instrument};

/// What a token says about its bearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub id: UserId,
  pub username: String,
  pub role: Role,
  pub iat: usize,
  pub exp: usize,
}

/// Hashes a plain-text password with a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(hash) => {
      debug!("Password hashed successfully.");
      Ok(hash.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash itself is
/// unusable.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided_password: &str) -> Result<bool, AppError> {
  let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(other_err) => {
      error!(error = %other_err, "Argon2 password verification encountered an error.");
      Err(AppError::Internal(format!("Password verification process failed: {}", other_err)))
    }
  }
}

/// Signs a token for `user` valid for `ttl_hours`.
#[instrument(name = "auth_service::issue_token", skip(user, secret), fields(user_id = user.id))]
pub fn issue_token(user: &User, secret: &str, ttl_hours: i64) -> anyhow::Result<String> {
  let now = Utc::now();
  let expires_at = now + Duration::hours(ttl_hours);
  let claims = Claims {
    id: user.id,
    username: user.username.clone(),
    role: user.role,
    iat: now.timestamp() as usize,
    exp: expires_at.timestamp() as usize,
  };

  encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).context("Failed to sign session token")
}

/// Verifies signature and expiry. Any failure is reported as `Invalid token`.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
  decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
    .map(|data| data.claims)
    .map_err(|err| {
      debug!(error = %err, "Rejected bearer token.");
      AppError::Forbidden("Invalid token".to_string())
    })
}
