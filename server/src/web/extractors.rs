// server/src/web/extractors.rs

//! Bearer-token extractors. Put `AuthenticatedUser` or `AdminUser` in a
//! handler's arguments to guard the route.

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use storefront::{Role, UserId};
use tracing::warn;

/// Identity taken from a verified token. Not re-checked against the user
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub id: UserId,
  pub role: Role,
}

/// An `AuthenticatedUser` whose role is admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser(pub AuthenticatedUser);

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
  header.split(' ').nth(1).filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let app_state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;

  let token = bearer_token(req).ok_or_else(|| {
    warn!(path = %req.path(), "Request without bearer token.");
    AppError::Auth("Access token required".to_string())
  })?;
  let claims = auth_service::decode_token(token, &app_state.config.jwt_secret)?;

  Ok(AuthenticatedUser {
    id: claims.id,
    role: claims.role,
  })
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

impl FromRequest for AdminUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate(req).and_then(|user| {
      if user.role == Role::Admin {
        Ok(AdminUser(user))
      } else {
        warn!(user_id = user.id, "Non-admin attempted an admin route.");
        Err(AppError::Forbidden("Admin access required".to_string()))
      }
    }))
  }
}
