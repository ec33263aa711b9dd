// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use storefront::{ContextData, User};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::pipelines::contexts::{SigninCtxData, SignupCtxData};
use crate::pipelines::run_to_completion;
use crate::state::AppState;

// --- Request DTOs ---

/// Body of both `/login` and `/register`. Fields are optional so a missing
/// one is reported with our own message instead of a deserialisation error.
#[derive(Deserialize, Debug, Default)]
pub struct CredentialsPayload {
  pub username: Option<String>,
  pub password: Option<String>,
}

/// Validated username and password, both non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl CredentialsPayload {
  pub fn validate(self) -> Result<Credentials> {
    match (self.username, self.password) {
      (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
        Ok(Credentials { username, password })
      }
      _ => Err(AppError::Validation("Username and password required".to_string())),
    }
  }
}

// --- Response DTOs ---

#[derive(Serialize, Debug)]
pub struct SessionResponse {
  pub token: String,
  pub user: User,
}

// --- Handlers ---

#[instrument(name = "handler::login", skip_all)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse> {
  let Credentials { username, password } = req_payload.into_inner().validate()?;
  info!(%username, "Login attempt.");

  let ctx_data = ContextData::new(SigninCtxData::new(app_state.get_ref().clone(), username, password));
  run_to_completion(&app_state.flows, ctx_data.clone()).await?;

  let guard = ctx_data.read();
  let session = session_from(guard.session_token.clone(), guard.user.clone())?;
  Ok(HttpResponse::Ok().json(session))
}

#[instrument(name = "handler::register", skip_all)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse> {
  let Credentials { username, password } = req_payload.into_inner().validate()?;
  info!(%username, "Registration attempt.");

  let ctx_data = ContextData::new(SignupCtxData::new(app_state.get_ref().clone(), username, password));
  run_to_completion(&app_state.flows, ctx_data.clone()).await?;

  let guard = ctx_data.read();
  let session = session_from(guard.session_token.clone(), guard.created_user.clone())?;
  Ok(HttpResponse::Created().json(session))
}

fn session_from(token: Option<String>, user: Option<User>) -> Result<SessionResponse> {
  match (token, user) {
    (Some(token), Some(user)) => Ok(SessionResponse { token, user }),
    _ => Err(AppError::Internal("Workflow completed without a session.".to_string())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn credentials_require_both_fields() {
    let missing_password = CredentialsPayload {
      username: Some("alice".to_string()),
      password: None,
    };
    assert!(matches!(missing_password.validate(), Err(AppError::Validation(_))));

    let empty_username = CredentialsPayload {
      username: Some(String::new()),
      password: Some("pw".to_string()),
    };
    assert!(matches!(empty_username.validate(), Err(AppError::Validation(_))));

    let ok = CredentialsPayload {
      username: Some("alice".to_string()),
      password: Some("pw".to_string()),
    };
    assert_eq!(
      ok.validate().unwrap(),
      Credentials {
        username: "alice".to_string(),
        password: "pw".to_string()
      }
    );
  }
}
