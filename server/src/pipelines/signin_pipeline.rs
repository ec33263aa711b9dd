// server/src/pipelines/signin_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::SigninCtxData;
use crate::services::auth_service;
use storefront::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{event, info, warn, Level};

/// Unknown user and wrong password answer the same way.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn register_signin_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<SigninCtxData, AppError>::new(&[
    ("fetch_user_by_username", false),
    ("verify_user_password", false),
    ("issue_session_token", false),
  ]);

  p.on_step("fetch_user_by_username", |ctx_data: ContextData<SigninCtxData>| async move {
    let (username, store) = {
      let guard = ctx_data.read();
      (guard.username.clone(), guard.app_state.store.clone())
    };

    match store.users().find_by_username(&username) {
      Some(user) => {
        event!(Level::DEBUG, user_id = user.id, "User found for sign-in.");
        ctx_data.write().user = Some(user);
        Ok(PipelineControl::Continue)
      }
      None => {
        warn!(%username, "Sign-in for unknown username.");
        Err(AppError::Auth(INVALID_CREDENTIALS.to_string()))
      }
    }
  });

  p.on_step("verify_user_password", |ctx_data: ContextData<SigninCtxData>| async move {
    let (stored_hash, password, user_id) = {
      let mut guard = ctx_data.write();
      let password = std::mem::take(&mut guard.password);
      match guard.user.as_ref() {
        Some(user) => (user.password_hash.clone(), password, user.id),
        None => return Err(AppError::Internal("User missing before password check.".to_string())),
      }
    };

    let matches = tokio::task::spawn_blocking(move || auth_service::verify_password(&stored_hash, &password))
      .await
      .map_err(|join_err| AppError::Internal(format!("Password check task failed: {}", join_err)))??;
    if !matches {
      warn!(user_id, "Password mismatch on sign-in.");
      return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }
    event!(Level::DEBUG, user_id, "Password verified.");
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  p.on_step("issue_session_token", |ctx_data: ContextData<SigninCtxData>| async move {
    let (user, config) = {
      let guard = ctx_data.read();
      (guard.user.clone(), guard.app_state.config.clone())
    };
    let user = user.ok_or_else(|| AppError::Internal("No user to issue a token for.".to_string()))?;

    let token = auth_service::issue_token(&user, &config.jwt_secret, config.token_ttl_hours)?;
    info!(user_id = user.id, role = %user.role, "Session token issued.");
    ctx_data.write().session_token = Some(token);
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  registry.register(p);
  info!("Sign-in workflow registered.");
}
