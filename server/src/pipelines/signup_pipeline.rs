// server/src/pipelines/signup_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::SignupCtxData;
use crate::services::auth_service;
use storefront::{ContextData, FlowRegistry, Pipeline, PipelineControl, Role};
use tracing::{event, info, warn, Level};

/// Registers the registration workflow: reject taken usernames, hash, store
/// the account, open its cart and sign a token.
pub fn register_signup_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<SignupCtxData, AppError>::new(&[
    ("check_username_available", false),
    ("hash_user_password", false),
    ("create_customer_account", false),
    ("issue_session_token", false),
  ]);

  p.on_step("check_username_available", |ctx_data: ContextData<SignupCtxData>| async move {
    let (username, store) = {
      let guard = ctx_data.read();
      (guard.username.clone(), guard.app_state.store.clone())
    };

    if store.users().username_taken(&username) {
      warn!(%username, "Registration with an existing username.");
      return Err(AppError::Conflict("Username already exists".to_string()));
    }
    event!(Level::DEBUG, %username, "Username is available.");
    Ok(PipelineControl::Continue)
  });

  p.on_step("hash_user_password", |ctx_data: ContextData<SignupCtxData>| async move {
    let password = { ctx_data.read().password.clone() };
    // Argon2 is CPU-bound; run it on the blocking pool.
    let hash = tokio::task::spawn_blocking(move || auth_service::hash_password(&password))
      .await
      .map_err(|join_err| AppError::Internal(format!("Password hashing task failed: {}", join_err)))??;
    {
      let mut guard = ctx_data.write();
      guard.password_hash = Some(hash);
      guard.password.clear();
    }
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  p.on_step("create_customer_account", |ctx_data: ContextData<SignupCtxData>| async move {
    let (username, password_hash, store) = {
      let mut guard = ctx_data.write();
      (guard.username.clone(), guard.password_hash.take(), guard.app_state.store.clone())
    };
    let password_hash =
      password_hash.ok_or_else(|| AppError::Internal("Password hash missing before account creation.".to_string()))?;

    // The directory re-checks uniqueness under its own lock, so a racing
    // registration for the same name still fails here.
    let user = store.users().create(&username, password_hash, Role::Customer)?;
    store.carts().open(user.id);

    info!(user_id = user.id, %username, "Customer account created.");
    ctx_data.write().created_user = Some(user);
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  p.on_step("issue_session_token", |ctx_data: ContextData<SignupCtxData>| async move {
    let (user, config) = {
      let guard = ctx_data.read();
      (guard.created_user.clone(), guard.app_state.config.clone())
    };
    let user = user.ok_or_else(|| AppError::Internal("No account to issue a token for.".to_string()))?;

    let token = auth_service::issue_token(&user, &config.jwt_secret, config.token_ttl_hours)?;
    ctx_data.write().session_token = Some(token);
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  registry.register(p);
  info!("Sign-up workflow registered.");
}
