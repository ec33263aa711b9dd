// server/src/bootstrap.rs

//! Start-up wiring: the store (optionally seeded), the workflow registry and
//! the shared `AppState`.

use crate::config::AppConfig;
use crate::errors::Result;
use crate::pipelines;
use crate::services::auth_service;
use crate::state::AppState;
use std::sync::Arc;
use storefront::seed::{default_products, DEFAULT_ACCOUNTS};
use storefront::{FlowRegistry, Storefront};
use tracing::info;

/// Builds the store, seeding demo accounts and products when
/// `config.seed_data` is set.
pub fn build_storefront(config: &AppConfig) -> Result<Storefront> {
  if !config.seed_data {
    info!("Seeding disabled; starting with an empty store.");
    return Ok(Storefront::new());
  }

  let store = Storefront::with_products(default_products());
  for (username, password, role) in DEFAULT_ACCOUNTS {
    let hash = auth_service::hash_password(password)?;
    let user = store.users().create(username, hash, *role)?;
    store.carts().open(user.id);
  }
  info!(
    products = store.catalog().len(),
    users = store.users().len(),
    "Seed data loaded."
  );
  Ok(store)
}

pub fn build_app_state(config: AppConfig) -> Result<AppState> {
  let store = build_storefront(&config)?;

  let flows = FlowRegistry::new();
  pipelines::register_all_pipelines(&flows);

  Ok(AppState {
    store: Arc::new(store),
    flows: Arc::new(flows),
    config: Arc::new(config),
  })
}

/// Logs the demo credentials so a fresh install can be tried out.
pub fn log_default_credentials() {
  for (username, password, role) in DEFAULT_ACCOUNTS {
    info!("Default {} account: {} / {}", role, username, password);
  }
}
