// server/src/state.rs
use crate::config::AppConfig;
use crate::errors::AppError;
use std::sync::Arc;
use storefront::{FlowRegistry, Storefront};

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<Storefront>,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
}
