// server/src/lib.rs

//! HTTP front for the `storefront` crate: configuration, auth, request
//! workflows and actix-web routing.

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod web;

pub use crate::bootstrap::build_app_state;
pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
