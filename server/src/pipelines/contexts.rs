// server/src/pipelines/contexts.rs

//! Context data for each workflow. Handlers receive these wrapped in
//! `storefront::ContextData`; the HTTP handler reads the outputs back once the
//! run completes.

use crate::state::AppState;
use storefront::{CartLine, Order, ProductId, User, UserId};

#[derive(Clone)]
pub struct SignupCtxData {
  pub app_state: AppState,
  pub username: String,
  pub password: String,
  pub password_hash: Option<String>,
  pub created_user: Option<User>,
  pub session_token: Option<String>,
}

impl SignupCtxData {
  pub fn new(app_state: AppState, username: String, password: String) -> Self {
    Self {
      app_state,
      username,
      password,
      password_hash: None,
      created_user: None,
      session_token: None,
    }
  }
}

#[derive(Clone)]
pub struct SigninCtxData {
  pub app_state: AppState,
  pub username: String,
  pub password: String,
  pub user: Option<User>,
  pub session_token: Option<String>,
}

impl SigninCtxData {
  pub fn new(app_state: AppState, username: String, password: String) -> Self {
    Self {
      app_state,
      username,
      password,
      user: None,
      session_token: None,
    }
  }
}

#[derive(Clone)]
pub struct AddToCartCtxData {
  pub app_state: AppState,
  pub user_id: UserId,
  pub product_id: ProductId,
  pub quantity: u32,
  pub updated_line: Option<CartLine>,
  /// Number of distinct lines once the item is in.
  pub cart_size: Option<usize>,
}

impl AddToCartCtxData {
  pub fn new(app_state: AppState, user_id: UserId, product_id: ProductId, quantity: u32) -> Self {
    Self {
      app_state,
      user_id,
      product_id,
      quantity,
      updated_line: None,
      cart_size: None,
    }
  }
}

#[derive(Clone)]
pub struct CheckoutCtxData {
  pub app_state: AppState,
  pub user_id: UserId,
  pub placed_order: Option<Order>,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, user_id: UserId) -> Self {
    Self {
      app_state,
      user_id,
      placed_order: None,
    }
  }
}
