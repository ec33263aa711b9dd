// server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use storefront::ContextData;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::pipelines::contexts::CheckoutCtxData;
use crate::pipelines::run_to_completion;
use crate::state::AppState;
use crate::web::extractors::{AdminUser, AuthenticatedUser};

#[instrument(name = "handler::place_order", skip_all, fields(user_id = auth_user.id))]
pub async fn place_order_handler(auth_user: AuthenticatedUser, app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(CheckoutCtxData::new(app_state.get_ref().clone(), auth_user.id));
  run_to_completion(&app_state.flows, ctx_data.clone()).await?;

  let order = ctx_data
    .read()
    .placed_order
    .clone()
    .ok_or_else(|| AppError::Internal("Checkout completed without an order.".to_string()))?;
  info!(order_id = order.id, "Order created.");
  Ok(HttpResponse::Created().json(order))
}

#[instrument(name = "handler::list_my_orders", skip_all, fields(user_id = auth_user.id))]
pub async fn list_my_orders_handler(auth_user: AuthenticatedUser, app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(app_state.store.orders().list_for_user(auth_user.id))
}

#[instrument(name = "handler::list_all_orders", skip_all, fields(admin_id = admin.0.id))]
pub async fn list_all_orders_handler(admin: AdminUser, app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(app_state.store.orders().list_all())
}
