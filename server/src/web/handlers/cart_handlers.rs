// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::{ContextData, ProductId, QuantityChange};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::pipelines::contexts::AddToCartCtxData;
use crate::pipelines::run_to_completion;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartPayload {
  pub product_id: Option<ProductId>,
  pub quantity: Option<i64>,
}

/// A validated add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddToCart {
  pub product_id: ProductId,
  pub quantity: u32,
}

impl AddToCartPayload {
  pub fn validate(self) -> Result<AddToCart> {
    let product_id = self
      .product_id
      .filter(|id| *id != 0)
      .ok_or_else(|| AppError::Validation("Product ID is required".to_string()))?;
    let quantity = match self.quantity.unwrap_or(1) {
      q if q >= 1 => {
        u32::try_from(q).map_err(|_| AppError::Validation("Quantity is too large".to_string()))?
      }
      _ => return Err(AppError::Validation("Quantity must be a positive number".to_string())),
    };
    Ok(AddToCart { product_id, quantity })
  }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateCartPayload {
  pub quantity: Option<i64>,
}

// --- Handlers ---

#[instrument(name = "handler::view_cart", skip_all, fields(user_id = auth_user.id))]
pub async fn view_cart_handler(auth_user: AuthenticatedUser, app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(app_state.store.cart_view(auth_user.id))
}

#[instrument(name = "handler::add_to_cart", skip_all, fields(user_id = auth_user.id))]
pub async fn add_to_cart_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartPayload>,
) -> Result<HttpResponse> {
  let AddToCart { product_id, quantity } = req_payload.into_inner().validate()?;

  let ctx_data = ContextData::new(AddToCartCtxData::new(
    app_state.get_ref().clone(),
    auth_user.id,
    product_id,
    quantity,
  ));
  run_to_completion(&app_state.flows, ctx_data.clone()).await?;

  let guard = ctx_data.read();
  if let Some(line) = guard.updated_line {
    info!(product_id, cart_quantity = line.quantity, cart_size = guard.cart_size, "Item added to cart.");
  }
  Ok(HttpResponse::Ok().json(json!({ "message": "Item added to cart" })))
}

/// Sets the line's quantity; zero or less removes it.
#[instrument(name = "handler::update_cart_item", skip_all, fields(user_id = auth_user.id, product_id = *path))]
pub async fn update_cart_item_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
  req_payload: web::Json<UpdateCartPayload>,
) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  app_state.store.carts().line(auth_user.id, product_id)?;
  let quantity = req_payload
    .quantity
    .ok_or_else(|| AppError::Validation("Quantity is required".to_string()))?;

  match app_state.store.set_cart_quantity(auth_user.id, product_id, quantity)? {
    QuantityChange::Updated(line) => info!(quantity = line.quantity, "Cart line quantity set."),
    QuantityChange::Removed => info!("Cart line removed by zero quantity."),
  }
  Ok(HttpResponse::Ok().json(json!({ "message": "Cart updated" })))
}

#[instrument(name = "handler::remove_cart_item", skip_all, fields(user_id = auth_user.id, product_id = *path))]
pub async fn remove_cart_item_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
) -> Result<HttpResponse> {
  app_state.store.remove_from_cart(auth_user.id, path.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Item removed from cart" })))
}
