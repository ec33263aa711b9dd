// server/src/pipelines/cart_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::AddToCartCtxData;
use storefront::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{debug, info};

/// Product lookup and the advisory stock check live in `CartStore::add_item`,
/// so the store call is the only gate.
pub fn register_add_to_cart_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<AddToCartCtxData, AppError>::new(&[
    ("add_or_merge_cart_line", false),
    ("record_cart_size", true),
  ]);

  p.on_step("add_or_merge_cart_line", |ctx_data: ContextData<AddToCartCtxData>| async move {
    let (user_id, product_id, quantity, store) = {
      let guard = ctx_data.read();
      (guard.user_id, guard.product_id, guard.quantity, guard.app_state.store.clone())
    };
    let line = store.add_to_cart(user_id, product_id, quantity)?;
    info!(user_id, product_id, cart_quantity = line.quantity, "Cart line stored.");
    ctx_data.write().updated_line = Some(line);
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  p.on_step("record_cart_size", |ctx_data: ContextData<AddToCartCtxData>| async move {
    let (user_id, store) = {
      let guard = ctx_data.read();
      (guard.user_id, guard.app_state.store.clone())
    };
    let cart_size = store.carts().get(user_id).len();
    debug!(user_id, cart_size, "Cart size after add.");
    ctx_data.write().cart_size = Some(cart_size);
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  registry.register(p);
  info!("Add-to-cart workflow registered.");
}
