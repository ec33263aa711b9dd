// server/src/pipelines/checkout_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::CheckoutCtxData;
use storefront::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::info;

/// Order placement. All of the stock checking and committing happens inside
/// `Storefront::place_order`; the workflow adds the confirmation log.
pub fn register_checkout_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<CheckoutCtxData, AppError>::new(&[
    ("place_order", false),
    ("log_order_confirmation", true),
  ]);

  p.on_step("place_order", |ctx_data: ContextData<CheckoutCtxData>| async move {
    let (user_id, store) = {
      let guard = ctx_data.read();
      (guard.user_id, guard.app_state.store.clone())
    };
    let order = store.place_order(user_id)?;
    ctx_data.write().placed_order = Some(order);
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  p.on_step("log_order_confirmation", |ctx_data: ContextData<CheckoutCtxData>| async move {
    let guard = ctx_data.read();
    if let Some(order) = guard.placed_order.as_ref() {
      let units: u32 = order.items.iter().map(|item| item.quantity).sum();
      info!(
        order_id = order.id,
        user_id = order.user_id,
        total = %order.total,
        units,
        "Order confirmed."
      );
    }
    Ok::<_, AppError>(PipelineControl::Continue)
  });

  registry.register(p);
  info!("Checkout workflow registered.");
}
