// server/src/pipelines/mod.rs

//! Multi-step request workflows, one pipeline per context type.

use crate::errors::AppError;
use storefront::{ContextData, FlowRegistry, PipelineResult};

pub mod contexts;

pub mod cart_pipeline;
pub mod checkout_pipeline;
pub mod signin_pipeline;
pub mod signup_pipeline;

/// Registers every workflow with `registry`. Called once at start-up.
pub fn register_all_pipelines(registry: &FlowRegistry<AppError>) {
  tracing::info!("Registering workflows...");

  signup_pipeline::register_signup_pipeline(registry);
  signin_pipeline::register_signin_pipeline(registry);
  cart_pipeline::register_add_to_cart_pipeline(registry);
  checkout_pipeline::register_checkout_pipeline(registry);

  tracing::info!("All application workflows registered.");
}

/// Runs the workflow for `TData` and treats an early stop as a failure; every
/// workflow here is expected to run to completion.
pub async fn run_to_completion<TData>(
  registry: &FlowRegistry<AppError>,
  ctx_data: ContextData<TData>,
) -> Result<(), AppError>
where
  TData: 'static + Send + Sync,
{
  match registry.run(ctx_data).await? {
    PipelineResult::Completed => Ok(()),
    PipelineResult::Stopped => {
      let context_type = std::any::type_name::<TData>();
      tracing::warn!(%context_type, "Workflow was halted by a handler.");
      Err(AppError::Internal(format!("Workflow for {} was halted unexpectedly.", context_type)))
    }
  }
}
