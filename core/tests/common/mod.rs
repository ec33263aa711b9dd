// tests/common/mod.rs
#![allow(dead_code)]

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use storefront::{ContextData, FlowError, NewProduct, PipelineControl, Product, Storefront};
use std::future::Future;
use std::pin::Pin;
use tracing::Level;

pub type StepFuture = Pin<Box<dyn Future<Output = Result<PipelineControl, TestError>> + Send>>;

// --- Workflow fixtures ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Workflow error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(err: FlowError) -> Self {
    TestError::Flow(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| -> StepFuture {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| -> StepFuture {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Store fixtures ---
pub fn product_fields(name: &str, price: Decimal, stock: u32) -> NewProduct {
  NewProduct {
    name: name.to_string(),
    price,
    category: "Test".to_string(),
    stock,
  }
}

/// An empty shop with the given products added through the catalog API.
pub fn shop_with(products: &[NewProduct]) -> (Storefront, Vec<Product>) {
  let shop = Storefront::new();
  let created = products
    .iter()
    .cloned()
    .map(|p| shop.catalog().create(p).expect("fixture product is valid"))
    .collect();
  (shop, created)
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
