// core/src/error.rs
use crate::model::{ProductId, UserId};
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures of the workflow engine itself, as opposed to failures raised by
/// step handlers.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("No workflow registered for context type {context_type}")]
  PipelineNotRegistered { context_type: String },

  #[error("Type mismatch during context downcast (expected {expected_type})")]
  TypeMismatch { expected_type: String },

  #[error("Error in step handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::HandlerError { source: err }
  }
}

/// Failures of the order transaction. Any of these leaves the cart, the
/// catalog and the ledger untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
  #[error("Cart is empty")]
  EmptyCart,

  #[error("Product {product_id} not found")]
  ProductNotFound { product_id: ProductId },

  #[error("Insufficient stock for {product_name}")]
  InsufficientStock {
    product_id: ProductId,
    product_name: String,
    requested: u32,
    available: u32,
  },

  /// A line subtotal or the order total does not fit in a `Decimal`.
  #[error("Order total is too large")]
  TotalOverflow { product_id: ProductId },
}

/// Failures of the catalog, cart and user stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
  #[error("Product not found")]
  ProductNotFound { product_id: ProductId },

  #[error("Insufficient stock")]
  InsufficientStock {
    product_id: ProductId,
    requested: u32,
    available: u32,
  },

  #[error("Cart not found")]
  CartNotFound { user_id: UserId },

  #[error("Item not found in cart")]
  CartLineNotFound { user_id: UserId, product_id: ProductId },

  #[error("Username already exists")]
  UsernameTaken { username: String },

  #[error("{0}")]
  Validation(String),
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
