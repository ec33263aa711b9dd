// core/src/model/product.rs

use super::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price: Decimal,
  pub category: String,
  pub stock: u32,
}

/// Fields for a product that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
  pub name: String,
  pub price: Decimal,
  pub category: String,
  pub stock: u32,
}

/// A partial update. `None` leaves the field as it is; `Some(0)` for price or
/// stock is a real value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
  pub name: Option<String>,
  pub price: Option<Decimal>,
  pub category: Option<String>,
  pub stock: Option<u32>,
}
