// core/src/model/cart.rs

use super::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// One line of a user's cart. A cart never holds two lines for the same
/// product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub product_id: ProductId,
  pub quantity: u32,
}

/// A cart line joined with the live catalog entry. `product` is `None` when
/// the product was deleted after it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
  pub product_id: ProductId,
  pub quantity: u32,
  pub product: Option<Product>,
}
