// core/src/model/order.rs

use super::{OrderId, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
}

/// Snapshot of a product at the moment the order was placed. Later catalog
/// changes do not reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub product_id: ProductId,
  pub product_name: String,
  pub price: Decimal,
  pub quantity: u32,
  pub subtotal: Decimal,
}

impl OrderItem {
  /// `None` when `price * quantity` does not fit in a `Decimal`.
  pub fn new(product_id: ProductId, product_name: impl Into<String>, price: Decimal, quantity: u32) -> Option<Self> {
    let subtotal = price.checked_mul(Decimal::from(quantity))?;
    Some(Self {
      product_id,
      product_name: product_name.into(),
      price,
      quantity,
      subtotal,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: OrderId,
  pub user_id: UserId,
  pub items: Vec<OrderItem>,
  pub total: Decimal,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}
