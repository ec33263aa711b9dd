// core/src/ledger.rs

//! Append-only list of placed orders.

use crate::model::{Order, OrderId, OrderItem, OrderStatus, UserId};
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;

#[derive(Debug)]
struct LedgerInner {
  orders: Vec<Order>,
  next_order_id: OrderId,
}

#[derive(Debug)]
pub struct OrderLedger {
  inner: Mutex<LedgerInner>,
}

impl Default for OrderLedger {
  fn default() -> Self {
    Self {
      inner: Mutex::new(LedgerInner {
        orders: Vec::new(),
        next_order_id: 1,
      }),
    }
  }
}

impl OrderLedger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records a new pending order under the next id. Ids are never reused.
  pub(crate) fn append(&self, user_id: UserId, items: Vec<OrderItem>, total: Decimal) -> Order {
    let mut inner = self.inner.lock();
    let order = Order {
      id: inner.next_order_id,
      user_id,
      items,
      total,
      status: OrderStatus::Pending,
      created_at: Utc::now(),
    };
    inner.next_order_id += 1;
    inner.orders.push(order.clone());
    order
  }

  /// The user's orders in the order they were placed.
  pub fn list_for_user(&self, user_id: UserId) -> Vec<Order> {
    self.inner.lock().orders.iter().filter(|o| o.user_id == user_id).cloned().collect()
  }

  pub fn list_all(&self) -> Vec<Order> {
    self.inner.lock().orders.clone()
  }

  pub fn len(&self) -> usize {
    self.inner.lock().orders.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.lock().orders.is_empty()
  }
}
