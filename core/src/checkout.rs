// core/src/checkout.rs

//! The order transaction: turn a user's cart into an order.
//!
//! It runs in two passes under the user's cart lock and the catalog write
//! lock:
//!
//! 1. **Validate.** Walk the cart in order, resolve every product, check its
//!    stock and build the `OrderItem` snapshots. Nothing is mutated.
//! 2. **Commit.** Only once every line validated: decrement stock in the same
//!    order, append the order to the ledger and empty the cart.
//!
//! A failure in pass 1 returns before anything is touched, so a short product
//! on the last line never leaves earlier lines decremented. Because both
//! passes happen under the same catalog lock, two concurrent transactions
//! cannot both validate against the same units of stock.

use crate::cart::CartStore;
use crate::catalog::CatalogStore;
use crate::error::CheckoutError;
use crate::ledger::OrderLedger;
use crate::model::{CartLine, Order, OrderItem, Product, UserId};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Result of the validation pass: where each line's product lives in the
/// catalog and the snapshot taken of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedOrder {
  reservations: Vec<(usize, u32)>,
  pub(crate) items: Vec<OrderItem>,
  pub(crate) total: Decimal,
}

/// Borrowing view over the three stores an order touches.
pub struct OrderTransaction<'a> {
  catalog: &'a CatalogStore,
  carts: &'a CartStore,
  ledger: &'a OrderLedger,
}

impl<'a> OrderTransaction<'a> {
  pub fn new(catalog: &'a CatalogStore, carts: &'a CartStore, ledger: &'a OrderLedger) -> Self {
    Self { catalog, carts, ledger }
  }

  /// Places an order from everything in `user_id`'s cart.
  ///
  /// Lock order is cart, then catalog, then ledger.
  #[instrument(name = "checkout::place_order", skip(self))]
  pub fn place(&self, user_id: UserId) -> Result<Order, CheckoutError> {
    let cart = self.carts.handle(user_id).ok_or(CheckoutError::EmptyCart)?;
    let mut lines = cart.lock();

    let mut products = self.catalog.lock_for_checkout();
    let validated = validate_lines(&products, &lines).map_err(|err| {
      warn!(error = %err, "Order rejected during validation.");
      err
    })?;

    for &(idx, quantity) in &validated.reservations {
      let product = &mut products[idx];
      // Validation guarantees the subtraction cannot underflow.
      product.stock -= quantity;
    }
    drop(products);

    let order = self.ledger.append(user_id, validated.items, validated.total);
    lines.clear();

    info!(order_id = order.id, total = %order.total, lines = order.items.len(), "Order placed.");
    Ok(order)
  }
}

/// Validation pass. Pure: reads the catalog and the cart, returns either the
/// first failing line's error or the full snapshot.
pub(crate) fn validate_lines(products: &[Product], lines: &[CartLine]) -> Result<ValidatedOrder, CheckoutError> {
  if lines.is_empty() {
    return Err(CheckoutError::EmptyCart);
  }

  // Stock still available per catalog index after the lines seen so far.
  let mut remaining: HashMap<usize, u32> = HashMap::new();
  let mut reservations = Vec::with_capacity(lines.len());
  let mut items = Vec::with_capacity(lines.len());
  let mut total = Decimal::ZERO;

  for line in lines {
    let idx = products
      .iter()
      .position(|p| p.id == line.product_id)
      .ok_or(CheckoutError::ProductNotFound {
        product_id: line.product_id,
      })?;
    let product = &products[idx];
    let available = remaining.entry(idx).or_insert(product.stock);

    if *available < line.quantity {
      return Err(CheckoutError::InsufficientStock {
        product_id: product.id,
        product_name: product.name.clone(),
        requested: line.quantity,
        available: *available,
      });
    }
    *available -= line.quantity;

    let overflow = CheckoutError::TotalOverflow { product_id: product.id };
    let item = OrderItem::new(product.id, product.name.clone(), product.price, line.quantity).ok_or(overflow.clone())?;
    total = total.checked_add(item.subtotal).ok_or(overflow)?;
    items.push(item);
    reservations.push((idx, line.quantity));
  }

  Ok(ValidatedOrder {
    reservations,
    items,
    total,
  })
}
