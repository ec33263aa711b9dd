// core/src/cart.rs

//! Per-user carts. Each cart sits behind its own mutex so the order
//! transaction can hold one user's cart without blocking anybody else's.

use crate::catalog::CatalogStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{CartLine, ProductId, UserId};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub(crate) type CartHandle = Arc<Mutex<Vec<CartLine>>>;

/// What `CartStore::set_quantity` did to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
  Updated(CartLine),
  Removed,
}

#[derive(Debug, Default)]
pub struct CartStore {
  carts: RwLock<HashMap<UserId, CartHandle>>,
}

impl CartStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn handle(&self, user_id: UserId) -> Option<CartHandle> {
    self.carts.read().get(&user_id).cloned()
  }

  fn handle_or_create(&self, user_id: UserId) -> CartHandle {
    if let Some(handle) = self.handle(user_id) {
      return handle;
    }
    self.carts.write().entry(user_id).or_default().clone()
  }

  /// Makes sure the user has a (possibly empty) cart.
  pub fn open(&self, user_id: UserId) {
    self.handle_or_create(user_id);
  }

  pub fn exists(&self, user_id: UserId) -> bool {
    self.carts.read().contains_key(&user_id)
  }

  /// Lines in insertion order; empty when the user never had a cart.
  pub fn get(&self, user_id: UserId) -> Vec<CartLine> {
    self.handle(user_id).map(|cart| cart.lock().clone()).unwrap_or_default()
  }

  /// Adds `quantity` of a product, merging into an existing line.
  ///
  /// The stock comparison only looks at the catalog as it is right now. It
  /// does not reserve anything; the order transaction re-checks.
  #[instrument(name = "cart::add_item", skip(self, catalog))]
  pub fn add_item(
    &self,
    catalog: &CatalogStore,
    user_id: UserId,
    product_id: ProductId,
    quantity: u32,
  ) -> StoreResult<CartLine> {
    if quantity == 0 {
      return Err(StoreError::Validation("Quantity must be at least 1".to_string()));
    }
    let product = catalog.get(product_id)?;
    if product.stock < quantity {
      warn!(available = product.stock, requested = quantity, "Not enough stock to add to cart.");
      return Err(StoreError::InsufficientStock {
        product_id,
        requested: quantity,
        available: product.stock,
      });
    }

    let cart = self.handle_or_create(user_id);
    let mut lines = cart.lock();
    let line = match lines.iter_mut().find(|line| line.product_id == product_id) {
      Some(existing) => {
        existing.quantity = existing
          .quantity
          .checked_add(quantity)
          .ok_or_else(|| StoreError::Validation("Quantity is too large".to_string()))?;
        *existing
      }
      None => {
        let line = CartLine { product_id, quantity };
        lines.push(line);
        line
      }
    };
    debug!(new_quantity = line.quantity, "Cart line stored.");
    Ok(line)
  }

  /// Overwrites a line's quantity, or removes the line when `quantity <= 0`.
  #[instrument(name = "cart::set_quantity", skip(self))]
  pub fn set_quantity(&self, user_id: UserId, product_id: ProductId, quantity: i64) -> StoreResult<QuantityChange> {
    let cart = self.handle(user_id).ok_or(StoreError::CartNotFound { user_id })?;
    let mut lines = cart.lock();
    let idx = find_line(&lines, user_id, product_id)?;

    if quantity <= 0 {
      lines.remove(idx);
      return Ok(QuantityChange::Removed);
    }
    let quantity = u32::try_from(quantity).map_err(|_| StoreError::Validation("Quantity is too large".to_string()))?;
    lines[idx].quantity = quantity;
    Ok(QuantityChange::Updated(lines[idx]))
  }

  #[instrument(name = "cart::remove_item", skip(self))]
  pub fn remove_item(&self, user_id: UserId, product_id: ProductId) -> StoreResult<CartLine> {
    let cart = self.handle(user_id).ok_or(StoreError::CartNotFound { user_id })?;
    let mut lines = cart.lock();
    let idx = find_line(&lines, user_id, product_id)?;
    Ok(lines.remove(idx))
  }

  /// The line for `product_id`, distinguishing a missing cart from a missing line.
  pub fn line(&self, user_id: UserId, product_id: ProductId) -> StoreResult<CartLine> {
    let cart = self.handle(user_id).ok_or(StoreError::CartNotFound { user_id })?;
    let lines = cart.lock();
    let idx = find_line(&lines, user_id, product_id)?;
    Ok(lines[idx])
  }
}

fn find_line(lines: &[CartLine], user_id: UserId, product_id: ProductId) -> StoreResult<usize> {
  lines
    .iter()
    .position(|line| line.product_id == product_id)
    .ok_or(StoreError::CartLineNotFound { user_id, product_id })
}
