// core/src/storefront.rs

use crate::cart::{CartStore, QuantityChange};
use crate::catalog::CatalogStore;
use crate::checkout::OrderTransaction;
use crate::error::{CheckoutError, StoreResult};
use crate::ledger::OrderLedger;
use crate::model::{CartEntry, CartLine, Order, Product, ProductId, UserId};
use crate::users::UserDirectory;

/// All in-memory state of the shop, built once at start-up and shared by
/// reference with every request.
#[derive(Debug, Default)]
pub struct Storefront {
  catalog: CatalogStore,
  carts: CartStore,
  orders: OrderLedger,
  users: UserDirectory,
}

impl Storefront {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: Vec<Product>) -> Self {
    Self {
      catalog: CatalogStore::with_products(products),
      ..Self::default()
    }
  }

  pub fn catalog(&self) -> &CatalogStore {
    &self.catalog
  }

  pub fn carts(&self) -> &CartStore {
    &self.carts
  }

  pub fn orders(&self) -> &OrderLedger {
    &self.orders
  }

  pub fn users(&self) -> &UserDirectory {
    &self.users
  }

  pub fn add_to_cart(&self, user_id: UserId, product_id: ProductId, quantity: u32) -> StoreResult<CartLine> {
    self.carts.add_item(&self.catalog, user_id, product_id, quantity)
  }

  pub fn set_cart_quantity(&self, user_id: UserId, product_id: ProductId, quantity: i64) -> StoreResult<QuantityChange> {
    self.carts.set_quantity(user_id, product_id, quantity)
  }

  pub fn remove_from_cart(&self, user_id: UserId, product_id: ProductId) -> StoreResult<CartLine> {
    self.carts.remove_item(user_id, product_id)
  }

  /// The user's cart joined with the current catalog.
  pub fn cart_view(&self, user_id: UserId) -> Vec<CartEntry> {
    self
      .carts
      .get(user_id)
      .into_iter()
      .map(|line| CartEntry {
        product_id: line.product_id,
        quantity: line.quantity,
        product: self.catalog.get(line.product_id).ok(),
      })
      .collect()
  }

  pub fn place_order(&self, user_id: UserId) -> Result<Order, CheckoutError> {
    OrderTransaction::new(&self.catalog, &self.carts, &self.orders).place(user_id)
  }
}
