// core/src/catalog.rs

//! The product catalog: an in-memory list guarded by one `RwLock`.

use crate::error::{StoreError, StoreResult};
use crate::model::{NewProduct, Product, ProductId, ProductPatch};
use parking_lot::{RwLock, RwLockWriteGuard};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Optional filters for `CatalogStore::list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
  /// Case-insensitive substring of the name or the category.
  pub search: Option<String>,
  /// Case-insensitive exact category.
  pub category: Option<String>,
}

impl ProductFilter {
  fn matches(&self, product: &Product) -> bool {
    let search_ok = self.search.as_deref().map_or(true, |needle| {
      let needle = needle.to_lowercase();
      product.name.to_lowercase().contains(&needle) || product.category.to_lowercase().contains(&needle)
    });
    let category_ok = self
      .category
      .as_deref()
      .map_or(true, |category| product.category.to_lowercase() == category.to_lowercase());
    search_ok && category_ok
  }
}

/// 1-based, offset pagination. Zero values are raised to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u32,
  pub limit: u32,
}

impl PageRequest {
  pub fn new(page: u32, limit: u32) -> Self {
    Self {
      page: page.max(1),
      limit: limit.max(1),
    }
  }

  fn offset(&self) -> usize {
    (self.page as usize - 1).saturating_mul(self.limit as usize)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
  }
}

/// One page of a filtered listing plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
  pub items: Vec<Product>,
  pub total: usize,
  pub page: u32,
  pub limit: u32,
}

impl ProductPage {
  pub fn total_pages(&self) -> usize {
    self.total.div_ceil(self.limit as usize)
  }
}

#[derive(Debug, Default)]
pub struct CatalogStore {
  products: RwLock<Vec<Product>>,
}

impl CatalogStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: Vec<Product>) -> Self {
    Self {
      products: RwLock::new(products),
    }
  }

  /// Filters in catalog order, then slices out the requested page. A page
  /// past the end is empty rather than an error.
  #[instrument(name = "catalog::list", skip(self))]
  pub fn list(&self, filter: &ProductFilter, page: PageRequest) -> ProductPage {
    let products = self.products.read();
    let matching: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    let total = matching.len();
    let items = matching
      .into_iter()
      .skip(page.offset())
      .take(page.limit as usize)
      .cloned()
      .collect::<Vec<_>>();
    debug!(total, returned = items.len(), "Catalog listing computed.");
    ProductPage {
      items,
      total,
      page: page.page,
      limit: page.limit,
    }
  }

  pub fn get(&self, id: ProductId) -> StoreResult<Product> {
    self
      .products
      .read()
      .iter()
      .find(|p| p.id == id)
      .cloned()
      .ok_or(StoreError::ProductNotFound { product_id: id })
  }

  pub fn len(&self) -> usize {
    self.products.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.read().is_empty()
  }

  /// Adds a product with id `max(existing) + 1`, or 1 for an empty catalog.
  #[instrument(name = "catalog::create", skip(self, new_product), fields(name = %new_product.name))]
  pub fn create(&self, new_product: NewProduct) -> StoreResult<Product> {
    ensure_price(new_product.price)?;
    let mut products = self.products.write();
    let id = products.iter().map(|p| p.id).max().map_or(1, |max| max + 1);
    let product = Product {
      id,
      name: new_product.name,
      price: new_product.price,
      category: new_product.category,
      stock: new_product.stock,
    };
    products.push(product.clone());
    info!(product_id = id, "Product created.");
    Ok(product)
  }

  /// Overwrites only the fields present in `patch`.
  #[instrument(name = "catalog::update", skip(self, patch))]
  pub fn update(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
    if let Some(price) = patch.price {
      ensure_price(price)?;
    }
    let mut products = self.products.write();
    let product = products
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or(StoreError::ProductNotFound { product_id: id })?;

    if let Some(name) = patch.name {
      product.name = name;
    }
    if let Some(price) = patch.price {
      product.price = price;
    }
    if let Some(category) = patch.category {
      product.category = category;
    }
    if let Some(stock) = patch.stock {
      product.stock = stock;
    }
    info!(product_id = id, "Product updated.");
    Ok(product.clone())
  }

  /// Removes the product. Carts and past orders that reference it are left
  /// alone.
  #[instrument(name = "catalog::delete", skip(self))]
  pub fn delete(&self, id: ProductId) -> StoreResult<Product> {
    let mut products = self.products.write();
    let idx = products
      .iter()
      .position(|p| p.id == id)
      .ok_or(StoreError::ProductNotFound { product_id: id })?;
    let removed = products.remove(idx);
    info!(product_id = id, "Product deleted.");
    Ok(removed)
  }

  /// Distinct categories in first-seen catalog order.
  pub fn categories(&self) -> Vec<String> {
    let products = self.products.read();
    let mut categories: Vec<String> = Vec::new();
    for product in products.iter() {
      if !categories.contains(&product.category) {
        categories.push(product.category.clone());
      }
    }
    categories
  }

  /// Exclusive access for the order transaction's validate-then-commit passes.
  pub(crate) fn lock_for_checkout(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
    self.products.write()
  }
}

fn ensure_price(price: Decimal) -> StoreResult<()> {
  if price < Decimal::ZERO {
    return Err(StoreError::Validation("Price must not be negative".to_string()));
  }
  Ok(())
}
