// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use storefront::{NewProduct, PageRequest, Product, ProductFilter, ProductId, ProductPage, ProductPatch};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::extractors::AdminUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug, Default)]
pub struct ListProductsQuery {
  pub page: Option<u32>,
  pub limit: Option<u32>,
  pub search: Option<String>,
  pub category: Option<String>,
}

impl ListProductsQuery {
  fn into_parts(self) -> (ProductFilter, PageRequest) {
    let defaults = PageRequest::default();
    let filter = ProductFilter {
      search: non_empty(self.search),
      category: non_empty(self.category),
    };
    let page = PageRequest::new(self.page.unwrap_or(defaults.page), self.limit.unwrap_or(defaults.limit));
    (filter, page)
  }
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateProductPayload {
  pub name: Option<String>,
  pub price: Option<Decimal>,
  pub category: Option<String>,
  pub stock: Option<i64>,
}

impl CreateProductPayload {
  pub fn validate(self) -> Result<NewProduct> {
    let all_required = || AppError::Validation("All fields are required".to_string());
    let name = non_empty(self.name).ok_or_else(all_required)?;
    let price = self.price.ok_or_else(all_required)?;
    let category = non_empty(self.category).ok_or_else(all_required)?;
    let stock = stock_from(self.stock.ok_or_else(all_required)?)?;
    Ok(NewProduct {
      name,
      price,
      category,
      stock,
    })
  }
}

/// Every field optional. A present zero price or stock is applied; empty
/// strings are ignored.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateProductPayload {
  pub name: Option<String>,
  pub price: Option<Decimal>,
  pub category: Option<String>,
  pub stock: Option<i64>,
}

impl UpdateProductPayload {
  pub fn validate(self) -> Result<ProductPatch> {
    Ok(ProductPatch {
      name: non_empty(self.name),
      price: self.price,
      category: non_empty(self.category),
      stock: self.stock.map(stock_from).transpose()?,
    })
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.is_empty())
}

fn stock_from(raw: i64) -> Result<u32> {
  u32::try_from(raw).map_err(|_| AppError::Validation("Stock must be a non-negative integer".to_string()))
}

// --- Response DTOs ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub page: u32,
  pub limit: u32,
  pub total: usize,
  pub total_pages: usize,
}

#[derive(Serialize, Debug)]
pub struct ProductListResponse {
  pub products: Vec<Product>,
  pub pagination: Pagination,
}

impl From<ProductPage> for ProductListResponse {
  fn from(page: ProductPage) -> Self {
    let pagination = Pagination {
      page: page.page,
      limit: page.limit,
      total: page.total,
      total_pages: page.total_pages(),
    };
    Self {
      products: page.items,
      pagination,
    }
  }
}

// --- Handlers ---

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse> {
  let (filter, page) = query.into_inner().into_parts();
  let listing = app_state.store.catalog().list(&filter, page);
  Ok(HttpResponse::Ok().json(ProductListResponse::from(listing)))
}

#[instrument(name = "handler::get_product", skip(app_state))]
pub async fn get_product_handler(app_state: web::Data<AppState>, path: web::Path<ProductId>) -> Result<HttpResponse> {
  let product = app_state.store.catalog().get(path.into_inner())?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::create_product", skip_all, fields(admin_id = admin.0.id))]
pub async fn create_product_handler(
  admin: AdminUser,
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateProductPayload>,
) -> Result<HttpResponse> {
  let new_product = req_payload.into_inner().validate()?;
  let product = app_state.store.catalog().create(new_product)?;
  info!(product_id = product.id, "Product created by admin.");
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip_all, fields(admin_id = admin.0.id, product_id = *path))]
pub async fn update_product_handler(
  admin: AdminUser,
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
  req_payload: web::Json<UpdateProductPayload>,
) -> Result<HttpResponse> {
  let patch = req_payload.into_inner().validate()?;
  let product = app_state.store.catalog().update(path.into_inner(), patch)?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::delete_product", skip_all, fields(admin_id = admin.0.id, product_id = *path))]
pub async fn delete_product_handler(
  admin: AdminUser,
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
) -> Result<HttpResponse> {
  app_state.store.catalog().delete(path.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })))
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(app_state.store.catalog().categories())
}
