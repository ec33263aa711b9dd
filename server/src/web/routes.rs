// server/src/web/routes.rs

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, cart_handlers, order_handlers, product_handlers, static_handlers};
use actix_web::web;
use std::path::Path;

/// Registers extractor error handlers, the `/api` routes and the static
/// front-end served from `static_dir`.
pub fn configure_app(cfg: &mut web::ServiceConfig, static_dir: &Path) {
  cfg
    .app_data(
      web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
      web::PathConfig::default().error_handler(|err, _req| AppError::NotFound(format!("Invalid path: {}", err)).into()),
    )
    .app_data(
      web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );

  configure_api_routes(cfg);

  cfg
    .route("/", web::get().to(static_handlers::index_handler))
    .service(actix_files::Files::new("/", static_dir));
}

pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(static_handlers::health_check_handler))
      .service(
        web::scope("/auth")
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/register", web::post().to(auth_handlers::register_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/{product_id}", web::put().to(cart_handlers::update_cart_item_handler))
          .route("/{product_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      .service(
        web::scope("/orders")
          .route("", web::post().to(order_handlers::place_order_handler))
          .route("", web::get().to(order_handlers::list_my_orders_handler)),
      )
      .route("/admin/orders", web::get().to(order_handlers::list_all_orders_handler))
      .route("/categories", web::get().to(product_handlers::list_categories_handler)),
  );
}
