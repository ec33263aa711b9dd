// server/tests/api_tests.rs

use actix_web::http::{header, StatusCode};
use actix_web::web::Data;
use actix_web::{test, App};
use serde_json::{json, Value};
use std::path::PathBuf;
use storefront::Role;
use storefront_server::services::auth_service;
use storefront_server::web::configure_app;
use storefront_server::{build_app_state, AppConfig, AppState};

const SECRET: &str = "test-secret";

fn test_state() -> AppState {
  let config = AppConfig {
    jwt_secret: SECRET.to_string(),
    static_dir: PathBuf::from("tests/no-such-static-dir"),
    ..AppConfig::default()
  };
  build_app_state(config).expect("app state")
}

macro_rules! spawn_app {
  () => {{
    let state = test_state();
    let static_dir = state.config.static_dir.clone();
    test::init_service(
      App::new()
        .app_data(Data::new(state))
        .configure(move |cfg| configure_app(cfg, &static_dir)),
    )
    .await
  }};
}

/// Sends a request and returns `(status, json body)`.
macro_rules! send {
  ($app:expr, $req:expr) => {{
    let resp = test::call_service(&$app, $req.to_request()).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
  }};
}

macro_rules! login {
  ($app:expr, $username:expr, $password:expr) => {{
    let (status, body) = send!(
      $app,
      test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": $username, "password": $password }))
    );
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().expect("token").to_string()
  }};
}

/// Prices travel as JSON numbers; compare them as money, not as bit patterns.
fn assert_close(value: &Value, expected: f64) {
  let actual = value.as_f64().unwrap_or_else(|| panic!("not a number: {}", value));
  assert!((actual - expected).abs() < 1e-6, "{} != {}", actual, expected);
}

fn bearer(token: &str) -> (header::HeaderName, String) {
  (header::AUTHORIZATION, format!("Bearer {}", token))
}

#[actix_web::test]
async fn register_then_login_yields_customer_token() {
  let app = spawn_app!();

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/auth/register")
      .set_json(json!({ "username": "alice", "password": "pw1" }))
  );
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["user"]["username"], "alice");
  assert_eq!(body["user"]["role"], "customer");
  assert!(body["user"].get("passwordHash").is_none());
  assert!(body["user"].get("password_hash").is_none());

  let token = login!(app, "alice", "pw1");
  let claims = auth_service::decode_token(&token, SECRET).unwrap();
  assert_eq!(claims.username, "alice");
  assert_eq!(claims.role, Role::Customer);
}

#[actix_web::test]
async fn registration_and_login_failures() {
  let app = spawn_app!();

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/auth/register")
      .set_json(json!({ "username": "customer", "password": "x" }))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Username already exists");

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/auth/login")
      .set_json(json!({ "username": "admin" }))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Username and password required");

  for (username, password) in [("admin", "wrong"), ("nobody", "admin123")] {
    let (status, body) = send!(
      app,
      test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": username, "password": password }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
  }
}

#[actix_web::test]
async fn product_listing_paginates_and_filters() {
  let app = spawn_app!();

  let (status, body) = send!(app, test::TestRequest::get().uri("/api/products?page=2&limit=10"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["products"], json!([]));
  assert_eq!(body["pagination"], json!({ "page": 2, "limit": 10, "total": 8, "totalPages": 1 }));

  let (_, body) = send!(app, test::TestRequest::get().uri("/api/products?limit=3"));
  assert_eq!(body["products"].as_array().map(Vec::len), Some(3));
  assert_eq!(body["pagination"]["totalPages"], 3);

  let (_, body) = send!(app, test::TestRequest::get().uri("/api/products?category=sports"));
  assert_eq!(body["products"][0]["name"], "Running Shoes");
  assert_close(&body["products"][0]["price"], 129.99);

  let (status, body) = send!(app, test::TestRequest::get().uri("/api/products/999"));
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Product not found");

  let (_, body) = send!(app, test::TestRequest::get().uri("/api/categories"));
  assert_eq!(body, json!(["Electronics", "Appliances", "Sports", "Accessories"]));
}

#[actix_web::test]
async fn admin_routes_check_token_and_role() {
  let app = spawn_app!();
  let new_product = json!({ "name": "Desk Lamp", "price": 24.5, "category": "Home", "stock": 12 });

  let (status, body) = send!(
    app,
    test::TestRequest::post().uri("/api/products").set_json(new_product.clone())
  );
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"], "Access token required");

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/products")
      .insert_header(bearer("not-a-jwt"))
      .set_json(new_product.clone())
  );
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert_eq!(body["error"], "Invalid token");

  let customer = login!(app, "customer", "customer123");
  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/products")
      .insert_header(bearer(&customer))
      .set_json(new_product.clone())
  );
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert_eq!(body["error"], "Admin access required");

  let (status, body) = send!(
    app,
    test::TestRequest::get().uri("/api/admin/orders").insert_header(bearer(&customer))
  );
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert_eq!(body["error"], "Admin access required");
}

#[actix_web::test]
async fn admin_manages_products() {
  let app = spawn_app!();
  let admin = login!(app, "admin", "admin123");

  let (status, created) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/products")
      .insert_header(bearer(&admin))
      .set_json(json!({ "name": "Desk Lamp", "price": 24.5, "category": "Home", "stock": 12 }))
  );
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["id"], 9);

  let (_, fetched) = send!(app, test::TestRequest::get().uri("/api/products/9"));
  assert_eq!(fetched, created);

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/products")
      .insert_header(bearer(&admin))
      .set_json(json!({ "name": "No Price", "category": "Home", "stock": 1 }))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "All fields are required");

  let (status, updated) = send!(
    app,
    test::TestRequest::put()
      .uri("/api/products/9")
      .insert_header(bearer(&admin))
      .set_json(json!({ "stock": 5 }))
  );
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["stock"], 5);
  assert_eq!(updated["name"], created["name"]);
  assert_eq!(updated["price"], created["price"]);
  assert_eq!(updated["category"], created["category"]);

  let (status, body) = send!(
    app,
    test::TestRequest::delete().uri("/api/products/9").insert_header(bearer(&admin))
  );
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Product deleted successfully");

  let (status, body) = send!(
    app,
    test::TestRequest::delete().uri("/api/products/9").insert_header(bearer(&admin))
  );
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Product not found");
}

#[actix_web::test]
async fn cart_lifecycle() {
  let app = spawn_app!();
  let token = login!(app, "customer", "customer123");

  let (status, first) = send!(app, test::TestRequest::get().uri("/api/cart").insert_header(bearer(&token)));
  assert_eq!(status, StatusCode::OK);
  let (_, second) = send!(app, test::TestRequest::get().uri("/api/cart").insert_header(bearer(&token)));
  assert_eq!(first, second);
  assert_eq!(first, json!([]));

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/cart")
      .insert_header(bearer(&token))
      .set_json(json!({ "productId": 6 }))
  );
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Item added to cart");

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/cart")
      .insert_header(bearer(&token))
      .set_json(json!({ "productId": 6, "quantity": 2 }))
  );
  assert_eq!(status, StatusCode::OK, "{}", body);

  let (_, cart) = send!(app, test::TestRequest::get().uri("/api/cart").insert_header(bearer(&token)));
  assert_eq!(cart[0]["productId"], 6);
  assert_eq!(cart[0]["quantity"], 3);
  assert_eq!(cart[0]["product"]["name"], "Backpack");

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/cart")
      .insert_header(bearer(&token))
      .set_json(json!({ "quantity": 1 }))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Product ID is required");

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/cart")
      .insert_header(bearer(&token))
      .set_json(json!({ "productId": 42 }))
  );
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Product not found");

  let (status, body) = send!(
    app,
    test::TestRequest::post()
      .uri("/api/cart")
      .insert_header(bearer(&token))
      .set_json(json!({ "productId": 7, "quantity": 26 }))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Insufficient stock");

  let (status, body) = send!(
    app,
    test::TestRequest::put()
      .uri("/api/cart/6")
      .insert_header(bearer(&token))
      .set_json(json!({ "quantity": 5 }))
  );
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Cart updated");

  let (status, body) = send!(
    app,
    test::TestRequest::delete().uri("/api/cart/6").insert_header(bearer(&token))
  );
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Item removed from cart");

  let (status, body) = send!(
    app,
    test::TestRequest::delete().uri("/api/cart/6").insert_header(bearer(&token))
  );
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Item not found in cart");
}

#[actix_web::test]
async fn placing_an_order_moves_cart_into_ledger() {
  let app = spawn_app!();
  let token = login!(app, "customer", "customer123");

  send!(
    app,
    test::TestRequest::post()
      .uri("/api/cart")
      .insert_header(bearer(&token))
      .set_json(json!({ "productId": 1, "quantity": 3 }))
  );

  let (status, order) = send!(app, test::TestRequest::post().uri("/api/orders").insert_header(bearer(&token)));
  assert_eq!(status, StatusCode::CREATED, "{}", order);
  assert_eq!(order["id"], 1);
  assert_eq!(order["status"], "pending");
  assert_close(&order["total"], 2999.97);
  assert_eq!(order["items"][0]["productName"], "Laptop");
  assert_close(&order["items"][0]["subtotal"], 2999.97);

  let (_, laptop) = send!(app, test::TestRequest::get().uri("/api/products/1"));
  assert_eq!(laptop["stock"], 47);

  let (_, cart) = send!(app, test::TestRequest::get().uri("/api/cart").insert_header(bearer(&token)));
  assert_eq!(cart, json!([]));

  let (_, mine) = send!(app, test::TestRequest::get().uri("/api/orders").insert_header(bearer(&token)));
  assert_eq!(mine, json!([order]));

  let (status, body) = send!(app, test::TestRequest::post().uri("/api/orders").insert_header(bearer(&token)));
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Cart is empty");

  let admin = login!(app, "admin", "admin123");
  let (status, all) = send!(app, test::TestRequest::get().uri("/api/admin/orders").insert_header(bearer(&admin)));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn short_stock_at_checkout_changes_nothing() {
  let app = spawn_app!();
  let token = login!(app, "customer", "customer123");
  let admin = login!(app, "admin", "admin123");

  for (product_id, quantity) in [(2, 2), (7, 5)] {
    send!(
      app,
      test::TestRequest::post()
        .uri("/api/cart")
        .insert_header(bearer(&token))
        .set_json(json!({ "productId": product_id, "quantity": quantity }))
    );
  }
  send!(
    app,
    test::TestRequest::put()
      .uri("/api/products/7")
      .insert_header(bearer(&admin))
      .set_json(json!({ "stock": 1 }))
  );

  let (status, body) = send!(app, test::TestRequest::post().uri("/api/orders").insert_header(bearer(&token)));
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Insufficient stock for Tablet");

  let (_, phone) = send!(app, test::TestRequest::get().uri("/api/products/2"));
  assert_eq!(phone["stock"], 100);
  let (_, cart) = send!(app, test::TestRequest::get().uri("/api/cart").insert_header(bearer(&token)));
  assert_eq!(cart.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn fresh_account_has_an_empty_cart() {
  let app = spawn_app!();
  send!(
    app,
    test::TestRequest::post()
      .uri("/api/auth/register")
      .set_json(json!({ "username": "bob", "password": "pw" }))
  );
  let token = login!(app, "bob", "pw");

  let (status, body) = send!(
    app,
    test::TestRequest::put()
      .uri("/api/cart/1")
      .insert_header(bearer(&token))
      .set_json(json!({ "quantity": 2 }))
  );
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Item not found in cart");
}

#[actix_web::test]
async fn cart_update_looks_up_the_line_before_the_quantity() {
  let app = spawn_app!();
  let token = login!(app, "customer", "customer123");

  let (status, body) = send!(
    app,
    test::TestRequest::put()
      .uri("/api/cart/3")
      .insert_header(bearer(&token))
      .set_json(json!({}))
  );
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Item not found in cart");

  send!(
    app,
    test::TestRequest::post()
      .uri("/api/cart")
      .insert_header(bearer(&token))
      .set_json(json!({ "productId": 3, "quantity": 1 }))
  );
  let (status, body) = send!(
    app,
    test::TestRequest::put()
      .uri("/api/cart/3")
      .insert_header(bearer(&token))
      .set_json(json!({}))
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Quantity is required");
}

#[actix_web::test]
async fn health_and_missing_front_end() {
  let app = spawn_app!();

  let (status, body) = send!(app, test::TestRequest::get().uri("/api/health"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "status": "ok" }));

  let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body = test::read_body(resp).await;
  assert_eq!(body, "Error loading the application");
}
