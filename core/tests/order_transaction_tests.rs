// tests/order_transaction_tests.rs
mod common;

use common::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Barrier};
use std::thread;
use storefront::{CartLine, CheckoutError, OrderStatus, Storefront};

const USER: u64 = 42;

#[test]
fn successful_order_decrements_stock_and_empties_cart() {
  setup_tracing();
  let (shop, products) = shop_with(&[product_fields("A", dec!(10.00), 10)]);
  let a = &products[0];
  shop.add_to_cart(USER, a.id, 3).unwrap();

  let order = shop.place_order(USER).unwrap();

  assert_eq!(order.id, 1);
  assert_eq!(order.user_id, USER);
  assert_eq!(order.status, OrderStatus::Pending);
  assert_eq!(order.total, dec!(30.00));
  assert_eq!(order.items[0].subtotal, dec!(30.00));
  assert_eq!(order.items[0].product_name, "A");
  assert_eq!(shop.catalog().get(a.id).unwrap().stock, 7);
  assert!(shop.carts().get(USER).is_empty());
  assert!(shop.carts().exists(USER));
  assert_eq!(shop.orders().list_for_user(USER), vec![order]);
}

#[test]
fn failed_validation_leaves_everything_untouched() {
  setup_tracing();
  let (shop, products) = shop_with(&[product_fields("A", dec!(5.00), 10), product_fields("B", dec!(1.00), 999_999)]);
  let (a, b) = (&products[0], &products[1]);
  shop.add_to_cart(USER, a.id, 2).unwrap();
  shop.add_to_cart(USER, b.id, 999_999).unwrap();
  // Someone else bought B in the meantime.
  shop
    .catalog()
    .update(
      b.id,
      storefront::ProductPatch {
        stock: Some(3),
        ..Default::default()
      },
    )
    .unwrap();

  let err = shop.place_order(USER).unwrap_err();

  assert_eq!(
    err,
    CheckoutError::InsufficientStock {
      product_id: b.id,
      product_name: "B".to_string(),
      requested: 999_999,
      available: 3,
    }
  );
  assert_eq!(err.to_string(), "Insufficient stock for B");
  assert_eq!(shop.catalog().get(a.id).unwrap().stock, 10);
  assert_eq!(shop.catalog().get(b.id).unwrap().stock, 3);
  assert!(shop.orders().is_empty());
  assert_eq!(
    shop.carts().get(USER),
    vec![
      CartLine { product_id: a.id, quantity: 2 },
      CartLine { product_id: b.id, quantity: 999_999 },
    ]
  );
}

#[test]
fn deleted_product_in_cart_fails_the_order() {
  setup_tracing();
  let (shop, products) = shop_with(&[product_fields("A", dec!(1.00), 5), product_fields("B", dec!(1.00), 5)]);
  shop.add_to_cart(USER, products[0].id, 1).unwrap();
  shop.add_to_cart(USER, products[1].id, 1).unwrap();
  shop.catalog().delete(products[1].id).unwrap();

  let err = shop.place_order(USER).unwrap_err();
  assert_eq!(err, CheckoutError::ProductNotFound { product_id: products[1].id });
  assert_eq!(err.to_string(), format!("Product {} not found", products[1].id));
  assert_eq!(shop.catalog().get(products[0].id).unwrap().stock, 5);
}

#[test]
fn overflowing_total_is_rejected_without_side_effects() {
  setup_tracing();
  let price = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
  let (shop, products) = shop_with(&[product_fields("Yacht", price, 5), product_fields("Rope", dec!(2.00), 5)]);
  let (yacht, rope) = (&products[0], &products[1]);
  shop.add_to_cart(USER, rope.id, 1).unwrap();
  shop.add_to_cart(USER, yacht.id, 2).unwrap();

  let err = shop.place_order(USER).unwrap_err();

  assert_eq!(err, CheckoutError::TotalOverflow { product_id: yacht.id });
  assert_eq!(shop.catalog().get(yacht.id).unwrap().stock, 5);
  assert_eq!(shop.catalog().get(rope.id).unwrap().stock, 5);
  assert!(shop.orders().is_empty());
  assert_eq!(shop.carts().get(USER).len(), 2);

  // Locks were released: the user can fix the cart and order.
  shop.remove_from_cart(USER, yacht.id).unwrap();
  let order = shop.place_order(USER).unwrap();
  assert_eq!(order.total, dec!(2.00));
  assert_eq!(shop.catalog().get(rope.id).unwrap().stock, 4);
}

#[test]
fn empty_or_missing_cart_is_rejected() {
  setup_tracing();
  let shop = Storefront::with_products(storefront::seed::default_products());
  assert_eq!(shop.place_order(USER), Err(CheckoutError::EmptyCart));

  shop.carts().open(USER);
  assert_eq!(shop.place_order(USER), Err(CheckoutError::EmptyCart));
}

#[test]
fn order_snapshot_survives_price_change() {
  setup_tracing();
  let (shop, products) = shop_with(&[product_fields("Lamp", dec!(20.00), 3)]);
  shop.add_to_cart(USER, products[0].id, 1).unwrap();
  let order = shop.place_order(USER).unwrap();

  shop
    .catalog()
    .update(
      products[0].id,
      storefront::ProductPatch {
        price: Some(dec!(99.00)),
        name: Some("Fancy Lamp".to_string()),
        ..Default::default()
      },
    )
    .unwrap();

  let stored = &shop.orders().list_all()[0];
  assert_eq!(stored, &order);
  assert_eq!(stored.items[0].price, dec!(20.00));
  assert_eq!(stored.items[0].product_name, "Lamp");
}

#[test]
fn order_ids_are_never_reused() {
  setup_tracing();
  let (shop, products) = shop_with(&[product_fields("A", dec!(1.00), 10)]);
  let mut ids = Vec::new();
  for user in [1, 2, 1] {
    shop.add_to_cart(user, products[0].id, 1).unwrap();
    ids.push(shop.place_order(user).unwrap().id);
  }
  assert_eq!(ids, vec![1, 2, 3]);
  assert_eq!(shop.orders().list_for_user(1).len(), 2);
}

#[test]
fn concurrent_orders_never_oversell() {
  setup_tracing();
  let (shop, products) = shop_with(&[product_fields("Last One", dec!(15.00), 1)]);
  let product_id = products[0].id;
  let shop = Arc::new(shop);
  for user in [1, 2] {
    shop.add_to_cart(user, product_id, 1).unwrap();
  }

  let barrier = Arc::new(Barrier::new(2));
  let workers: Vec<_> = [1u64, 2]
    .into_iter()
    .map(|user| {
      let shop = Arc::clone(&shop);
      let barrier = Arc::clone(&barrier);
      thread::spawn(move || {
        barrier.wait();
        shop.place_order(user)
      })
    })
    .collect();
  let outcomes: Vec<_> = workers.into_iter().map(|w| w.join().expect("worker panicked")).collect();

  let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
  assert_eq!(succeeded, 1);
  assert!(outcomes
    .iter()
    .any(|o| matches!(o, Err(CheckoutError::InsufficientStock { available: 0, .. }))));
  assert_eq!(shop.catalog().get(product_id).unwrap().stock, 0);
  assert_eq!(shop.orders().len(), 1);
}

#[test]
fn many_concurrent_buyers_sell_exactly_the_stock() {
  setup_tracing();
  let (shop, products) = shop_with(&[product_fields("Widget", dec!(2.00), 25)]);
  let product_id = products[0].id;
  let shop = Arc::new(shop);
  let buyers: Vec<u64> = (1..=40).collect();
  for &user in &buyers {
    shop.add_to_cart(user, product_id, 1).unwrap();
  }

  let handles: Vec<_> = buyers
    .into_iter()
    .map(|user| {
      let shop = Arc::clone(&shop);
      thread::spawn(move || shop.place_order(user).is_ok())
    })
    .collect();
  let sold = handles.into_iter().map(|h| h.join().expect("worker panicked")).filter(|ok| *ok).count();

  assert_eq!(sold, 25);
  assert_eq!(shop.catalog().get(product_id).unwrap().stock, 0);
  assert_eq!(shop.orders().len(), 25);
}
