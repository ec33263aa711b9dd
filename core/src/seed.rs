// core/src/seed.rs

//! Demo data loaded at start-up unless disabled.

use crate::model::{Product, Role};
use rust_decimal::Decimal;

/// `(username, password, role)` of the accounts created on start-up.
pub const DEFAULT_ACCOUNTS: &[(&str, &str, Role)] = &[
  ("admin", "admin123", Role::Admin),
  ("customer", "customer123", Role::Customer),
];

pub fn default_products() -> Vec<Product> {
  let rows: [(&str, i64, &str, u32); 8] = [
    ("Laptop", 99999, "Electronics", 50),
    ("Smartphone", 69999, "Electronics", 100),
    ("Headphones", 19999, "Electronics", 75),
    ("Coffee Maker", 8999, "Appliances", 30),
    ("Running Shoes", 12999, "Sports", 60),
    ("Backpack", 4999, "Accessories", 40),
    ("Tablet", 39999, "Electronics", 25),
    ("Wireless Mouse", 2999, "Electronics", 80),
  ];

  rows
    .iter()
    .zip(1..)
    .map(|(&(name, cents, category, stock), id)| Product {
      id,
      name: name.to_string(),
      price: Decimal::new(cents, 2),
      category: category.to_string(),
      stock,
    })
    .collect()
}
