// core/src/lib.rs

//! In-memory storefront: product catalog, per-user carts, an append-only order
//! ledger and the order transaction that ties them together.
//!
//! The `flow` module is a small async workflow engine the HTTP layer uses to
//! run multi-step requests (sign-up, sign-in, add-to-cart, checkout) as named
//! steps over a shared context.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod flow;
pub mod ledger;
pub mod model;
pub mod seed;
pub mod storefront;
pub mod users;

pub use crate::cart::{CartStore, QuantityChange};
pub use crate::catalog::{CatalogStore, PageRequest, ProductFilter, ProductPage};
pub use crate::checkout::OrderTransaction;
pub use crate::error::{CheckoutError, FlowError, StoreError, StoreResult};
pub use crate::flow::{ContextData, FlowRegistry, Handler, Pipeline, PipelineControl, PipelineResult, StepDef};
pub use crate::ledger::OrderLedger;
pub use crate::model::{
  CartEntry, CartLine, NewProduct, Order, OrderId, OrderItem, OrderStatus, Product, ProductId, ProductPatch, Role,
  User, UserId,
};
pub use crate::storefront::Storefront;
pub use crate::users::UserDirectory;
