// core/src/model/mod.rs

//! Plain data types shared by the stores and the HTTP layer.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartEntry, CartLine};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{Role, User};

pub type ProductId = u64;
pub type UserId = u64;
pub type OrderId = u64;
