// core/src/model/mod.rs

//! Data structures stored by the cart and product stores.

pub mod cart;
pub mod ids;
pub mod product;

pub use cart::{Cart, CartItem, CartItemStatus, CartLine, ItemSnapshot, NewCart};
pub use ids::{CartId, ProductId, UserId};
pub use product::{Product, ProductSnapshot, StockDecrement};
