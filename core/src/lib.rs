// core/src/lib.rs

//! Storefront: the shopping-cart domain behind the storefront API.
//!
//! The crate provides:
//!  - Cart, line-item and product models with their JSON shapes.
//!  - Sales-tax pricing applied to lines as they enter a cart.
//!  - `CartStore` / `ProductStore`, async seams over a document-style store, with an
//!    in-memory implementation.
//!  - `CartService`, the create/add/remove/delete/decrement operations.
//!
//! Errors are typed internally (`CartError`) so callers can log the cause while
//! presenting a single failure to clients.

pub mod error;
pub mod model;
pub mod pricing;
pub mod service;
pub mod store;

pub use crate::error::{CartError, CartResult};
pub use crate::model::{
  Cart, CartId, CartItem, CartItemStatus, CartLine, ItemSnapshot, NewCart, Product, ProductId, ProductSnapshot,
  StockDecrement, UserId,
};
pub use crate::pricing::{SalesTax, DEFAULT_TAX_RATE};
pub use crate::service::CartService;
pub use crate::store::{CartStore, MemoryStore, ProductStore, WriteOutcome};
