// core/src/store/mod.rs

//! Persistence seams used by the cart service.
//!
//! Both traits mirror the primitives of a document store: whole-document insert,
//! atomic array push/pull on one document, delete by id, and an ordered batch of
//! per-document increments. Backends wrap their driver errors in `anyhow::Error`.

pub mod memory;
#[cfg(any(test, feature = "test-util"))]
pub mod recording;

use async_trait::async_trait;

use crate::model::{CartId, ItemSnapshot, NewCart, ProductId, StockDecrement};

pub use memory::MemoryStore;

/// Match/modify counts reported by a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOutcome {
  pub matched: u64,
  pub modified: u64,
}

impl WriteOutcome {
  pub fn new(matched: u64, modified: u64) -> Self {
    Self { matched, modified }
  }
}

#[async_trait]
pub trait CartStore: Send + Sync {
  /// Persists a new cart and returns the id the store assigned to it.
  async fn insert(&self, cart: NewCart) -> anyhow::Result<CartId>;

  /// Appends `item` unchanged to the cart's product list in one atomic update.
  async fn push_item(&self, cart_id: &CartId, item: ItemSnapshot) -> anyhow::Result<WriteOutcome>;

  /// Removes every line referencing `product_id` in one atomic update.
  async fn pull_items(&self, cart_id: &CartId, product_id: &ProductId) -> anyhow::Result<WriteOutcome>;

  async fn delete(&self, cart_id: &CartId) -> anyhow::Result<WriteOutcome>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Applies each decrement in order. No floor is enforced, and a failure part way
  /// leaves the earlier decrements applied.
  async fn bulk_decrement(&self, ops: Vec<StockDecrement>) -> anyhow::Result<WriteOutcome>;
}
