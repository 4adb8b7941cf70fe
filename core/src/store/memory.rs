// core/src/store/memory.rs

//! In-process store for development and tests.
//!
//! Each trait call takes the relevant `parking_lot` lock once and releases it
//! before returning, so every call is atomic on its own and no guard is held
//! across an `.await`.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{event, Level};

use super::{CartStore, ProductStore, WriteOutcome};
use crate::model::{Cart, CartId, CartLine, ItemSnapshot, NewCart, Product, ProductId, StockDecrement};

#[derive(Debug, Default)]
pub struct MemoryStore {
  carts: RwLock<HashMap<CartId, Cart>>,
  products: RwLock<HashMap<ProductId, Product>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
    let store = Self::new();
    for product in products {
      store.upsert_product(product);
    }
    store
  }

  pub fn upsert_product(&self, product: Product) {
    self.products.write().insert(product.id.clone(), product);
  }

  pub fn product(&self, id: &ProductId) -> Option<Product> {
    self.products.read().get(id).cloned()
  }

  pub fn cart(&self, id: &CartId) -> Option<Cart> {
    self.carts.read().get(id).cloned()
  }

  pub fn cart_count(&self) -> usize {
    self.carts.read().len()
  }
}

#[async_trait]
impl CartStore for MemoryStore {
  async fn insert(&self, cart: NewCart) -> anyhow::Result<CartId> {
    let id = CartId::generate();
    self.carts.write().insert(id.clone(), Cart::from_new(id.clone(), cart));
    event!(Level::TRACE, cart_id = %id, "Cart inserted.");
    Ok(id)
  }

  async fn push_item(&self, cart_id: &CartId, item: ItemSnapshot) -> anyhow::Result<WriteOutcome> {
    let mut carts = self.carts.write();
    match carts.get_mut(cart_id) {
      Some(cart) => {
        cart.products.push(CartLine::Snapshot(item));
        cart.updated = Utc::now();
        Ok(WriteOutcome::new(1, 1))
      }
      None => Ok(WriteOutcome::default()),
    }
  }

  async fn pull_items(&self, cart_id: &CartId, product_id: &ProductId) -> anyhow::Result<WriteOutcome> {
    let mut carts = self.carts.write();
    match carts.get_mut(cart_id) {
      Some(cart) => {
        let before = cart.products.len();
        cart.products.retain(|line| !line.references(product_id));
        let modified = u64::from(cart.products.len() != before);
        if modified > 0 {
          cart.updated = Utc::now();
        }
        Ok(WriteOutcome::new(1, modified))
      }
      None => Ok(WriteOutcome::default()),
    }
  }

  async fn delete(&self, cart_id: &CartId) -> anyhow::Result<WriteOutcome> {
    let removed = u64::from(self.carts.write().remove(cart_id).is_some());
    Ok(WriteOutcome::new(removed, removed))
  }
}

#[async_trait]
impl ProductStore for MemoryStore {
  async fn bulk_decrement(&self, ops: Vec<StockDecrement>) -> anyhow::Result<WriteOutcome> {
    let mut products = self.products.write();
    let mut outcome = WriteOutcome::default();
    for op in ops {
      if let Some(product) = products.get_mut(&op.product) {
        outcome.matched += 1;
        if op.quantity > 0 {
          product.quantity -= i64::from(op.quantity);
          outcome.modified += 1;
        }
      }
    }
    Ok(outcome)
  }
}
