// core/src/store/recording.rs

//! A store that records every call it receives and fails on request.
//! Enabled for this crate's unit tests and, for other crates, through the
//! `test-util` feature.

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;

use super::{CartStore, ProductStore, WriteOutcome};
use crate::model::{CartId, ItemSnapshot, NewCart, ProductId, StockDecrement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
  Insert,
  PushItem,
  PullItems,
  Delete,
  BulkDecrement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
  Insert(NewCart),
  PushItem { cart_id: CartId, item: ItemSnapshot },
  PullItems { cart_id: CartId, product_id: ProductId },
  Delete { cart_id: CartId },
  BulkDecrement(Vec<StockDecrement>),
}

#[derive(Debug)]
pub struct RecordingStore {
  calls: Mutex<Vec<StoreCall>>,
  failing: Mutex<HashSet<StoreOp>>,
  assigned_id: CartId,
}

impl RecordingStore {
  pub fn new() -> Self {
    Self::with_cart_id("cart123")
  }

  /// Every `insert` answers with this id.
  pub fn with_cart_id(id: impl Into<CartId>) -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      failing: Mutex::new(HashSet::new()),
      assigned_id: id.into(),
    }
  }

  pub fn fail_on(self, op: StoreOp) -> Self {
    self.failing.lock().insert(op);
    self
  }

  pub fn calls(&self) -> Vec<StoreCall> {
    self.calls.lock().clone()
  }

  fn record(&self, op: StoreOp, call: StoreCall) -> anyhow::Result<()> {
    self.calls.lock().push(call);
    if self.failing.lock().contains(&op) {
      return Err(anyhow!("simulated {:?} failure", op));
    }
    Ok(())
  }
}

impl Default for RecordingStore {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl CartStore for RecordingStore {
  async fn insert(&self, cart: NewCart) -> anyhow::Result<CartId> {
    self.record(StoreOp::Insert, StoreCall::Insert(cart))?;
    Ok(self.assigned_id.clone())
  }

  async fn push_item(&self, cart_id: &CartId, item: ItemSnapshot) -> anyhow::Result<WriteOutcome> {
    self.record(
      StoreOp::PushItem,
      StoreCall::PushItem {
        cart_id: cart_id.clone(),
        item,
      },
    )?;
    Ok(WriteOutcome::new(1, 1))
  }

  async fn pull_items(&self, cart_id: &CartId, product_id: &ProductId) -> anyhow::Result<WriteOutcome> {
    self.record(
      StoreOp::PullItems,
      StoreCall::PullItems {
        cart_id: cart_id.clone(),
        product_id: product_id.clone(),
      },
    )?;
    Ok(WriteOutcome::new(1, 1))
  }

  async fn delete(&self, cart_id: &CartId) -> anyhow::Result<WriteOutcome> {
    self.record(StoreOp::Delete, StoreCall::Delete { cart_id: cart_id.clone() })?;
    Ok(WriteOutcome::new(1, 1))
  }
}

#[async_trait]
impl ProductStore for RecordingStore {
  async fn bulk_decrement(&self, ops: Vec<StockDecrement>) -> anyhow::Result<WriteOutcome> {
    let count = ops.len() as u64;
    self.record(StoreOp::BulkDecrement, StoreCall::BulkDecrement(ops))?;
    Ok(WriteOutcome::new(count, count))
  }
}
