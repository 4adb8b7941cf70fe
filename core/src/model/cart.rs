// core/src/model/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{CartId, ProductId, UserId};

/// Fulfilment state of a single line item. The wire strings match what order
/// views display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CartItemStatus {
  #[default]
  #[serde(rename = "Not processed")]
  NotProcessed,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}

/// A priced product line, as written when a cart is created. Name, sku and price
/// are copied from the product at that moment and are never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CartItem {
  pub product: ProductId,
  pub quantity: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sku: Option<String>,
  #[serde(default)]
  pub purchase_price: f64,
  #[serde(default)]
  pub total_price: f64,
  #[serde(default)]
  pub price_with_tax: f64,
  #[serde(default)]
  pub total_tax: f64,
  #[serde(default)]
  pub status: CartItemStatus,
}

/// A product object pushed onto an existing cart exactly as the client sent it.
/// Only its being an object is checked; every key is kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemSnapshot(Map<String, Value>);

impl ItemSnapshot {
  pub fn new(fields: Map<String, Value>) -> Self {
    Self(fields)
  }

  /// The `product` reference, when the object carries one as a string.
  pub fn product_id(&self) -> Option<&str> {
    self.0.get("product").and_then(Value::as_str)
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn fields(&self) -> &Map<String, Value> {
    &self.0
  }
}

impl From<Map<String, Value>> for ItemSnapshot {
  fn from(fields: Map<String, Value>) -> Self {
    Self(fields)
  }
}

/// One entry of a cart's product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartLine {
  Item(CartItem),
  Snapshot(ItemSnapshot),
}

impl CartLine {
  pub fn product_id(&self) -> Option<&str> {
    match self {
      CartLine::Item(item) => Some(item.product.as_str()),
      CartLine::Snapshot(snapshot) => snapshot.product_id(),
    }
  }

  /// Whether a pull on `product_id` removes this line.
  pub fn references(&self, product_id: &ProductId) -> bool {
    self.product_id() == Some(product_id.as_str())
  }

  pub fn as_item(&self) -> Option<&CartItem> {
    match self {
      CartLine::Item(item) => Some(item),
      CartLine::Snapshot(_) => None,
    }
  }

  pub fn as_snapshot(&self) -> Option<&ItemSnapshot> {
    match self {
      CartLine::Snapshot(snapshot) => Some(snapshot),
      CartLine::Item(_) => None,
    }
  }
}

/// A cart as handed to a store for insertion. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCart {
  pub user: Option<UserId>,
  pub products: Vec<CartItem>,
  pub created: DateTime<Utc>,
}

impl NewCart {
  pub fn new(user: Option<UserId>, products: Vec<CartItem>) -> Self {
    Self {
      user,
      products,
      created: Utc::now(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  pub id: CartId,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user: Option<UserId>,
  pub products: Vec<CartLine>,
  pub created: DateTime<Utc>,
  pub updated: DateTime<Utc>,
}

impl Cart {
  pub fn from_new(id: CartId, new_cart: NewCart) -> Self {
    Self {
      id,
      user: new_cart.user,
      products: new_cart.products.into_iter().map(CartLine::Item).collect(),
      created: new_cart.created,
      updated: new_cart.created,
    }
  }
}
