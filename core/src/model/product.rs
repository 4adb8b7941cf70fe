// core/src/model/product.rs

use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::ids::ProductId;

/// Catalogue entry. `quantity` is the stock on hand; it is signed because stock
/// decrements are not floored at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sku: Option<String>,
  pub price: f64,
  pub quantity: i64,
  #[serde(default)]
  pub taxable: bool,
  #[serde(default = "default_active")]
  pub is_active: bool,
}

fn default_active() -> bool {
  true
}

/// Product details as submitted by a client when adding it to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
  pub product: ProductId,
  #[serde(default = "default_quantity")]
  pub quantity: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sku: Option<String>,
  #[serde(default)]
  pub price: f64,
  #[serde(default)]
  pub taxable: bool,
}

fn default_quantity() -> u32 {
  1
}

/// One entry of a stock decrement batch: lower `product`'s stock by `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDecrement {
  pub product: ProductId,
  pub quantity: u32,
}

impl From<&ProductSnapshot> for StockDecrement {
  fn from(snapshot: &ProductSnapshot) -> Self {
    Self {
      product: snapshot.product.clone(),
      quantity: snapshot.quantity,
    }
  }
}

impl From<&CartItem> for StockDecrement {
  fn from(item: &CartItem) -> Self {
    Self {
      product: item.product.clone(),
      quantity: item.quantity,
    }
  }
}
