// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Arc;
use storefront::{CartService, ItemSnapshot, MemoryStore, Product, ProductId, ProductSnapshot, SalesTax};
use tracing::Level;

// --- Catalogue fixtures ---
pub fn product(id: &str, price: f64, stock: i64, taxable: bool) -> Product {
  Product {
    id: ProductId::new(id),
    name: format!("Product {}", id),
    sku: Some(format!("SKU-{}", id)),
    price,
    quantity: stock,
    taxable,
    is_active: true,
  }
}

pub fn snapshot(id: &str, quantity: u32, price: f64) -> ProductSnapshot {
  ProductSnapshot {
    product: ProductId::new(id),
    quantity,
    name: Some(format!("Product {}", id)),
    sku: Some(format!("SKU-{}", id)),
    price,
    taxable: false,
  }
}

/// A raw item as the add route receives it.
pub fn item(id: &str, quantity: u32, price: f64) -> ItemSnapshot {
  serde_json::from_value(serde_json::json!({
    "product": id,
    "name": format!("Product {}", id),
    "quantity": quantity,
    "price": price,
  }))
  .unwrap()
}

/// A memory store stocked with three products and a service over it.
pub fn stocked_service() -> (Arc<MemoryStore>, CartService) {
  let store = Arc::new(MemoryStore::with_products([
    product("mug", 8.0, 10, true),
    product("tee", 20.0, 5, false),
    product("cap", 15.0, 1, true),
  ]));
  let service = CartService::new(store.clone(), store.clone(), SalesTax::default());
  (store, service)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
