// core/src/pricing.rs

//! Line-item pricing applied when products enter a cart.

use crate::model::{CartItem, CartItemStatus, ProductSnapshot};

/// Sales tax rate used when none is configured.
pub const DEFAULT_TAX_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesTax {
  rate: f64,
}

impl SalesTax {
  pub fn new(rate: f64) -> Self {
    Self { rate }
  }

  pub fn rate(&self) -> f64 {
    self.rate
  }

  /// Turns a submitted snapshot into a priced cart line. Totals are rounded to
  /// cents; untaxed lines carry zero tax and zero `price_with_tax`.
  pub fn price_item(&self, snapshot: ProductSnapshot) -> CartItem {
    let quantity = f64::from(snapshot.quantity);
    let total_price = round_cents(snapshot.price * quantity);
    let (total_tax, price_with_tax) = if snapshot.taxable {
      let total_tax = round_cents(snapshot.price * self.rate * quantity);
      (total_tax, round_cents(total_price + total_tax))
    } else {
      (0.0, 0.0)
    };

    CartItem {
      product: snapshot.product,
      quantity: snapshot.quantity,
      name: snapshot.name,
      sku: snapshot.sku,
      purchase_price: snapshot.price,
      total_price,
      price_with_tax,
      total_tax,
      status: CartItemStatus::NotProcessed,
    }
  }
}

impl Default for SalesTax {
  fn default() -> Self {
    Self::new(DEFAULT_TAX_RATE)
  }
}

fn round_cents(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}
