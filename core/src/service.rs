// core/src/service.rs

//! The cart service: the operations the HTTP layer exposes, expressed against the
//! store traits.
//!
//! Every operation issues exactly one store call and never retries. Unknown ids are
//! not errors; a write that matched nothing is logged and reported as success.

use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::{CartError, CartResult};
use crate::model::{CartId, ItemSnapshot, NewCart, ProductId, ProductSnapshot, StockDecrement, UserId};
use crate::pricing::SalesTax;
use crate::store::{CartStore, ProductStore, WriteOutcome};

#[derive(Clone)]
pub struct CartService {
  carts: Arc<dyn CartStore>,
  products: Arc<dyn ProductStore>,
  pricing: SalesTax,
}

impl CartService {
  pub fn new(carts: Arc<dyn CartStore>, products: Arc<dyn ProductStore>, pricing: SalesTax) -> Self {
    Self {
      carts,
      products,
      pricing,
    }
  }

  /// Prices `items` and persists them, in order, as one new cart.
  #[instrument(name = "CartService::create_cart", skip(self, items), fields(user_id = tracing::field::Empty, item_count = items.len()), err(Display))]
  pub async fn create_cart(&self, user: Option<UserId>, items: Vec<ProductSnapshot>) -> CartResult<CartId> {
    if let Some(user_id) = &user {
      tracing::Span::current().record("user_id", user_id.as_str());
    }
    if let Some(empty) = items.iter().find(|item| item.quantity == 0) {
      event!(Level::WARN, product_id = %empty.product, "Rejecting cart line with zero quantity.");
      return Err(CartError::Validation(format!(
        "Quantity for product {} must be positive.",
        empty.product
      )));
    }

    let products = items.into_iter().map(|item| self.pricing.price_item(item)).collect();
    let cart_id = self
      .carts
      .insert(NewCart::new(user, products))
      .await
      .map_err(CartError::persistence("insert"))?;

    event!(Level::INFO, cart_id = %cart_id, "Cart created.");
    Ok(cart_id)
  }

  /// Appends `snapshot` to the cart as submitted: no pricing, no shape checks,
  /// no duplicate merging.
  #[instrument(name = "CartService::add_item", skip(self, snapshot), fields(cart_id = %cart_id, product_id = ?snapshot.product_id()), err(Display))]
  pub async fn add_item(&self, cart_id: &CartId, snapshot: ItemSnapshot) -> CartResult<()> {
    let outcome = self
      .carts
      .push_item(cart_id, snapshot)
      .await
      .map_err(CartError::persistence("push_item"))?;
    log_unmatched("push_item", cart_id, outcome);
    Ok(())
  }

  /// Drops every line of the cart that references `product_id`.
  #[instrument(name = "CartService::remove_item", skip(self), fields(cart_id = %cart_id, product_id = %product_id), err(Display))]
  pub async fn remove_item(&self, cart_id: &CartId, product_id: &ProductId) -> CartResult<()> {
    let outcome = self
      .carts
      .pull_items(cart_id, product_id)
      .await
      .map_err(CartError::persistence("pull_items"))?;
    log_unmatched("pull_items", cart_id, outcome);
    Ok(())
  }

  #[instrument(name = "CartService::delete_cart", skip(self), fields(cart_id = %cart_id), err(Display))]
  pub async fn delete_cart(&self, cart_id: &CartId) -> CartResult<()> {
    let outcome = self
      .carts
      .delete(cart_id)
      .await
      .map_err(CartError::persistence("delete"))?;
    log_unmatched("delete", cart_id, outcome);
    Ok(())
  }

  /// Lowers stock for every item in one batch. Stock may go negative. Returns how
  /// many products were matched; an empty batch is skipped without a store call.
  #[instrument(name = "CartService::decrease_quantity", skip(self, items), fields(item_count = items.len()), err(Display))]
  pub async fn decrease_quantity(&self, items: Vec<StockDecrement>) -> CartResult<u64> {
    if items.is_empty() {
      event!(Level::DEBUG, "No items to decrement.");
      return Ok(0);
    }
    let requested = items.len() as u64;
    let outcome = self
      .products
      .bulk_decrement(items)
      .await
      .map_err(CartError::persistence("bulk_decrement"))?;

    if outcome.matched < requested {
      event!(
        Level::WARN,
        requested,
        matched = outcome.matched,
        "Stock decrement matched fewer products than requested."
      );
    }
    Ok(outcome.matched)
  }
}

fn log_unmatched(operation: &'static str, cart_id: &CartId, outcome: WriteOutcome) {
  if outcome.matched == 0 {
    event!(Level::WARN, operation, cart_id = %cart_id, "Cart write matched no cart; treated as success.");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::CartItemStatus;
  use crate::store::recording::{RecordingStore, StoreCall, StoreOp};

  fn service_over(store: Arc<RecordingStore>) -> CartService {
    CartService::new(store.clone(), store, SalesTax::default())
  }

  fn snapshot(product: &str, quantity: u32) -> ProductSnapshot {
    ProductSnapshot {
      product: ProductId::new(product),
      quantity,
      name: None,
      sku: None,
      price: 0.0,
      taxable: false,
    }
  }

  #[tokio::test]
  async fn create_cart_inserts_once_and_returns_store_id() {
    let store = Arc::new(RecordingStore::with_cart_id("cart123"));
    let service = service_over(store.clone());

    let id = service
      .create_cart(Some(UserId::new("user123")), vec![snapshot("product123", 2)])
      .await
      .unwrap();

    assert_eq!(id, CartId::new("cart123"));
    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
      StoreCall::Insert(cart) => {
        assert_eq!(cart.user, Some(UserId::new("user123")));
        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.products[0].product, ProductId::new("product123"));
        assert_eq!(cart.products[0].quantity, 2);
        assert_eq!(cart.products[0].status, CartItemStatus::NotProcessed);
      }
      other => panic!("Expected insert, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn create_cart_rejects_zero_quantity_without_store_call() {
    let store = Arc::new(RecordingStore::new());
    let service = service_over(store.clone());

    let err = service
      .create_cart(None, vec![snapshot("a", 1), snapshot("b", 0)])
      .await
      .unwrap_err();

    assert!(matches!(err, CartError::Validation(_)));
    assert!(store.calls().is_empty());
  }

  #[tokio::test]
  async fn create_cart_failure_is_persistence_error() {
    let store = Arc::new(RecordingStore::new().fail_on(StoreOp::Insert));
    let service = service_over(store.clone());

    let err = service.create_cart(None, vec![snapshot("a", 1)]).await.unwrap_err();
    assert_eq!(err.operation(), Some("insert"));
    assert_eq!(store.calls().len(), 1);
  }

  #[tokio::test]
  async fn add_item_pushes_snapshot_unchanged() {
    let store = Arc::new(RecordingStore::new());
    let service = service_over(store.clone());
    let submitted = serde_json::json!({"sku": "MUG-1", "slug": "mug", "price": 3, "taxable": true, "quantity": 2});
    let mug: ItemSnapshot = serde_json::from_value(submitted.clone()).unwrap();

    service.add_item(&CartId::new("cart123"), mug).await.unwrap();

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
      StoreCall::PushItem { cart_id, item } => {
        assert_eq!(cart_id.as_str(), "cart123");
        assert_eq!(serde_json::to_value(item).unwrap(), submitted);
      }
      other => panic!("Expected push, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn remove_item_pulls_by_product() {
    let store = Arc::new(RecordingStore::new());
    let service = service_over(store.clone());

    service
      .remove_item(&CartId::new("cart123"), &ProductId::new("product123"))
      .await
      .unwrap();

    assert_eq!(
      store.calls(),
      vec![StoreCall::PullItems {
        cart_id: CartId::new("cart123"),
        product_id: ProductId::new("product123"),
      }]
    );
  }

  #[tokio::test]
  async fn remove_item_failure_names_operation() {
    let store = Arc::new(RecordingStore::new().fail_on(StoreOp::PullItems));
    let service = service_over(store);

    let err = service
      .remove_item(&CartId::new("cart123"), &ProductId::new("product123"))
      .await
      .unwrap_err();
    assert_eq!(err.operation(), Some("pull_items"));
  }

  #[tokio::test]
  async fn delete_cart_deletes_by_id() {
    let store = Arc::new(RecordingStore::new());
    let service = service_over(store.clone());

    service.delete_cart(&CartId::new("cart123")).await.unwrap();
    assert_eq!(
      store.calls(),
      vec![StoreCall::Delete {
        cart_id: CartId::new("cart123")
      }]
    );
  }

  #[tokio::test]
  async fn decrease_quantity_sends_one_batch_with_one_entry_per_item() {
    let store = Arc::new(RecordingStore::new());
    let service = service_over(store.clone());
    let items = vec![
      StockDecrement {
        product: ProductId::new("a"),
        quantity: 2,
      },
      StockDecrement {
        product: ProductId::new("b"),
        quantity: 1,
      },
      StockDecrement {
        product: ProductId::new("a"),
        quantity: 4,
      },
    ];

    let matched = service.decrease_quantity(items.clone()).await.unwrap();

    assert_eq!(matched, 3);
    assert_eq!(store.calls(), vec![StoreCall::BulkDecrement(items)]);
  }

  #[tokio::test]
  async fn decrease_quantity_skips_empty_batch() {
    let store = Arc::new(RecordingStore::new());
    let service = service_over(store.clone());

    assert_eq!(service.decrease_quantity(Vec::new()).await.unwrap(), 0);
    assert!(store.calls().is_empty());
  }
}
