// tests/common/mod.rs
#![allow(dead_code, unused_macros)] // Not every test binary uses every helper

use std::sync::Arc;
use storefront::store::recording::RecordingStore;
use storefront::{CartService, MemoryStore, SalesTax};
use storefront_server::config::AppConfig;
use storefront_server::state::AppState;

pub const GENERIC_ERROR_BODY: &str = "Your request could not be processed. Please try again.";

pub fn test_config() -> AppConfig {
  AppConfig::from_lookup(|_| None).unwrap()
}

pub fn recording_state(store: Arc<RecordingStore>) -> AppState {
  AppState::new(CartService::new(store.clone(), store, SalesTax::default()), test_config())
}

pub fn memory_state(store: Arc<MemoryStore>) -> AppState {
  AppState::new(CartService::new(store.clone(), store, SalesTax::default()), test_config())
}

/// Mounts the cart routes at `/`, the way the cart router is exercised on its own.
macro_rules! cart_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .configure(storefront_server::web::configure_cart_routes),
    )
    .await
  };
}
