// server/src/state.rs
use crate::config::AppConfig;
use crate::db::PgStore;
use crate::errors::Result;
use std::sync::Arc;
use storefront::{CartService, MemoryStore, SalesTax};

#[derive(Clone)]
pub struct AppState {
  pub cart_service: CartService,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(cart_service: CartService, config: AppConfig) -> Self {
    Self {
      cart_service,
      config: Arc::new(config),
    }
  }

  /// Connects the store the config asks for and wires the cart service onto it.
  pub async fn build(config: AppConfig) -> Result<Self> {
    let pricing = SalesTax::new(config.state_tax_rate);
    let cart_service = match &config.database_url {
      Some(url) => {
        let store = Arc::new(PgStore::connect(url, config.database_max_connections).await?);
        store.ensure_schema().await?;
        tracing::info!("Successfully connected to the database.");
        CartService::new(store.clone(), store, pricing)
      }
      None => {
        tracing::warn!("DATABASE_URL not set; carts and stock are kept in process memory.");
        let store = Arc::new(MemoryStore::new());
        CartService::new(store.clone(), store, pricing)
      }
    };
    Ok(Self::new(cart_service, config))
  }

  pub fn store_backend(&self) -> &'static str {
    if self.config.database_url.is_some() {
      "postgres"
    } else {
      "memory"
    }
  }
}
