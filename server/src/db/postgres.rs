// server/src/db/postgres.rs

//! Postgres as a document store.
//!
//! A cart is one row whose `products` column holds the JSONB array of line items,
//! so push and pull are single `UPDATE` statements and stay atomic per cart.
//! Stock decrements are applied one statement per entry, in order, without a
//! surrounding transaction.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use storefront::store::{CartStore, ProductStore, WriteOutcome};
use storefront::{CartId, ItemSnapshot, NewCart, ProductId, StockDecrement};
use tracing::{event, instrument, Level};

const SCHEMA: &[&str] = &[
  r#"
  CREATE TABLE IF NOT EXISTS carts (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    products JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
  )
  "#,
  r#"
  CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    sku TEXT,
    name TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL DEFAULT 0,
    quantity BIGINT NOT NULL DEFAULT 0,
    taxable BOOLEAN NOT NULL DEFAULT FALSE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
  )
  "#,
];

const PULL_ITEMS_SQL: &str = r#"
  UPDATE carts
  SET products = COALESCE(
        (SELECT jsonb_agg(elem ORDER BY pos)
         FROM jsonb_array_elements(products) WITH ORDINALITY AS lines(elem, pos)
         WHERE elem->>'product' IS DISTINCT FROM $2),
        '[]'::jsonb),
      updated_at = NOW()
  WHERE id = $1
"#;

#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    Ok(Self { pool })
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  /// Creates the `carts` and `products` tables when missing.
  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    event!(Level::DEBUG, "Database schema ensured.");
    Ok(())
  }
}

fn matched(rows: u64) -> WriteOutcome {
  WriteOutcome::new(rows, rows)
}

#[async_trait]
impl CartStore for PgStore {
  #[instrument(name = "PgStore::insert", skip_all, fields(item_count = cart.products.len()))]
  async fn insert(&self, cart: NewCart) -> anyhow::Result<CartId> {
    let id = CartId::generate();
    sqlx::query(
      "INSERT INTO carts (id, user_id, products, created_at, updated_at) VALUES ($1, $2, $3, $4, $4)",
    )
    .bind(id.as_str())
    .bind(cart.user.as_ref().map(|user| user.as_str()))
    .bind(Json(&cart.products))
    .bind(cart.created)
    .execute(&self.pool)
    .await
    .with_context(|| format!("inserting cart {}", id))?;
    Ok(id)
  }

  #[instrument(name = "PgStore::push_item", skip_all, fields(cart_id = %cart_id))]
  async fn push_item(&self, cart_id: &CartId, item: ItemSnapshot) -> anyhow::Result<WriteOutcome> {
    let result = sqlx::query(
      "UPDATE carts SET products = products || jsonb_build_array($2::jsonb), updated_at = NOW() WHERE id = $1",
    )
    .bind(cart_id.as_str())
    .bind(Json(&item))
    .execute(&self.pool)
    .await
    .with_context(|| format!("pushing product {:?} onto cart {}", item.product_id(), cart_id))?;
    Ok(matched(result.rows_affected()))
  }

  #[instrument(name = "PgStore::pull_items", skip_all, fields(cart_id = %cart_id, product_id = %product_id))]
  async fn pull_items(&self, cart_id: &CartId, product_id: &ProductId) -> anyhow::Result<WriteOutcome> {
    let result = sqlx::query(PULL_ITEMS_SQL)
      .bind(cart_id.as_str())
      .bind(product_id.as_str())
      .execute(&self.pool)
      .await
      .with_context(|| format!("pulling product {} from cart {}", product_id, cart_id))?;
    Ok(matched(result.rows_affected()))
  }

  #[instrument(name = "PgStore::delete", skip_all, fields(cart_id = %cart_id))]
  async fn delete(&self, cart_id: &CartId) -> anyhow::Result<WriteOutcome> {
    let result = sqlx::query("DELETE FROM carts WHERE id = $1")
      .bind(cart_id.as_str())
      .execute(&self.pool)
      .await
      .with_context(|| format!("deleting cart {}", cart_id))?;
    Ok(matched(result.rows_affected()))
  }
}

#[async_trait]
impl ProductStore for PgStore {
  #[instrument(name = "PgStore::bulk_decrement", skip_all, fields(op_count = ops.len()))]
  async fn bulk_decrement(&self, ops: Vec<StockDecrement>) -> anyhow::Result<WriteOutcome> {
    let mut outcome = WriteOutcome::default();
    for (index, op) in ops.iter().enumerate() {
      let result = sqlx::query("UPDATE products SET quantity = quantity - $2, updated_at = NOW() WHERE id = $1")
        .bind(op.product.as_str())
        .bind(i64::from(op.quantity))
        .execute(&self.pool)
        .await
        .with_context(|| {
          format!(
            "decrementing stock of product {} (entry {} of {}, {} applied)",
            op.product,
            index + 1,
            ops.len(),
            outcome.modified
          )
        })?;
      outcome.matched += result.rows_affected();
      outcome.modified += result.rows_affected();
    }
    Ok(outcome)
  }
}
