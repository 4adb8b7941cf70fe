// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::{CartId, ItemSnapshot, ProductId, ProductSnapshot, StockDecrement};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddCartPayload {
  pub products: Vec<ProductSnapshot>,
}

#[derive(Deserialize, Debug)]
pub struct AddItemPayload {
  /// Any JSON object; stored exactly as sent.
  pub product: ItemSnapshot,
}

// --- Handlers ---

/// Creates a cart for the caller, then lowers stock for the submitted lines.
/// A failed stock update is logged and does not fail the request.
#[instrument(
    name = "handler::add_cart",
    skip(app_state, payload, auth_user),
    fields(user_id = %auth_user.user_id, item_count = payload.products.len())
)]
pub async fn add_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AddCartPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let AddCartPayload { products } = payload.into_inner();
  let decrements: Vec<StockDecrement> = products.iter().map(StockDecrement::from).collect();

  let cart_id = app_state
    .cart_service
    .create_cart(Some(auth_user.user_id), products)
    .await?;

  if let Err(e) = app_state.cart_service.decrease_quantity(decrements).await {
    warn!(cart_id = %cart_id, error = %e, "Stock decrement failed after cart creation; cart kept.");
  }

  info!(cart_id = %cart_id, "Cart added.");
  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "cartId": cart_id
  })))
}

#[instrument(name = "handler::add_item", skip(app_state, path, payload, _auth_user), fields(cart_id = %path.as_ref()))]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<AddItemPayload>,
  _auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart_id = CartId::new(path.into_inner());
  app_state
    .cart_service
    .add_item(&cart_id, payload.into_inner().product)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[instrument(name = "handler::remove_item", skip(app_state, path, _auth_user), fields(cart_id = %path.as_ref().0, product_id = %path.as_ref().1))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, String)>,
  _auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let (cart_id, product_id) = path.into_inner();
  app_state
    .cart_service
    .remove_item(&CartId::new(cart_id), &ProductId::new(product_id))
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[instrument(name = "handler::delete_cart", skip(app_state, path, _auth_user), fields(cart_id = %path.as_ref()))]
pub async fn delete_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  _auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart_id = CartId::new(path.into_inner());
  app_state.cart_service.delete_cart(&cart_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
