// server/src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::cart_handlers;

async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok", "store": app_state.store_backend() }))
}

/// Malformed JSON bodies get the same flattened 400 as service failures.
fn cart_json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Full application routing, called from `main.rs`.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(web::scope("/cart").configure(configure_cart_routes)),
  );
}

/// The cart endpoints relative to wherever they are mounted.
pub fn configure_cart_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(cart_json_config())
    .route("/add", web::post().to(cart_handlers::add_cart_handler))
    .route("/add/{cart_id}", web::post().to(cart_handlers::add_item_handler))
    .route(
      "/delete/{cart_id}/{product_id}",
      web::delete().to(cart_handlers::remove_item_handler),
    )
    .route("/delete/{cart_id}", web::delete().to(cart_handlers::delete_cart_handler));
}
