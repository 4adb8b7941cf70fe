// server/src/web/extractors.rs

use actix_web::{FromRequest, HttpRequest};
use storefront::UserId;
use tracing::warn;

use crate::errors::AppError;

/// Header carrying the acting user's id. The real authentication layer sits in
/// front of this service and sets it; the service does not validate sessions.
pub const USER_ID_HEADER: &str = "X-User-ID";

#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user_id: UserId,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let user_id = req
      .headers()
      .get(USER_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .map(str::trim)
      .filter(|value| !value.is_empty());

    match user_id {
      Some(id) => futures_util::future::ready(Ok(AuthenticatedUser {
        user_id: UserId::new(id),
      })),
      None => {
        warn!("AuthenticatedUser extractor: Missing or empty {} header.", USER_ID_HEADER);
        futures_util::future::ready(Err(AppError::Auth("Unauthorized".to_string())))
      }
    }
  }
}
