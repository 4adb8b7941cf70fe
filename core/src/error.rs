// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures raised by the cart service.
///
/// Operations on ids that match nothing are not errors: stores report them as a
/// zero match and the service only logs them.
#[derive(Debug, Error)]
pub enum CartError {
  #[error("Invalid cart request: {0}")]
  Validation(String),

  #[error("Store operation '{operation}' failed. Source: {source}")]
  Persistence {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },
}

impl CartError {
  /// Builds a `map_err` adapter tagging a store failure with the operation name.
  pub(crate) fn persistence(operation: &'static str) -> impl FnOnce(AnyhowError) -> Self {
    move |source| CartError::Persistence { operation, source }
  }

  /// Name of the failed store operation, if this is a persistence failure.
  pub fn operation(&self) -> Option<&'static str> {
    match self {
      CartError::Persistence { operation, .. } => Some(*operation),
      CartError::Validation(_) => None,
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
