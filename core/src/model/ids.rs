// core/src/model/ids.rs

//! Opaque string identifiers. The store decides their format; the service only
//! compares and forwards them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }

      pub fn into_inner(self) -> String {
        self.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str {
        &self.0
      }
    }

    impl From<String> for $name {
      fn from(id: String) -> Self {
        Self(id)
      }
    }

    impl From<&str> for $name {
      fn from(id: &str) -> Self {
        Self(id.to_string())
      }
    }
  };
}

string_id!(
  /// Identifier of a persisted cart.
  CartId
);
string_id!(
  /// Identifier of a catalogue product.
  ProductId
);
string_id!(
  /// Identity attached to a request by the authentication layer.
  UserId
);

impl CartId {
  /// A fresh random id, for stores that assign ids client-side.
  pub fn generate() -> Self {
    Self(Uuid::new_v4().simple().to_string())
  }
}
