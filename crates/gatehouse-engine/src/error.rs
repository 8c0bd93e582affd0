//! Engine error type.
//!
//! Rejections that the UI must display (a taken pass code, an expired
//! check) are NOT errors; they are carried in the operation's outcome
//! type. `Err` here means the operation did not take effect at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  PersonNotFound(String),

  #[error("id already registered to an active person: {0}")]
  DuplicateId(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error; keeps the engine generic over the store.
  pub fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
