//! Error types for `gatehouse-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid timestamp: {0:?}")]
  InvalidTimestamp(String),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("unknown person status: {0:?}")]
  UnknownPersonStatus(String),

  #[error("unknown pass status: {0:?}")]
  UnknownPassStatus(String),

  #[error("invalid count: {0:?}")]
  InvalidCount(String),

  #[error("record has {got} fields, expected at least {expected}")]
  TooFewFields { expected: usize, got: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
