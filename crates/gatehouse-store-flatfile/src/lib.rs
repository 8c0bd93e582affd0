//! Flat-file backend for the Gatehouse checkpoint store.
//!
//! Each table is a delimited text file with a comment-prefixed header.
//! Tables are rewritten whole through a temp-file-then-rename, so a
//! crashed save never leaves a truncated table behind.

mod codec;
mod store;
mod tables;

pub mod error;

pub use error::{Error, Result};
pub use store::FlatFileStore;

#[cfg(test)]
mod tests;
