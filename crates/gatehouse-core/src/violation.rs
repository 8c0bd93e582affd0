//! Violation counters — a keyed counter table parallel to the identity
//! table, one row per person, incremented on denial decisions and never
//! decremented by the core.

use serde::{Deserialize, Serialize};

/// One violation-table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCount {
  pub person_id: String,
  pub count:     u32,
}
