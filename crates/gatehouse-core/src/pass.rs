//! Special pass — one row of the visitor table.
//!
//! A pass is a 24-hour, single-code visitor credential. Its check-in/out
//! state is derived from the recorded times, never stored (see
//! [`crate::lifecycle`]).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Hours a pass stays valid after registration.
pub const VALIDITY_HOURS: i64 = 24;

/// Grace window: a pass checked in with this many minutes (or fewer) left
/// before expiry may still check out after expiry.
pub const GRACE_MINUTES: i64 = 10;

/// Hours past expiry before cleanup physically deletes a row.
pub const CLEANUP_LAG_HOURS: i64 = 1;

/// Stored pass status. `Inactive` rows were superseded by a re-registration
/// of the same code; `Expired` rows were flipped by a lazy-expiry sweep.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PassStatus {
  Active,
  Inactive,
  Expired,
}

/// One visitor-table row. `code` is the scanned credential and the primary
/// key: at most one `Active` row may hold a given code at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialPass {
  pub name:           String,
  pub contact:        String,
  pub visiting_as:    String,
  pub purpose:        String,
  pub visiting:       String,
  pub id_type:        String,
  pub code:           String,
  pub created_at:     NaiveDateTime,
  pub expires_at:     NaiveDateTime,
  pub status:         PassStatus,
  pub check_in_time:  Option<NaiveDateTime>,
  pub check_out_time: Option<NaiveDateTime>,
}

/// Input to pass registration. Timestamps and status are set by the engine;
/// they are not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewPass {
  pub name:        String,
  pub contact:     String,
  pub visiting_as: String,
  pub purpose:     String,
  pub visiting:    String,
  pub id_type:     String,
  pub code:        String,
}
