//! Access-log entries — the append-only audit trail of scan attempts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::person::Role;

/// Whether a scan resolved to a known identity.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessOutcome {
  Success,
  Failed,
}

/// One appended log line. `role` and `name` are absent when the scanned id
/// did not resolve; the encoder writes `UNKNOWN` in their place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEntry {
  pub timestamp: NaiveDateTime,
  pub id:        String,
  pub action:    String,
  pub role:      Option<Role>,
  pub name:      Option<String>,
  pub outcome:   AccessOutcome,
}

impl AccessEntry {
  /// An entry for a scan that resolved.
  pub fn granted(
    timestamp: NaiveDateTime,
    id: impl Into<String>,
    action: impl Into<String>,
    role: Role,
    name: impl Into<String>,
  ) -> Self {
    Self {
      timestamp,
      id: id.into(),
      action: action.into(),
      role: Some(role),
      name: Some(name.into()),
      outcome: AccessOutcome::Success,
    }
  }

  /// An entry for a scan that did not resolve.
  pub fn denied(
    timestamp: NaiveDateTime,
    id: impl Into<String>,
    action: impl Into<String>,
  ) -> Self {
    Self {
      timestamp,
      id: id.into(),
      action: action.into(),
      role: None,
      name: None,
      outcome: AccessOutcome::Failed,
    }
  }
}
