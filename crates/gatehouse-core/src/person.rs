//! Person — one row of the identity table.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What kind of credential an identity row describes.
///
/// A `StudentRfid` row is a mapping, not a person: its `name` field carries
/// the id of the `StudentNumber` row it belongs to. Resolution must follow
/// that link and never surface the mapping row itself.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
  Guard,
  StudentNumber,
  StudentRfid,
  Teacher,
  Special,
}

/// Row liveness. Deletion is a soft flip to `Inactive`; rows are never
/// physically removed from the identity table.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonStatus {
  Active,
  Inactive,
}

/// One identity-table row. `id` is unique among `Active` rows; `Inactive`
/// duplicates may remain as history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub id:              String,
  pub role:            Role,
  pub name:            String,
  pub status:          PersonStatus,
  pub image_path:      Option<String>,
  pub violation_count: u32,
}

impl Person {
  pub fn is_active(&self) -> bool { self.status == PersonStatus::Active }

  /// For a `StudentRfid` mapping row, the id of the linked `StudentNumber`
  /// row (stored in the `name` column).
  pub fn linked_student_id(&self) -> Option<&str> {
    (self.role == Role::StudentRfid).then_some(self.name.as_str())
  }
}

/// In-place patch applied by the administrative update operation. `None`
/// fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
  pub role:   Option<Role>,
  pub name:   Option<String>,
  pub status: Option<PersonStatus>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
