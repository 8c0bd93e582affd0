//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `gatehouse-store-flatfile`).
//! Higher layers (`gatehouse-engine`, `gatehouse-cli`) depend on this
//! abstraction, not on any concrete backend.
//!
//! Tables are loaded and saved whole: every mutation is a
//! load-modify-rewrite of the full backing table, so a status flip is
//! always persisted together with its sibling fields. The access log is
//! the one exception: it is append-only and is never rewritten.

use crate::{
  audit::AccessEntry, pass::SpecialPass, person::Person,
  violation::ViolationCount,
};

/// Abstraction over a Gatehouse storage backend.
///
/// Loads tolerate damage: a malformed record is skipped, a missing table is
/// created empty. Saves are all-or-nothing; a failed save leaves the
/// backing table as it was.
pub trait RecordStore {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Identity table ────────────────────────────────────────────────────

  fn load_people(&self) -> Result<Vec<Person>, Self::Error>;
  fn save_people(&self, people: &[Person]) -> Result<(), Self::Error>;

  // ── Visitor table ─────────────────────────────────────────────────────

  fn load_passes(&self) -> Result<Vec<SpecialPass>, Self::Error>;
  fn save_passes(&self, passes: &[SpecialPass]) -> Result<(), Self::Error>;

  // ── Violation table ───────────────────────────────────────────────────

  fn load_violations(&self) -> Result<Vec<ViolationCount>, Self::Error>;
  fn save_violations(
    &self,
    violations: &[ViolationCount],
  ) -> Result<(), Self::Error>;

  // ── Access log ────────────────────────────────────────────────────────

  /// Append one audit line. Never rewrites existing lines.
  fn append_access(&self, entry: &AccessEntry) -> Result<(), Self::Error>;
}
