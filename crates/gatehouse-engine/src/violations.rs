//! Violation counters over the parallel keyed table.

use gatehouse_core::{
  clock::Clock, store::RecordStore, violation::ViolationCount,
};

use crate::{CheckpointEngine, Error, Result};

impl<S: RecordStore, C: Clock> CheckpointEngine<S, C> {
  /// Current violation count for a person; zero when no row exists.
  pub fn violation_count(&self, person_id: &str) -> Result<u32> {
    let violations = self.store.load_violations().map_err(Error::store)?;
    Ok(
      violations
        .iter()
        .find(|v| v.person_id == person_id)
        .map(|v| v.count)
        .unwrap_or(0),
    )
  }

  /// Record one more violation, creating the row on first use. Returns the
  /// new count. The core never decrements; resets are an administrative
  /// concern outside this engine.
  pub fn add_violation(&self, person_id: &str) -> Result<u32> {
    let mut violations =
      self.store.load_violations().map_err(Error::store)?;

    let count = match violations.iter_mut().find(|v| v.person_id == person_id)
    {
      Some(row) => {
        row.count += 1;
        row.count
      }
      None => {
        violations.push(ViolationCount {
          person_id: person_id.to_string(),
          count:     1,
        });
        1
      }
    };

    self.store.save_violations(&violations).map_err(Error::store)?;
    tracing::info!(person_id, count, "recorded violation");
    Ok(count)
  }
}
