//! Access logging — the append-only audit trail.

use gatehouse_core::{audit::AccessEntry, clock::Clock, store::RecordStore};

use crate::CheckpointEngine;

impl<S: RecordStore, C: Clock> CheckpointEngine<S, C> {
  /// Append one audit line for a scan attempt, enriched with the resolved
  /// role and name when the id is known.
  ///
  /// Logging never fails the caller's flow: lookup and write errors are
  /// reported through `tracing` and swallowed.
  pub fn log_access(&self, id: &str, action: &str) {
    let now = self.now();

    let entry = match self.peek(id) {
      Ok(Some(person)) => {
        AccessEntry::granted(now, id, action, person.role, person.name)
      }
      Ok(None) => AccessEntry::denied(now, id, action),
      Err(e) => {
        tracing::warn!(id, error = %e, "access-log lookup failed");
        AccessEntry::denied(now, id, action)
      }
    };

    if let Err(e) = self.store.append_access(&entry) {
      tracing::warn!(id, error = %e, "failed to append access log entry");
    }
  }
}
