//! Special-pass lifecycle: registration, check toggling, grace, cleanup.

use chrono::{Duration, NaiveDateTime};
use gatehouse_core::{
  clock::Clock,
  lifecycle::{
    self, CheckKind, CheckOutcome, CheckState, RegisterOutcome,
  },
  pass::{NewPass, PassStatus, SpecialPass, VALIDITY_HOURS},
  store::RecordStore,
};

use crate::{CheckpointEngine, Error, Result};

impl<S: RecordStore, C: Clock> CheckpointEngine<S, C> {
  // ── Registration ──────────────────────────────────────────────────────

  /// Register a visitor pass for `input.code`, valid for 24 hours.
  ///
  /// Stale rows are reclaimed first; if a live pass still holds the code
  /// the registration is rejected with the holder's name and expiry for
  /// display. Any other `Active` row sharing the code is deactivated
  /// before the new row is appended.
  pub fn register(&self, input: NewPass) -> Result<RegisterOutcome> {
    self.cleanup_expired()?;
    let now = self.now();

    let mut passes = self.store.load_passes().map_err(Error::store)?;

    if let Some(holder) = passes
      .iter()
      .find(|p| p.code == input.code && lifecycle::is_live(p, now))
    {
      return Ok(RegisterOutcome::Rejected {
        holder_name: holder.name.clone(),
        expires_at:  holder.expires_at,
      });
    }

    // Invariant: at most one Active row per code.
    for stale in passes
      .iter_mut()
      .filter(|p| p.code == input.code && p.status == PassStatus::Active)
    {
      stale.status = PassStatus::Inactive;
      tracing::warn!(code = %input.code, "deactivated stale pass row");
    }

    let pass = SpecialPass {
      name:           input.name,
      contact:        input.contact,
      visiting_as:    input.visiting_as,
      purpose:        input.purpose,
      visiting:       input.visiting,
      id_type:        input.id_type,
      code:           input.code,
      created_at:     now,
      expires_at:     now + Duration::hours(VALIDITY_HOURS),
      status:         PassStatus::Active,
      check_in_time:  None,
      check_out_time: None,
    };

    passes.push(pass.clone());
    self.store.save_passes(&passes).map_err(Error::store)?;

    tracing::info!(code = %pass.code, expires_at = %pass.expires_at,
      "registered special pass");
    Ok(RegisterOutcome::Registered(pass))
  }

  /// Whether `code` can be given to a new visitor: stale rows are
  /// reclaimed, then no live row may hold it.
  pub fn is_available(&self, code: &str) -> Result<bool> {
    self.cleanup_expired()?;
    let now = self.now();

    let passes = self.store.load_passes().map_err(Error::store)?;
    Ok(!passes.iter().any(|p| p.code == code && lifecycle::is_live(p, now)))
  }

  // ── Check-in / check-out ──────────────────────────────────────────────

  /// Apply a check of the given kind to the pass holding `code`.
  ///
  /// A check-in is honored only up to expiry. A check-out is honored up
  /// to expiry, or afterwards while the bearer is still inside on a
  /// grace-eligible check-in; otherwise the pass reports `Deactivated`.
  pub fn record_check(
    &self,
    code: &str,
    kind: CheckKind,
  ) -> Result<CheckOutcome> {
    let now = self.now();
    let mut passes = self.store.load_passes().map_err(Error::store)?;

    let Some(idx) = candidate(&passes, code) else {
      return Ok(CheckOutcome::NotFound);
    };
    let pass = &mut passes[idx];

    match kind {
      CheckKind::CheckIn => {
        if !lifecycle::may_check_in(pass, now) {
          return Ok(CheckOutcome::Deactivated);
        }
        pass.check_in_time = Some(now);
        pass.check_out_time = None;
      }
      CheckKind::CheckOut => {
        if !lifecycle::may_check_out(pass, now) {
          return Ok(CheckOutcome::Deactivated);
        }
        pass.check_out_time = Some(now);
      }
    }

    self.store.save_passes(&passes).map_err(Error::store)?;
    tracing::info!(code, kind = %kind, "recorded special pass check");
    Ok(CheckOutcome::Accepted { kind, at: now })
  }

  /// Scan-driven convenience: derive the next check from the current
  /// state and apply it. The first scan checks in, the next checks out.
  pub fn toggle(&self, code: &str) -> Result<CheckOutcome> {
    let passes = self.store.load_passes().map_err(Error::store)?;
    let Some(idx) = candidate(&passes, code) else {
      return Ok(CheckOutcome::NotFound);
    };
    let kind = lifecycle::next_check(&passes[idx]);
    self.record_check(code, kind)
  }

  /// Derived presence state of the pass holding `code`.
  pub fn check_state(&self, code: &str) -> Result<Option<CheckState>> {
    let passes = self.store.load_passes().map_err(Error::store)?;
    Ok(candidate(&passes, code).map(|i| lifecycle::check_state(&passes[i])))
  }

  /// Recorded check-in/check-out times, for display.
  pub fn check_times(
    &self,
    code: &str,
  ) -> Result<Option<(Option<NaiveDateTime>, Option<NaiveDateTime>)>> {
    let passes = self.store.load_passes().map_err(Error::store)?;
    Ok(
      candidate(&passes, code)
        .map(|i| (passes[i].check_in_time, passes[i].check_out_time)),
    )
  }

  // ── Cleanup ───────────────────────────────────────────────────────────

  /// Physically delete every `Active` row more than one hour past expiry,
  /// freeing its code for reuse. Returns the number removed. Non-`Active`
  /// rows are never touched.
  pub fn cleanup_expired(&self) -> Result<usize> {
    let now = self.now();
    let passes = self.store.load_passes().map_err(Error::store)?;

    let kept: Vec<SpecialPass> = passes
      .iter()
      .filter(|p| !lifecycle::cleanup_due(p, now))
      .cloned()
      .collect();

    let removed = passes.len() - kept.len();
    if removed > 0 {
      self.store.save_passes(&kept).map_err(Error::store)?;
      tracing::info!(removed, "cleaned up stale special passes");
    }
    Ok(removed)
  }
}

// ─── Row selection ───────────────────────────────────────────────────────────

/// The row a check targets: not superseded (`Inactive`), freshest
/// `created_at` first. Expired rows stay eligible; the grace rule, not
/// row selection, decides whether a late check is honored.
fn candidate(passes: &[SpecialPass], code: &str) -> Option<usize> {
  passes
    .iter()
    .enumerate()
    .filter(|(_, p)| p.code == code && p.status != PassStatus::Inactive)
    .max_by_key(|(_, p)| p.created_at)
    .map(|(i, _)| i)
}
