//! Derived pass lifecycle: check state, expiry, grace, and cleanup rules.
//!
//! Nothing here is stored. A pass row carries only its timestamps and a
//! coarse status; everything a checkpoint decision needs is computed at
//! query time from those fields plus "now".

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::pass::{CLEANUP_LAG_HOURS, GRACE_MINUTES, PassStatus, SpecialPass};

// ─── Vocabulary ──────────────────────────────────────────────────────────────

/// The direction of a scan-driven check.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckKind {
  CheckIn,
  CheckOut,
}

/// Derived presence state of a pass.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckState {
  CheckedIn,
  CheckedOut,
}

/// Result of a check-in/check-out attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
  Accepted {
    kind: CheckKind,
    at:   NaiveDateTime,
  },
  /// The pass is past expiry (and, for a check-out, outside grace).
  Deactivated,
  /// No non-superseded row holds this code.
  NotFound,
}

/// Result of a registration attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegisterOutcome {
  Registered(SpecialPass),
  /// The code is held by an active, unexpired pass; the holder's name and
  /// expiry are carried for display.
  Rejected {
    holder_name: String,
    expires_at:  NaiveDateTime,
  },
}

// ─── Derived state ───────────────────────────────────────────────────────────

/// Presence state, derived from the recorded check times: checked in when a
/// check-in time exists with no later check-out.
pub fn check_state(pass: &SpecialPass) -> CheckState {
  match (pass.check_in_time, pass.check_out_time) {
    (Some(_), None) => CheckState::CheckedIn,
    _ => CheckState::CheckedOut,
  }
}

/// The next check a scan should apply, given the current derived state.
pub fn next_check(pass: &SpecialPass) -> CheckKind {
  match check_state(pass) {
    CheckState::CheckedOut => CheckKind::CheckIn,
    CheckState::CheckedIn => CheckKind::CheckOut,
  }
}

// ─── Expiry / grace arithmetic ───────────────────────────────────────────────

/// A pass counts for resolution while `Active` and its expiry is in the
/// future.
pub fn is_live(pass: &SpecialPass, now: NaiveDateTime) -> bool {
  pass.status == PassStatus::Active && pass.expires_at > now
}

/// Strictly past expiry. At the exact expiry instant the pass is no longer
/// live, but a check is still honored.
pub fn is_expired(pass: &SpecialPass, now: NaiveDateTime) -> bool {
  now > pass.expires_at
}

/// An `Active` row whose expiry has been reached is due for the lazy-expiry
/// flip to `Expired`.
pub fn expiry_due(pass: &SpecialPass, now: NaiveDateTime) -> bool {
  pass.status == PassStatus::Active && now >= pass.expires_at
}

/// Grace eligibility is fixed at check-in: the time remaining then must be
/// at most [`GRACE_MINUTES`] (inclusive).
pub fn grace_eligible(pass: &SpecialPass) -> bool {
  match pass.check_in_time {
    Some(checked_in) => {
      pass.expires_at - checked_in <= Duration::minutes(GRACE_MINUTES)
    }
    None => false,
  }
}

/// A check-in is honored up to and including the expiry instant; there is
/// no grace for check-ins.
pub fn may_check_in(pass: &SpecialPass, now: NaiveDateTime) -> bool {
  !is_expired(pass, now)
}

/// A check-out is honored up to the expiry instant, or afterwards while the
/// bearer is still inside on a grace-eligible check-in.
pub fn may_check_out(pass: &SpecialPass, now: NaiveDateTime) -> bool {
  now <= pass.expires_at
    || (check_state(pass) == CheckState::CheckedIn && grace_eligible(pass))
}

/// Cleanup deletes only `Active` rows, and only strictly more than
/// [`CLEANUP_LAG_HOURS`] past expiry.
pub fn cleanup_due(pass: &SpecialPass, now: NaiveDateTime) -> bool {
  pass.status == PassStatus::Active
    && now > pass.expires_at + Duration::hours(CLEANUP_LAG_HOURS)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn ts(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
      .unwrap()
      .and_hms_opt(h, m, 0)
      .unwrap()
  }

  fn pass(expires_at: NaiveDateTime) -> SpecialPass {
    SpecialPass {
      name:           "Dana Cruz".into(),
      contact:        "0917-555-0101".into(),
      visiting_as:    "Parent".into(),
      purpose:        "Enrollment".into(),
      visiting:       "Registrar".into(),
      id_type:        "Driver's License".into(),
      code:           "4420011223".into(),
      created_at:     expires_at - Duration::hours(24),
      expires_at,
      status:         PassStatus::Active,
      check_in_time:  None,
      check_out_time: None,
    }
  }

  #[test]
  fn check_state_is_derived_from_times() {
    let mut p = pass(ts(12, 0));
    assert_eq!(check_state(&p), CheckState::CheckedOut);

    p.check_in_time = Some(ts(9, 0));
    assert_eq!(check_state(&p), CheckState::CheckedIn);
    assert_eq!(next_check(&p), CheckKind::CheckOut);

    p.check_out_time = Some(ts(10, 0));
    assert_eq!(check_state(&p), CheckState::CheckedOut);
    assert_eq!(next_check(&p), CheckKind::CheckIn);
  }

  #[test]
  fn live_requires_future_expiry() {
    let p = pass(ts(12, 0));
    assert!(is_live(&p, ts(11, 59)));
    assert!(!is_live(&p, ts(12, 0)));

    let inactive = SpecialPass { status: PassStatus::Inactive, ..p };
    assert!(!is_live(&inactive, ts(11, 0)));
  }

  #[test]
  fn grace_boundary_is_inclusive_at_ten_minutes() {
    let mut p = pass(ts(12, 0));

    p.check_in_time = Some(ts(11, 50)); // exactly 10 min remaining
    assert!(grace_eligible(&p));

    p.check_in_time = Some(ts(11, 49)); // 11 min remaining
    assert!(!grace_eligible(&p));
  }

  #[test]
  fn check_out_after_expiry_needs_grace_and_presence() {
    let mut p = pass(ts(12, 0));

    // Before and at expiry a check-out always passes.
    assert!(may_check_out(&p, ts(11, 0)));
    assert!(may_check_out(&p, ts(12, 0)));

    // After expiry, still inside on a grace-eligible check-in.
    p.check_in_time = Some(ts(11, 55));
    assert!(may_check_out(&p, ts(12, 10)));

    // After expiry with an early check-in: no grace.
    p.check_in_time = Some(ts(9, 0));
    assert!(!may_check_out(&p, ts(12, 10)));

    // After expiry and already checked out: nothing to honor.
    p.check_in_time = Some(ts(11, 55));
    p.check_out_time = Some(ts(11, 58));
    assert!(!may_check_out(&p, ts(12, 10)));
  }

  #[test]
  fn check_in_never_gets_grace() {
    let mut p = pass(ts(12, 0));
    p.check_in_time = Some(ts(11, 55));
    p.check_out_time = Some(ts(12, 5));

    assert!(may_check_in(&p, ts(12, 0)));
    assert!(!may_check_in(&p, ts(12, 0) + Duration::seconds(1)));
  }

  #[test]
  fn cleanup_boundary_is_strict() {
    let p = pass(ts(12, 0));
    assert!(!cleanup_due(&p, ts(13, 0)));
    assert!(cleanup_due(&p, ts(13, 1)));

    let inactive = SpecialPass { status: PassStatus::Inactive, ..p.clone() };
    assert!(!cleanup_due(&inactive, ts(23, 0)));

    let expired = SpecialPass { status: PassStatus::Expired, ..p };
    assert!(!cleanup_due(&expired, ts(23, 0)));
  }
}
