//! The `Clock` trait and the shared table timestamp codec.
//!
//! The engine never reads the wall clock directly; every time-dependent
//! decision (expiry, grace, cleanup) goes through a [`Clock`] so tests can
//! substitute a manual one.

use chrono::{Local, NaiveDateTime, Timelike};

use crate::{Error, Result};

/// Timestamp format used by every table: local time, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp the way the tables store it.
pub fn format_timestamp(t: NaiveDateTime) -> String {
  t.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a table timestamp.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
    .map_err(|_| Error::InvalidTimestamp(s.to_string()))
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of "now" for all lifecycle arithmetic.
pub trait Clock {
  fn now(&self) -> NaiveDateTime;
}

/// The wall clock, truncated to the second precision the tables carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamp_roundtrip() {
    let t = parse_timestamp("2025-06-01 13:45:09").unwrap();
    assert_eq!(format_timestamp(t), "2025-06-01 13:45:09");
  }

  #[test]
  fn bad_timestamp_is_an_error() {
    assert!(matches!(
      parse_timestamp("01/06/2025 13:45"),
      Err(Error::InvalidTimestamp(_))
    ));
  }

  #[test]
  fn system_clock_has_second_precision() {
    let now = SystemClock.now();
    assert_eq!(now.nanosecond(), 0);
  }
}
