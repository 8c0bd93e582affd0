//! Encoding and decoding between domain records and delimited table lines.
//!
//! One record per line, fields joined by [`DELIMITER`]. Decoders take a
//! pre-trimmed, non-comment line and fail on damage; the store skips the
//! line and keeps loading. Optional trailing fields may be absent entirely
//! or present but empty — both decode as their default.

use gatehouse_core::{
  Error, Result,
  audit::AccessEntry,
  clock::{format_timestamp, parse_timestamp},
  pass::{PassStatus, SpecialPass},
  person::{Person, PersonStatus, Role},
  violation::ViolationCount,
};

pub const DELIMITER: char = ',';
pub const COMMENT: char = '#';

// ─── Field helpers ───────────────────────────────────────────────────────────

/// Field values never contain the delimiter or a line break; enforced here
/// on every encode.
fn sanitize(field: &str) -> String {
  field
    .chars()
    .map(|c| if c == DELIMITER || c == '\n' || c == '\r' { ' ' } else { c })
    .collect()
}

/// `Some(trimmed)` when non-empty, `None` otherwise.
fn opt_field(s: Option<&&str>) -> Option<String> {
  s.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

fn require(parts: &[&str], expected: usize) -> Result<()> {
  if parts.len() < expected {
    return Err(Error::TooFewFields { expected, got: parts.len() });
  }
  Ok(())
}

fn opt_timestamp(
  s: Option<&&str>,
) -> Result<Option<chrono::NaiveDateTime>> {
  match opt_field(s) {
    Some(raw) => Ok(Some(parse_timestamp(&raw)?)),
    None => Ok(None),
  }
}

fn encode_opt_timestamp(t: Option<chrono::NaiveDateTime>) -> String {
  t.map(format_timestamp).unwrap_or_default()
}

// ─── Person ──────────────────────────────────────────────────────────────────

pub fn encode_person(p: &Person) -> String {
  [
    sanitize(&p.id),
    p.role.to_string(),
    sanitize(&p.name),
    p.status.to_string(),
    sanitize(p.image_path.as_deref().unwrap_or_default()),
    p.violation_count.to_string(),
  ]
  .join(",")
}

pub fn decode_person(line: &str) -> Result<Person> {
  let parts: Vec<&str> = line.split(DELIMITER).collect();
  require(&parts, 4)?;

  let role: Role = parts[1]
    .trim()
    .parse()
    .map_err(|_| Error::UnknownRole(parts[1].trim().to_string()))?;
  let status: PersonStatus = parts[3]
    .trim()
    .parse()
    .map_err(|_| Error::UnknownPersonStatus(parts[3].trim().to_string()))?;

  // An unparsable count is treated like an absent one.
  let violation_count = opt_field(parts.get(5))
    .and_then(|s| s.parse().ok())
    .unwrap_or(0);

  Ok(Person {
    id: parts[0].trim().to_string(),
    role,
    name: parts[2].trim().to_string(),
    status,
    image_path: opt_field(parts.get(4)),
    violation_count,
  })
}

// ─── Special pass ────────────────────────────────────────────────────────────

pub fn encode_pass(p: &SpecialPass) -> String {
  [
    sanitize(&p.name),
    sanitize(&p.contact),
    sanitize(&p.visiting_as),
    sanitize(&p.purpose),
    sanitize(&p.visiting),
    sanitize(&p.id_type),
    sanitize(&p.code),
    format_timestamp(p.created_at),
    format_timestamp(p.expires_at),
    p.status.to_string(),
    encode_opt_timestamp(p.check_in_time),
    encode_opt_timestamp(p.check_out_time),
  ]
  .join(",")
}

pub fn decode_pass(line: &str) -> Result<SpecialPass> {
  let parts: Vec<&str> = line.split(DELIMITER).collect();
  require(&parts, 10)?;

  let status: PassStatus = parts[9]
    .trim()
    .parse()
    .map_err(|_| Error::UnknownPassStatus(parts[9].trim().to_string()))?;

  Ok(SpecialPass {
    name: parts[0].trim().to_string(),
    contact: parts[1].trim().to_string(),
    visiting_as: parts[2].trim().to_string(),
    purpose: parts[3].trim().to_string(),
    visiting: parts[4].trim().to_string(),
    id_type: parts[5].trim().to_string(),
    code: parts[6].trim().to_string(),
    created_at: parse_timestamp(parts[7])?,
    expires_at: parse_timestamp(parts[8])?,
    status,
    check_in_time: opt_timestamp(parts.get(10))?,
    check_out_time: opt_timestamp(parts.get(11))?,
  })
}

// ─── Violation counter ───────────────────────────────────────────────────────

pub fn encode_violation(v: &ViolationCount) -> String {
  format!("{},{}", sanitize(&v.person_id), v.count)
}

pub fn decode_violation(line: &str) -> Result<ViolationCount> {
  let parts: Vec<&str> = line.split(DELIMITER).collect();
  require(&parts, 2)?;

  let count = parts[1]
    .trim()
    .parse()
    .map_err(|_| Error::InvalidCount(parts[1].trim().to_string()))?;

  Ok(ViolationCount { person_id: parts[0].trim().to_string(), count })
}

// ─── Access entry ────────────────────────────────────────────────────────────

/// The log is write-only from the core's point of view; there is no decoder.
pub fn encode_access(e: &AccessEntry) -> String {
  [
    format_timestamp(e.timestamp),
    sanitize(&e.id),
    sanitize(&e.action),
    e.role.map(|r| r.to_string()).unwrap_or_else(|| "UNKNOWN".into()),
    sanitize(e.name.as_deref().unwrap_or("UNKNOWN")),
    e.outcome.to_string(),
  ]
  .join(",")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use gatehouse_core::audit::AccessOutcome;

  use super::*;

  fn ts(h: u32, m: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
      .unwrap()
      .and_hms_opt(h, m, 0)
      .unwrap()
  }

  // ── Person ──────────────────────────────────────────────────────────────

  #[test]
  fn person_minimal_four_fields() {
    let p = decode_person("2023-00123,STUDENT_NUMBER,Ana Reyes,ACTIVE")
      .unwrap();
    assert_eq!(p.id, "2023-00123");
    assert_eq!(p.role, Role::StudentNumber);
    assert_eq!(p.name, "Ana Reyes");
    assert_eq!(p.status, PersonStatus::Active);
    assert_eq!(p.image_path, None);
    assert_eq!(p.violation_count, 0);
  }

  #[test]
  fn person_full_roundtrip() {
    let p = Person {
      id:              "0095339862".into(),
      role:            Role::Guard,
      name:            "R. Santos".into(),
      status:          PersonStatus::Inactive,
      image_path:      Some("photos/santos.png".into()),
      violation_count: 3,
    };
    let decoded = decode_person(&encode_person(&p)).unwrap();
    assert_eq!(decoded.id, p.id);
    assert_eq!(decoded.role, p.role);
    assert_eq!(decoded.status, p.status);
    assert_eq!(decoded.image_path, p.image_path);
    assert_eq!(decoded.violation_count, 3);
  }

  #[test]
  fn person_empty_trailing_fields_default() {
    let p = decode_person("x,GUARD,Bo,ACTIVE,,").unwrap();
    assert_eq!(p.image_path, None);
    assert_eq!(p.violation_count, 0);
  }

  #[test]
  fn person_unparsable_count_defaults_to_zero() {
    let p = decode_person("x,GUARD,Bo,ACTIVE,,lots").unwrap();
    assert_eq!(p.violation_count, 0);
  }

  #[test]
  fn person_too_few_fields_rejected() {
    assert!(matches!(
      decode_person("x,GUARD,Bo"),
      Err(Error::TooFewFields { expected: 4, got: 3 })
    ));
  }

  #[test]
  fn person_unknown_role_rejected() {
    assert!(matches!(
      decode_person("x,JANITOR,Bo,ACTIVE"),
      Err(Error::UnknownRole(_))
    ));
  }

  #[test]
  fn person_delimiter_sanitized_on_encode() {
    let p = Person {
      id:              "x".into(),
      role:            Role::Teacher,
      name:            "Reyes, Ana".into(),
      status:          PersonStatus::Active,
      image_path:      None,
      violation_count: 0,
    };
    let decoded = decode_person(&encode_person(&p)).unwrap();
    assert_eq!(decoded.name, "Reyes  Ana");
  }

  // ── Pass ────────────────────────────────────────────────────────────────

  fn pass() -> SpecialPass {
    SpecialPass {
      name:           "Dana Cruz".into(),
      contact:        "0917-555-0101".into(),
      visiting_as:    "Parent".into(),
      purpose:        "Enrollment".into(),
      visiting:       "Registrar".into(),
      id_type:        "Driver's License".into(),
      code:           "4420011223".into(),
      created_at:     ts(8, 0),
      expires_at:     ts(8, 0) + chrono::Duration::hours(24),
      status:         PassStatus::Active,
      check_in_time:  None,
      check_out_time: None,
    }
  }

  #[test]
  fn pass_roundtrip_without_check_times() {
    let decoded = decode_pass(&encode_pass(&pass())).unwrap();
    assert_eq!(decoded.code, "4420011223");
    assert_eq!(decoded.created_at, ts(8, 0));
    assert_eq!(decoded.status, PassStatus::Active);
    assert_eq!(decoded.check_in_time, None);
    assert_eq!(decoded.check_out_time, None);
  }

  #[test]
  fn pass_roundtrip_with_check_times() {
    let mut p = pass();
    p.check_in_time = Some(ts(9, 30));
    p.check_out_time = Some(ts(11, 15));
    let decoded = decode_pass(&encode_pass(&p)).unwrap();
    assert_eq!(decoded.check_in_time, Some(ts(9, 30)));
    assert_eq!(decoded.check_out_time, Some(ts(11, 15)));
  }

  #[test]
  fn pass_ten_fields_is_enough() {
    let line = "Dana,0917,Parent,Enrollment,Registrar,License,P1,\
                2025-06-01 08:00:00,2025-06-02 08:00:00,ACTIVE";
    let p = decode_pass(line).unwrap();
    assert_eq!(p.check_in_time, None);
  }

  #[test]
  fn pass_bad_timestamp_rejected() {
    let line = "Dana,0917,Parent,Enrollment,Registrar,License,P1,\
                yesterday,2025-06-02 08:00:00,ACTIVE";
    assert!(matches!(decode_pass(line), Err(Error::InvalidTimestamp(_))));
  }

  // ── Violations / access ─────────────────────────────────────────────────

  #[test]
  fn violation_roundtrip() {
    let v = ViolationCount { person_id: "2023-00123".into(), count: 2 };
    assert_eq!(decode_violation(&encode_violation(&v)).unwrap(), v);
  }

  #[test]
  fn violation_bad_count_rejected() {
    assert!(decode_violation("2023-00123,many").is_err());
  }

  #[test]
  fn access_entry_unknowns_for_unresolved_scan() {
    let e = AccessEntry {
      timestamp: ts(8, 5),
      id:        "junk".into(),
      action:    "SCAN".into(),
      role:      None,
      name:      None,
      outcome:   AccessOutcome::Failed,
    };
    assert_eq!(
      encode_access(&e),
      "2025-06-01 08:05:00,junk,SCAN,UNKNOWN,UNKNOWN,FAILED"
    );
  }
}
