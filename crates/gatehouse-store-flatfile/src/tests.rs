//! Integration tests for `FlatFileStore` against a temp directory.

use std::fs;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use gatehouse_core::{
  audit::AccessEntry,
  pass::{PassStatus, SpecialPass},
  person::{Person, PersonStatus, Role},
  store::RecordStore,
  violation::ViolationCount,
};
use tempfile::TempDir;

use crate::FlatFileStore;

fn store() -> (FlatFileStore, TempDir) {
  let dir = TempDir::new().expect("temp dir");
  let store = FlatFileStore::open(dir.path()).expect("open store");
  (store, dir)
}

fn ts(h: u32, m: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2025, 6, 1)
    .unwrap()
    .and_hms_opt(h, m, 0)
    .unwrap()
}

fn guard(id: &str, name: &str) -> Person {
  Person {
    id:              id.into(),
    role:            Role::Guard,
    name:            name.into(),
    status:          PersonStatus::Active,
    image_path:      None,
    violation_count: 0,
  }
}

fn pass(code: &str, created_at: NaiveDateTime) -> SpecialPass {
  SpecialPass {
    name:           "Dana Cruz".into(),
    contact:        "0917-555-0101".into(),
    visiting_as:    "Parent".into(),
    purpose:        "Enrollment".into(),
    visiting:       "Registrar".into(),
    id_type:        "Driver's License".into(),
    code:           code.into(),
    created_at,
    expires_at:     created_at + Duration::hours(24),
    status:         PassStatus::Active,
    check_in_time:  None,
    check_out_time: None,
  }
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[test]
fn open_seeds_all_tables_with_headers() {
  let (store, _dir) = store();
  for file in
    ["people.txt", "passes.txt", "violations.txt", "access_log.txt"]
  {
    let raw = fs::read_to_string(store.dir().join(file)).unwrap();
    assert!(raw.starts_with('#'), "{file} missing header");
  }
}

#[test]
fn load_from_deleted_table_reseeds_and_returns_empty() {
  let (store, _dir) = store();
  fs::remove_file(store.dir().join("people.txt")).unwrap();

  let people = store.load_people().unwrap();
  assert!(people.is_empty());
  assert!(store.dir().join("people.txt").exists());
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[test]
fn comments_blanks_and_malformed_lines_are_skipped() {
  let (store, _dir) = store();
  fs::write(
    store.dir().join("people.txt"),
    "# header\n\
     \n\
     0095339862,GUARD,R. Santos,ACTIVE\n\
     too,few\n\
     x1,JANITOR,Nobody,ACTIVE\n\
     # trailing comment\n\
     2023-00123,STUDENT_NUMBER,Ana Reyes,ACTIVE,photos/ana.png,2\n",
  )
  .unwrap();

  let people = store.load_people().unwrap();
  assert_eq!(people.len(), 2);
  assert_eq!(people[0].id, "0095339862");
  assert_eq!(people[1].image_path.as_deref(), Some("photos/ana.png"));
  assert_eq!(people[1].violation_count, 2);
}

#[test]
fn pass_with_bad_timestamp_is_skipped() {
  let (store, _dir) = store();
  fs::write(
    store.dir().join("passes.txt"),
    "# header\n\
     Dana,0917,Parent,Enrollment,Registrar,License,P1,\
     not-a-time,2025-06-02 08:00:00,ACTIVE\n\
     Eli,0918,Vendor,Delivery,Canteen,Company ID,P2,\
     2025-06-01 08:00:00,2025-06-02 08:00:00,ACTIVE\n",
  )
  .unwrap();

  let passes = store.load_passes().unwrap();
  assert_eq!(passes.len(), 1);
  assert_eq!(passes[0].code, "P2");
}

// ─── Saving ──────────────────────────────────────────────────────────────────

#[test]
fn save_people_rewrites_whole_table() {
  let (store, _dir) = store();
  store
    .save_people(&[guard("g1", "A"), guard("g2", "B")])
    .unwrap();

  let mut people = store.load_people().unwrap();
  assert_eq!(people.len(), 2);

  people[1].status = PersonStatus::Inactive;
  store.save_people(&people).unwrap();

  let reloaded = store.load_people().unwrap();
  assert_eq!(reloaded.len(), 2);
  assert_eq!(reloaded[0].status, PersonStatus::Active);
  assert_eq!(reloaded[1].status, PersonStatus::Inactive);

  // The rewrite keeps the header block.
  let raw = fs::read_to_string(store.dir().join("people.txt")).unwrap();
  assert!(raw.starts_with('#'));
}

#[test]
fn pass_check_times_survive_a_rewrite() {
  let (store, _dir) = store();
  let mut p = pass("P1", ts(8, 0));
  p.check_in_time = Some(ts(9, 30));
  store.save_passes(&[p]).unwrap();

  let reloaded = store.load_passes().unwrap();
  assert_eq!(reloaded[0].check_in_time, Some(ts(9, 30)));
  assert_eq!(reloaded[0].check_out_time, None);
}

#[test]
fn violations_roundtrip() {
  let (store, _dir) = store();
  store
    .save_violations(&[ViolationCount {
      person_id: "2023-00123".into(),
      count:     2,
    }])
    .unwrap();

  let reloaded = store.load_violations().unwrap();
  assert_eq!(reloaded.len(), 1);
  assert_eq!(reloaded[0].count, 2);
}

// ─── Access log ──────────────────────────────────────────────────────────────

#[test]
fn access_log_is_append_only() {
  let (store, _dir) = store();
  store
    .append_access(&AccessEntry::granted(
      ts(8, 0),
      "0095339862",
      "SCAN",
      Role::Guard,
      "R. Santos",
    ))
    .unwrap();
  store
    .append_access(&AccessEntry::denied(ts(8, 1), "junk", "SCAN"))
    .unwrap();

  let raw = fs::read_to_string(store.dir().join("access_log.txt")).unwrap();
  let lines: Vec<&str> =
    raw.lines().filter(|l| !l.starts_with('#')).collect();
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0], "2025-06-01 08:00:00,0095339862,SCAN,GUARD,R. Santos,SUCCESS");
  assert_eq!(lines[1], "2025-06-01 08:01:00,junk,SCAN,UNKNOWN,UNKNOWN,FAILED");
}
