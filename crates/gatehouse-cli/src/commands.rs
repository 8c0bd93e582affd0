//! Command implementations: thin wrappers that call one engine operation
//! and render its outcome as text or JSON.

use anyhow::Result;
use gatehouse_core::{
  clock::format_timestamp,
  lifecycle::{CheckKind, CheckOutcome, CheckState, RegisterOutcome},
  pass::NewPass,
  person::{Person, PersonStatus, PersonUpdate, Role},
};
use gatehouse_engine::CheckpointEngine;
use gatehouse_store_flatfile::FlatFileStore;
use serde::Serialize;

type Engine = CheckpointEngine<FlatFileStore>;

fn emit<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

// ─── Scan ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ScanReport {
  code:   String,
  person: Option<Person>,
  check:  Option<CheckOutcome>,
}

/// The checkpoint flow for one scanned credential: resolve, toggle a
/// special pass through its next check, and append to the access log.
///
/// A code that no longer resolves may still name an expired pass whose
/// bearer is inside on a grace-eligible check-in; the toggle is attempted
/// so the late check-out is honored (or refused as deactivated).
pub fn scan(engine: &Engine, code: &str, json: bool) -> Result<()> {
  let person = engine.resolve(code)?;

  let names_a_pass =
    person.is_none() && engine.check_state(code)?.is_some();

  let (action, check) = match &person {
    Some(p) if p.role == Role::Special => {
      ("SPECIAL_PASS_SCAN".to_string(), Some(engine.toggle(code)?))
    }
    Some(p) => (format!("{}_ACCESS", p.role), None),
    None if names_a_pass => {
      ("SPECIAL_PASS_SCAN".to_string(), Some(engine.toggle(code)?))
    }
    None => ("SCAN".to_string(), None),
  };
  engine.log_access(code, &action);

  if json {
    return emit(&ScanReport {
      code: code.to_string(),
      person,
      check,
    });
  }

  match (person, check) {
    (Some(p), Some(check)) => {
      println!("{} — Special Pass {}", p.name, p.id);
      print_check(&check);
    }
    (Some(p), None) => {
      let violations = engine.violation_count(&p.id)?;
      println!("{} — {} ({})", p.name, p.role, p.id);
      if violations > 0 {
        println!("Violations on record: {violations}");
      }
    }
    (None, Some(check)) => print_check(&check),
    (None, None) => println!("Unknown / Invalid ID has been scanned."),
  }
  Ok(())
}

fn print_check(check: &CheckOutcome) {
  match check {
    CheckOutcome::Accepted { kind, at } => {
      println!("{kind} recorded at {}", format_timestamp(*at));
    }
    CheckOutcome::Deactivated => println!("Special Pass is Deactivated."),
    CheckOutcome::NotFound => {
      println!("Unknown / Invalid ID has been scanned.");
    }
  }
}

// ─── Passes ───────────────────────────────────────────────────────────────────

pub fn register(engine: &Engine, input: NewPass, json: bool) -> Result<()> {
  let outcome = engine.register(input)?;

  if json {
    return emit(&outcome);
  }

  match outcome {
    RegisterOutcome::Registered(pass) => {
      println!(
        "Registered Special Pass {} for {} until {}",
        pass.code,
        pass.name,
        format_timestamp(pass.expires_at)
      );
    }
    RegisterOutcome::Rejected { holder_name, expires_at } => {
      println!(
        "Special Pass is already in use by {holder_name} until {}",
        format_timestamp(expires_at)
      );
    }
  }
  Ok(())
}

pub fn check(
  engine: &Engine,
  code: &str,
  kind: CheckKind,
  json: bool,
) -> Result<()> {
  let outcome = engine.record_check(code, kind)?;
  if json {
    return emit(&outcome);
  }
  print_check(&outcome);
  Ok(())
}

#[derive(Serialize)]
struct StatusReport {
  code:           String,
  state:          Option<CheckState>,
  check_in_time:  Option<String>,
  check_out_time: Option<String>,
}

pub fn status(engine: &Engine, code: &str, json: bool) -> Result<()> {
  let state = engine.check_state(code)?;
  let times = engine.check_times(code)?;

  let (check_in, check_out) = times.unwrap_or((None, None));
  let report = StatusReport {
    code:           code.to_string(),
    state,
    check_in_time:  check_in.map(format_timestamp),
    check_out_time: check_out.map(format_timestamp),
  };

  if json {
    return emit(&report);
  }

  match report.state {
    Some(state) => {
      println!("{code}: {state}");
      if let Some(t) = report.check_in_time {
        println!("  checked in  {t}");
      }
      if let Some(t) = report.check_out_time {
        println!("  checked out {t}");
      }
    }
    None => println!("{code}: no pass on file"),
  }
  Ok(())
}

pub fn available(engine: &Engine, code: &str, json: bool) -> Result<()> {
  let available = engine.is_available(code)?;
  if json {
    return emit(&serde_json::json!({ "code": code, "available": available }));
  }
  println!(
    "{code} is {}",
    if available { "available" } else { "in use" }
  );
  Ok(())
}

pub fn cleanup(engine: &Engine, json: bool) -> Result<()> {
  let removed = engine.cleanup_expired()?;
  if json {
    return emit(&serde_json::json!({ "removed": removed }));
  }
  println!("Removed {removed} stale special pass(es)");
  Ok(())
}

// ─── Roster ───────────────────────────────────────────────────────────────────

pub fn person_add(
  engine: &Engine,
  id: String,
  role: Role,
  name: String,
  image: Option<String>,
  violations: u32,
  json: bool,
) -> Result<()> {
  let person = engine.add_person(Person {
    id,
    role,
    name,
    status: PersonStatus::Active,
    image_path: image,
    violation_count: violations,
  })?;

  if json {
    return emit(&person);
  }
  println!("Added {} — {} ({})", person.name, person.role, person.id);
  Ok(())
}

pub fn person_update(
  engine: &Engine,
  id: &str,
  role: Option<Role>,
  name: Option<String>,
  status: Option<PersonStatus>,
  json: bool,
) -> Result<()> {
  let person = engine.update_person(id, PersonUpdate { role, name, status })?;

  if json {
    return emit(&person);
  }
  println!(
    "Updated {} — {} ({}) [{}]",
    person.name, person.role, person.id, person.status
  );
  Ok(())
}

pub fn person_deactivate(engine: &Engine, id: &str, json: bool) -> Result<()> {
  let person = engine.deactivate_person(id)?;

  if json {
    return emit(&person);
  }
  println!("Deactivated {} ({})", person.name, person.id);
  Ok(())
}

pub fn person_list(
  engine: &Engine,
  role: Option<Role>,
  json: bool,
) -> Result<()> {
  let people = match role {
    Some(role) => engine.people_by_role(role)?,
    None => engine.active_people()?,
  };

  if json {
    return emit(&people);
  }
  for p in &people {
    println!("{}\t{}\t{}\tviolations: {}", p.id, p.role, p.name, p.violation_count);
  }
  Ok(())
}

// ─── Violations ───────────────────────────────────────────────────────────────

pub fn violation_get(engine: &Engine, id: &str, json: bool) -> Result<()> {
  let count = engine.violation_count(id)?;
  if json {
    return emit(&serde_json::json!({ "person_id": id, "count": count }));
  }
  println!("{id}: {count} violation(s)");
  Ok(())
}

pub fn violation_add(engine: &Engine, id: &str, json: bool) -> Result<()> {
  let count = engine.add_violation(id)?;
  if json {
    return emit(&serde_json::json!({ "person_id": id, "count": count }));
  }
  println!("{id}: {count} violation(s)");
  Ok(())
}
