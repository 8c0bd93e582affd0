//! Identity resolution — mapping a scanned code to a person.

use chrono::NaiveDateTime;
use gatehouse_core::{
  clock::Clock,
  lifecycle,
  pass::{PassStatus, SpecialPass},
  person::{Person, PersonStatus, Role},
  store::RecordStore,
};

use crate::{CheckpointEngine, Error, Result};

impl<S: RecordStore, C: Clock> CheckpointEngine<S, C> {
  /// Resolve a scanned code to a person.
  ///
  /// Precedence: a live special pass wins (freshest registration among
  /// duplicates), then an active identity row, with `StudentRfid` mapping
  /// rows followed through to their `StudentNumber` record. Returns `None`
  /// when nothing matches.
  ///
  /// Not read-only: stale passes are reclaimed and any `Active` pass row
  /// past expiry is flipped to `Expired` (in a single table rewrite)
  /// before matching.
  pub fn resolve(&self, code: &str) -> Result<Option<Person>> {
    self.cleanup_expired()?;
    let now = self.now();

    let mut passes = self.store.load_passes().map_err(Error::store)?;
    self.expire_due(&mut passes, now)?;

    if let Some(pass) = freshest_live_pass(&passes, code, now) {
      return Ok(Some(special_person(pass)));
    }

    let people = self.store.load_people().map_err(Error::store)?;
    Ok(resolve_identity(&people, code))
  }

  /// Read-only variant of [`resolve`](Self::resolve): same precedence, no
  /// expiry sweep and no cleanup. Used where a lookup must not write, e.g.
  /// while composing an audit line.
  pub fn peek(&self, code: &str) -> Result<Option<Person>> {
    let now = self.now();

    let passes = self.store.load_passes().map_err(Error::store)?;
    if let Some(pass) = freshest_live_pass(&passes, code, now) {
      return Ok(Some(special_person(pass)));
    }

    let people = self.store.load_people().map_err(Error::store)?;
    Ok(resolve_identity(&people, code))
  }

  /// Display name for a guard credential; `"Unknown Guard"` when the code
  /// does not resolve to an active guard.
  pub fn guard_name(&self, code: &str) -> Result<String> {
    Ok(match self.peek(code)? {
      Some(p) if p.role == Role::Guard => p.name,
      _ => "Unknown Guard".to_string(),
    })
  }

  /// Whether an active `StudentNumber` row carries this id. Used by the
  /// manual student-number entry flow.
  pub fn is_student_number_valid(&self, student_number: &str) -> Result<bool> {
    let people = self.store.load_people().map_err(Error::store)?;
    Ok(people.iter().any(|p| {
      p.role == Role::StudentNumber && p.id == student_number && p.is_active()
    }))
  }

  /// Flip every `Active` row past expiry to `Expired`, persisting once if
  /// anything changed.
  fn expire_due(
    &self,
    passes: &mut [SpecialPass],
    now: NaiveDateTime,
  ) -> Result<()> {
    let mut expired = 0usize;
    for pass in passes.iter_mut().filter(|p| lifecycle::expiry_due(p, now)) {
      pass.status = PassStatus::Expired;
      expired += 1;
    }
    if expired > 0 {
      self.store.save_passes(passes).map_err(Error::store)?;
      tracing::debug!(expired, "lazy-expired special passes");
    }
    Ok(())
  }
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// The live pass row holding `code` with the most recent `created_at`:
/// the freshest registration wins over stale duplicates.
fn freshest_live_pass<'a>(
  passes: &'a [SpecialPass],
  code: &str,
  now: NaiveDateTime,
) -> Option<&'a SpecialPass> {
  passes
    .iter()
    .filter(|p| p.code == code && lifecycle::is_live(p, now))
    .max_by_key(|p| p.created_at)
}

/// The person a live pass presents as at the checkpoint.
fn special_person(pass: &SpecialPass) -> Person {
  Person {
    id:              pass.code.clone(),
    role:            Role::Special,
    name:            pass.name.clone(),
    status:          PersonStatus::Active,
    image_path:      None,
    violation_count: 0,
  }
}

/// Match `code` against the identity table, following `StudentRfid`
/// mapping rows to their canonical `StudentNumber` record.
fn resolve_identity(people: &[Person], code: &str) -> Option<Person> {
  let row = people.iter().find(|p| p.id == code && p.is_active())?;

  match row.linked_student_id() {
    Some(student_id) => people
      .iter()
      .find(|p| {
        p.role == Role::StudentNumber && p.id == student_id && p.is_active()
      })
      .cloned(),
    None => Some(row.clone()),
  }
}
