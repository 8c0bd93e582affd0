//! [`FlatFileStore`] — the flat-file implementation of [`RecordStore`].

use std::{
  fs::{self, OpenOptions},
  io::Write as _,
  path::{Path, PathBuf},
};

use gatehouse_core::{
  audit::AccessEntry, pass::SpecialPass, person::Person, store::RecordStore,
  violation::ViolationCount,
};

use crate::{
  Error, Result,
  codec::{
    self, COMMENT, encode_access, encode_pass, encode_person,
    encode_violation,
  },
  tables::{
    ACCESS_LOG_FILE, ACCESS_LOG_HEADER, PASSES_FILE, PASSES_HEADER,
    PEOPLE_FILE, PEOPLE_HEADER, VIOLATIONS_FILE, VIOLATIONS_HEADER,
  },
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Gatehouse record store backed by four delimited text files in one
/// directory.
///
/// Cloning is cheap — the store holds only the directory path; every call
/// reads the backing file fresh.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
  dir: PathBuf,
}

impl FlatFileStore {
  /// Open a store at `dir`, creating the directory and seeding any missing
  /// table with its header block.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir)
      .map_err(|source| Error::Write { path: dir.clone(), source })?;

    let store = Self { dir };
    store.seed(PEOPLE_FILE, PEOPLE_HEADER)?;
    store.seed(PASSES_FILE, PASSES_HEADER)?;
    store.seed(VIOLATIONS_FILE, VIOLATIONS_HEADER)?;
    store.seed(ACCESS_LOG_FILE, ACCESS_LOG_HEADER)?;
    Ok(store)
  }

  pub fn dir(&self) -> &Path { &self.dir }

  fn path(&self, file: &str) -> PathBuf { self.dir.join(file) }

  /// Create `file` with `header` if it does not exist yet.
  fn seed(&self, file: &str, header: &str) -> Result<()> {
    let path = self.path(file);
    if !path.exists() {
      fs::write(&path, header)
        .map_err(|source| Error::Write { path, source })?;
    }
    Ok(())
  }

  /// Read every record line of `file`: comments and blanks dropped,
  /// re-seeding the table if it went missing.
  fn load_lines(&self, file: &str, header: &str) -> Result<Vec<String>> {
    let path = self.path(file);
    let raw = match fs::read_to_string(&path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        self.seed(file, header)?;
        return Ok(Vec::new());
      }
      Err(source) => return Err(Error::Read { path, source }),
    };

    Ok(
      raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with(COMMENT))
        .map(str::to_string)
        .collect(),
    )
  }

  /// Rewrite `file` whole: header plus one line per record, written to a
  /// temp file in the same directory and renamed over the original so a
  /// crash mid-save never truncates the table.
  fn rewrite(&self, file: &str, header: &str, lines: &[String]) -> Result<()> {
    let path = self.path(file);
    let write_err =
      |source: std::io::Error| Error::Write { path: path.clone(), source };

    let mut tmp =
      tempfile::NamedTempFile::new_in(&self.dir).map_err(write_err)?;
    tmp.write_all(header.as_bytes()).map_err(write_err)?;
    for line in lines {
      writeln!(tmp, "{line}").map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;
    Ok(())
  }

  /// Decode every loaded line with `decode`, skipping damaged ones with a
  /// warning.
  fn load_records<T>(
    &self,
    file: &str,
    header: &str,
    decode: impl Fn(&str) -> gatehouse_core::Result<T>,
  ) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for line in self.load_lines(file, header)? {
      match decode(&line) {
        Ok(record) => records.push(record),
        Err(e) => {
          tracing::warn!(table = file, error = %e, "skipping malformed record");
        }
      }
    }
    Ok(records)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for FlatFileStore {
  type Error = Error;

  fn load_people(&self) -> Result<Vec<Person>> {
    self.load_records(PEOPLE_FILE, PEOPLE_HEADER, codec::decode_person)
  }

  fn save_people(&self, people: &[Person]) -> Result<()> {
    let lines: Vec<String> = people.iter().map(encode_person).collect();
    self.rewrite(PEOPLE_FILE, PEOPLE_HEADER, &lines)
  }

  fn load_passes(&self) -> Result<Vec<SpecialPass>> {
    self.load_records(PASSES_FILE, PASSES_HEADER, codec::decode_pass)
  }

  fn save_passes(&self, passes: &[SpecialPass]) -> Result<()> {
    let lines: Vec<String> = passes.iter().map(encode_pass).collect();
    self.rewrite(PASSES_FILE, PASSES_HEADER, &lines)
  }

  fn load_violations(&self) -> Result<Vec<ViolationCount>> {
    self.load_records(
      VIOLATIONS_FILE,
      VIOLATIONS_HEADER,
      codec::decode_violation,
    )
  }

  fn save_violations(&self, violations: &[ViolationCount]) -> Result<()> {
    let lines: Vec<String> =
      violations.iter().map(encode_violation).collect();
    self.rewrite(VIOLATIONS_FILE, VIOLATIONS_HEADER, &lines)
  }

  fn append_access(&self, entry: &AccessEntry) -> Result<()> {
    let path = self.path(ACCESS_LOG_FILE);
    self.seed(ACCESS_LOG_FILE, ACCESS_LOG_HEADER)?;

    let mut file = OpenOptions::new()
      .append(true)
      .open(&path)
      .map_err(|source| Error::Write { path: path.clone(), source })?;
    writeln!(file, "{}", encode_access(entry))
      .map_err(|source| Error::Write { path, source })?;
    Ok(())
  }
}
