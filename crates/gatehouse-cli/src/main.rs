//! `gatehouse` — command-line front end for the checkpoint engine.
//!
//! # Usage
//!
//! ```
//! gatehouse --data-dir /var/lib/gatehouse scan 0095339862
//! gatehouse register P1 --name "Dana Cruz" --contact 0917-555-0101 \
//!   --visiting-as Parent --purpose Enrollment --visiting Registrar \
//!   --id-type "Driver's License"
//! gatehouse --config ~/.config/gatehouse/config.toml person list
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gatehouse_core::{
  lifecycle::CheckKind,
  person::{PersonStatus, Role},
};
use gatehouse_engine::CheckpointEngine;
use gatehouse_store_flatfile::FlatFileStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "gatehouse", about = "Checkpoint controller over flat-file records")]
struct Args {
  /// Path to a TOML config file (data_dir).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Directory holding the record tables (default: current directory).
  #[arg(long, env = "GATEHOUSE_DATA_DIR")]
  data_dir: Option<PathBuf>,

  /// Emit machine-readable JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Process a scanned credential: resolve it, toggle a special pass,
  /// and append to the access log.
  Scan { code: String },

  /// Register a visitor special pass, valid for 24 hours.
  Register {
    code: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    contact: String,
    #[arg(long)]
    visiting_as: String,
    #[arg(long)]
    purpose: String,
    #[arg(long)]
    visiting: String,
    #[arg(long)]
    id_type: String,
  },

  /// Apply an explicit CHECK_IN or CHECK_OUT to a pass.
  Check { code: String, kind: CheckKind },

  /// Show a pass's derived check state and recorded times.
  Status { code: String },

  /// Whether a code can be given to a new visitor.
  Available { code: String },

  /// Delete special passes more than an hour past expiry.
  Cleanup,

  /// Roster administration.
  #[command(subcommand)]
  Person(PersonCommand),

  /// Violation counters.
  #[command(subcommand)]
  Violation(ViolationCommand),
}

#[derive(Subcommand, Debug)]
enum PersonCommand {
  /// Add an identity row.
  Add {
    id: String,
    #[arg(long)]
    role: Role,
    #[arg(long)]
    name: String,
    #[arg(long)]
    image: Option<String>,
    #[arg(long, default_value_t = 0)]
    violations: u32,
  },
  /// Patch role/name/status of an identity row.
  Update {
    id: String,
    #[arg(long)]
    role: Option<Role>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    status: Option<PersonStatus>,
  },
  /// Soft-delete an identity row.
  Deactivate { id: String },
  /// List active identity rows, optionally by role.
  List {
    #[arg(long)]
    role: Option<Role>,
  },
}

#[derive(Subcommand, Debug)]
enum ViolationCommand {
  /// Show a person's violation count.
  Get { id: String },
  /// Record one more violation.
  Add { id: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  data_dir: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides the default.
  let data_dir = args
    .data_dir
    .or_else(|| {
      (!file_cfg.data_dir.is_empty()).then(|| PathBuf::from(&file_cfg.data_dir))
    })
    .unwrap_or_else(|| PathBuf::from("."));

  let store = FlatFileStore::open(&data_dir)
    .with_context(|| format!("opening record store in {}", data_dir.display()))?;
  let engine = CheckpointEngine::new(store);

  // Reclaim stale passes once per process, before any command runs.
  engine.cleanup_expired().context("startup cleanup")?;

  match args.command {
    Command::Scan { code } => commands::scan(&engine, &code, args.json),
    Command::Register {
      code,
      name,
      contact,
      visiting_as,
      purpose,
      visiting,
      id_type,
    } => commands::register(
      &engine,
      gatehouse_core::pass::NewPass {
        name,
        contact,
        visiting_as,
        purpose,
        visiting,
        id_type,
        code,
      },
      args.json,
    ),
    Command::Check { code, kind } => {
      commands::check(&engine, &code, kind, args.json)
    }
    Command::Status { code } => commands::status(&engine, &code, args.json),
    Command::Available { code } => {
      commands::available(&engine, &code, args.json)
    }
    Command::Cleanup => commands::cleanup(&engine, args.json),
    Command::Person(cmd) => match cmd {
      PersonCommand::Add { id, role, name, image, violations } => {
        commands::person_add(
          &engine, id, role, name, image, violations, args.json,
        )
      }
      PersonCommand::Update { id, role, name, status } => {
        commands::person_update(&engine, &id, role, name, status, args.json)
      }
      PersonCommand::Deactivate { id } => {
        commands::person_deactivate(&engine, &id, args.json)
      }
      PersonCommand::List { role } => {
        commands::person_list(&engine, role, args.json)
      }
    },
    Command::Violation(cmd) => match cmd {
      ViolationCommand::Get { id } => {
        commands::violation_get(&engine, &id, args.json)
      }
      ViolationCommand::Add { id } => {
        commands::violation_add(&engine, &id, args.json)
      }
    },
  }
}
