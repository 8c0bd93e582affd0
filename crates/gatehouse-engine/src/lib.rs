//! The Gatehouse checkpoint engine.
//!
//! [`CheckpointEngine`] is the boundary surface consumed by presentation
//! layers (guard screens, admin forms, scanners): identity resolution,
//! special-pass lifecycle, roster administration, violation counters, and
//! access logging, all over any [`RecordStore`] backend and [`Clock`].
//!
//! Every operation is synchronous and completes before the next scan is
//! accepted; serializing calls is the host's responsibility.

mod audit;
mod passes;
mod resolver;
mod roster;
mod violations;

pub mod error;

pub use error::{Error, Result};

use gatehouse_core::{
  clock::{Clock, SystemClock},
  store::RecordStore,
};

/// The checkpoint engine. Holds no session or identity state of its own:
/// any operator context (the logged-in guard, the admin user) is owned by
/// the caller and passed into individual operations.
pub struct CheckpointEngine<S, C = SystemClock> {
  store: S,
  clock: C,
}

impl<S: RecordStore> CheckpointEngine<S> {
  /// An engine on the wall clock.
  pub fn new(store: S) -> Self {
    Self { store, clock: SystemClock }
  }
}

impl<S: RecordStore, C: Clock> CheckpointEngine<S, C> {
  /// An engine on a caller-supplied clock (manual clocks in tests).
  pub fn with_clock(store: S, clock: C) -> Self { Self { store, clock } }

  pub fn store(&self) -> &S { &self.store }

  fn now(&self) -> chrono::NaiveDateTime { self.clock.now() }
}
