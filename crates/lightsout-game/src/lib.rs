//! Game orchestration for the Lights-Out puzzle.
//!
//! This crate coordinates the [`lightsout_core`] grid and the
//! [`lightsout_generator`] riddle scrambler into a complete game: a clock, a
//! press counter, and a session state machine (not started → running →
//! stopped) that detects wins and publishes everything the view needs over
//! synchronous [`Signal`]s.
//!
//! # Overview
//!
//! - [`signal`]: deterministic synchronous publish/subscribe
//! - [`counter`]: the press counter
//! - [`clock`]: elapsed gameplay time, advanced by an external timer driver
//! - [`session`]: the [`GameSession`] orchestrator and its view boundary
//!   ([`FieldSource`], [`SessionSignals`], [`NodeChange`], [`PopupCommand`])
//!
//! The whole crate is single-threaded and event-driven: every entry point
//! runs to completion on the caller's thread before the next event is
//! processed, so no locking is involved anywhere.
//!
//! # Examples
//!
//! ```
//! use lightsout_game::{FieldSource, GameConfig, GameSession};
//!
//! struct Field;
//! impl FieldSource for Field {
//!     fn cell_count(&self) -> usize {
//!         25
//!     }
//! }
//!
//! let mut session = GameSession::new(GameConfig::default(), Box::new(Field));
//! session.signals_mut().running.subscribe(|running: &bool| {
//!     println!("game running: {running}");
//! });
//! session.handle_start_request(true).unwrap();
//! assert!(session.is_running());
//! ```

use std::time::Duration;

/// Side length of the reference playing field.
pub const DEFAULT_FIELD_SIZE: u8 = 5;
/// Scramble presses per riddle in the reference configuration.
pub const DEFAULT_RIDDLE_DIFFICULTY: u32 = 3;
/// Tick interval of the reference gameplay clock.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

pub mod clock;
pub mod counter;
pub mod session;
pub mod signal;

pub use self::{
    clock::{Clock, TickSource},
    counter::Counter,
    session::{
        FieldSource, GameConfig, GameError, GameSession, GameStatus, NodeChange, PopupCommand,
        SessionSignals,
    },
    signal::{Signal, SubscriptionId},
};
