//! Serial session feature module.
//!
//! Owns the connection lifecycle, the prompt line and the scrollback log.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Connection status, prompt, baud rate and log
//! - `intent.rs` - User actions and transport events, plus requested effects
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `lines.rs` - Reassembly of the inbound stream into bounded log lines

mod intent;
mod lines;
mod reducer;
mod state;

pub use intent::{SessionEffect, SessionIntent};
pub use lines::{Ingest, LineBuffer, LOG_CAPACITY, MAX_LINE_BYTES};
pub use reducer::{SessionReducer, ERROR_MARKER};
pub use state::{ConnectionStatus, SessionState};
