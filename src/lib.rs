//! Interactive terminal client for serial devices.
//!
//! The interesting part is [`ui::session`]: a pure state machine for the
//! connection lifecycle plus the line reassembly buffer, driven by
//! [`ui::app::App`] against any [`serial::Transport`].

pub mod args;
pub mod baud;
pub mod config;
pub mod logging;
pub mod serial;
pub mod shutdown;
pub mod ui;
