//! Hardware-independent core of lamp-timer.
//!
//! A button press switches the indicator on for a fixed window; a second
//! press inside the window switches it off early. Everything that decides
//! *what* happens lives here and is tested on the host:
//!
//! - [`latch`] - interrupt → loop event handoff
//! - [`control`] - Idle / Activating / Active state machine
//! - [`power_logic`] - sleep depth policy and the sleep primitive trait
//! - [`indicator`], [`interval`] - output driver and interval timer seams
//! - [`app`] - the control loop context tying them together
//!
//! Usage: `cargo test --lib` / `cargo test --test integration`
//!
//! Note: The embedded binary (`main.rs`, `--features embedded`) supplies the
//! nRF52840 implementations of the seams and the interrupt handlers.

#![cfg_attr(not(test), no_std)]

// This must go first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod indicator;
pub mod interval;
pub mod latch;
pub mod power_logic;

pub use app::ControlLoop;
pub use control::{ControlState, Controller, Flow};
pub use error::Error;
pub use latch::{Events, Latches};
pub use power_logic::SleepDepth;

// ═══════════════════════════════════════════════════════════════════════════
// Configuration Tests
// ═══════════════════════════════════════════════════════════════════════════
