//! Application-wide constants and compile-time configuration.
//!
//! All pin assignments, timing parameters and interrupt settings live here
//! so they can be tuned in one place. Invalid timing constants fail the
//! build rather than the device.

use crate::interval;

// Timing

/// Interval timer rate. 8 Hz is the slowest the RTC reaches (prescaler at its
/// 12-bit maximum), i.e. one tick every 125 ms.
pub const TICK_HZ: u32 = 8;

/// How long the indicator stays on after a press (seconds).
pub const ACTIVE_SECS: u32 = 15 * 60;

/// RTC prescaler derived from [`TICK_HZ`].
pub const RTC_PRESCALER: u16 = match interval::prescaler_for(TICK_HZ) {
    Ok(p) => p,
    Err(_) => panic!("TICK_HZ is not reachable from the 32.768 kHz RTC clock"),
};

/// Ticks in the active window; the shutdown counter starts here.
#[cfg(not(feature = "short-timeout"))]
pub const TIMEOUT_TICKS: u32 = match interval::timeout_ticks(ACTIVE_SECS, TICK_HZ) {
    Ok(t) => t,
    Err(_) => panic!("ACTIVE_SECS does not fit the shutdown counter"),
};

/// Bench-debug window: four ticks (half a second).
#[cfg(feature = "short-timeout")]
pub const TIMEOUT_TICKS: u32 = 4;

// GPIO pin assignments (nRF52840-DK)
//
// The embassy peripheral singletons are picked in `board.rs`; these numbers
// are what the raw GPIOTE configuration needs.
//
//   Button 1   → P0.11  (active-low, internal pull-up)
//   LED1       → P0.13  (active-low)
//   LED2       → P0.14  (heartbeat, `debug-trace` only)

/// Button pin number on port 0.
pub const BUTTON_PIN: u8 = 11;

/// GPIOTE channel used for the button edge event.
pub const BUTTON_GPIOTE_CHANNEL: usize = 0;
