//! Unified error type for lamp-timer.
//!
//! The control loop itself cannot fail: every transition is a total
//! function of (state, latches). Errors only arise while validating the
//! compile-time timing constants and while bringing up the board.
//!
//! All variants carry fixed-size data (no `alloc`), and implement
//! `defmt::Format` when the `defmt` feature is enabled.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Timing configuration
    /// Requested tick rate is zero or faster than the RTC input clock.
    TickRateOutOfRange,

    /// Requested tick rate does not divide the RTC input clock exactly.
    InexactTickRate,

    /// The active window rounds down to zero ticks.
    ZeroTimeout,

    /// The active window does not fit in the shutdown counter.
    TimeoutOverflow,

    // Board bring-up
    /// Core peripherals were already taken before board init.
    PeripheralsTaken,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::TickRateOutOfRange => "tick rate out of range",
            Error::InexactTickRate => "tick rate does not divide the RTC clock",
            Error::ZeroTimeout => "timeout is zero ticks",
            Error::TimeoutOverflow => "timeout overflows the shutdown counter",
            Error::PeripheralsTaken => "core peripherals already taken",
        };
        f.write_str(msg)
    }
}
