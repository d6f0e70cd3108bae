//! Event latches - the only data shared between interrupt handlers and the
//! control loop.
//!
//! Each latch has exactly one producer (its interrupt handler, which only
//! ever sets it) and one consumer (the control loop, which reads and clears
//! it in a single atomic swap). Bursts coalesce: several edges or ticks
//! before the loop runs are observed as one event.

use core::sync::atomic::{AtomicBool, Ordering};

/// A single-bit, single-producer / single-consumer event flag.
pub struct EventLatch {
    flag: AtomicBool,
}

impl EventLatch {
    /// A cleared latch, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Producer side: record that the event happened.
    #[inline]
    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Consumer side: read and clear. Returns `false` (and changes nothing)
    /// if the latch was already clear.
    #[inline]
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }

    /// Peek without consuming.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for EventLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the latches taken at the start of one loop pass.
///
/// The state machine clears each field as it consumes it, so a field that
/// is still `true` after a pass was not relevant to the state it was
/// delivered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Events {
    pub button: bool,
    pub tick: bool,
}

impl Events {
    pub const NONE: Events = Events {
        button: false,
        tick: false,
    };

    pub const fn button() -> Self {
        Events {
            button: true,
            tick: false,
        }
    }

    pub const fn tick() -> Self {
        Events {
            button: false,
            tick: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.button && !self.tick
    }
}

/// Both latches, grouped so the board can hold them in one `static` and pass
/// a single reference to the control loop and to the interrupt handlers.
pub struct Latches {
    button: EventLatch,
    tick: EventLatch,
}

impl Latches {
    pub const fn new() -> Self {
        Self {
            button: EventLatch::new(),
            tick: EventLatch::new(),
        }
    }

    /// Edge detector handler body: latch the button edge.
    ///
    /// Must stay bounded; the caller clears the hardware event before or
    /// after this call and returns from the interrupt, which ends the sleep
    /// wait in the main loop.
    #[inline]
    pub fn on_button_edge(&self) {
        self.button.set();
    }

    /// Interval timer handler body: latch one elapsed interval.
    #[inline]
    pub fn on_timer_tick(&self) {
        self.tick.set();
    }

    /// Read and clear both latches.
    pub fn take(&self) -> Events {
        Events {
            button: self.button.take(),
            tick: self.tick.take(),
        }
    }

    /// True if either latch is set. Used by the sleep primitive to refuse
    /// to suspend while an event is waiting.
    pub fn pending(&self) -> bool {
        self.button.is_set() || self.tick.is_set()
    }
}

impl Default for Latches {
    fn default() -> Self {
        Self::new()
    }
}
