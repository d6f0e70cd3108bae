//! Sleep arbiter policy - which low-power mode the loop may enter.
//!
//! The depth is a pure function of the control state, re-evaluated on every
//! pass right before suspending (a pass can move Idle → Activating → Active).

use crate::control::ControlState;
use crate::latch::Latches;

/// Low-power mode requested at the bottom of a loop pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepDepth {
    /// Deepest mode: interval timer clock halted, only a pin edge wakes us.
    Deep,
    /// Timer-compatible mode: the interval timer keeps ticking.
    Shallow,
}

/// Decide the sleep depth for a control state.
pub fn sleep_depth(state: ControlState) -> SleepDepth {
    match state {
        ControlState::Idle => SleepDepth::Deep,
        ControlState::Activating | ControlState::Active => SleepDepth::Shallow,
    }
}

/// Platform sleep primitive.
///
/// Implementations must not suspend while `latches` has a pending event,
/// and the check-then-suspend sequence must be atomic with respect to the
/// interrupt handlers (otherwise an event raised between the loop's last
/// read and the sleep instruction would be lost until the next wake).
pub trait Sleep {
    fn sleep(&mut self, depth: SleepDepth, latches: &Latches);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_sleeps_deep() {
        assert_eq!(sleep_depth(ControlState::Idle), SleepDepth::Deep);
    }

    #[test]
    fn timer_states_sleep_shallow() {
        assert_eq!(sleep_depth(ControlState::Activating), SleepDepth::Shallow);
        assert_eq!(sleep_depth(ControlState::Active), SleepDepth::Shallow);
    }
}
