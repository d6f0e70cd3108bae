//! Indicator state machine.
//!
//! ```text
//!            button                 (same pass)
//!   Idle ─────────────▶ Activating ─────────────▶ Active
//!    ▲                                              │
//!    └──────── button, or shutdown counter hits 0 ──┘
//! ```
//!
//! The controller owns the control state and the shutdown counter outright;
//! interrupt handlers only ever touch the latches. One call to [`Controller::step`]
//! performs a single transition and tells the caller, through [`Flow`],
//! whether the next state must run in the same pass or the loop may sleep.

use crate::indicator::Indicator;
use crate::interval::IntervalTimer;
use crate::latch::Events;
use crate::power_logic::{self, SleepDepth};

/// Control state. Exactly one at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlState {
    /// Output off, timer disarmed. Initial state.
    Idle,
    /// Transient: load the counter, switch on, arm the timer.
    Activating,
    /// Output on, counting ticks down.
    Active,
}

/// Result of one transition step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flow {
    /// The new state must be evaluated now, without sleeping in between.
    Continue,
    /// Nothing left to do this pass; the loop may suspend.
    Yield,
}

/// Upper bound on steps in one pass: Active (expiry) → Idle → Activating →
/// Active.
const MAX_CHAINED_STEPS: usize = 4;

/// State machine owning the control state and the shutdown counter.
pub struct Controller {
    state: ControlState,
    remaining: u32,
    timeout: u32,
}

impl Controller {
    /// Create a controller in the power-on state: Idle, counter at zero.
    ///
    /// `timeout_ticks` is the full active window and is normally
    /// `config::TIMEOUT_TICKS`.
    pub const fn new(timeout_ticks: u32) -> Self {
        Self {
            state: ControlState::Idle,
            remaining: 0,
            timeout: timeout_ticks,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Ticks left before auto-deactivation. Meaningless outside Active.
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining
    }

    pub fn timeout_ticks(&self) -> u32 {
        self.timeout
    }

    /// Run one transition, consuming the events it reacts to.
    ///
    /// Within Active the tick is applied before the button. A press only
    /// cancels while still Active; a press landing on the expiry tick stays
    /// pending and re-activates from Idle in the same pass, with a full
    /// counter.
    pub fn step<I, T>(&mut self, events: &mut Events, indicator: &mut I, timer: &mut T) -> Flow
    where
        I: Indicator,
        T: IntervalTimer,
    {
        match self.state {
            ControlState::Idle => {
                if core::mem::take(&mut events.tick) {
                    // Timer is disarmed in Idle; a late tick is dropped.
                    trace!("Control: stray tick ignored");
                }
                if core::mem::take(&mut events.button) {
                    debug!("Control: Idle -> Activating");
                    self.state = ControlState::Activating;
                    Flow::Continue
                } else {
                    Flow::Yield
                }
            }
            ControlState::Activating => {
                self.remaining = self.timeout;
                indicator.activate();
                timer.arm();
                self.state = ControlState::Active;
                info!("Control: active for {} ticks", self.remaining);
                Flow::Continue
            }
            ControlState::Active => {
                if core::mem::take(&mut events.tick) {
                    self.remaining = self.remaining.saturating_sub(1);
                    trace!("Control: {} ticks left", self.remaining);
                    if self.remaining == 0 {
                        info!("Control: timeout expired");
                        self.shut_down(indicator, timer);
                    }
                }
                if self.state == ControlState::Active && core::mem::take(&mut events.button) {
                    info!("Control: cancelled with {} ticks left", self.remaining);
                    self.shut_down(indicator, timer);
                }
                if events.button {
                    Flow::Continue
                } else {
                    Flow::Yield
                }
            }
        }
    }

    /// Process one snapshot of events, chaining transitions until the state
    /// machine yields, and return the sleep depth for the resulting state.
    pub fn run_pass<I, T>(&mut self, mut events: Events, indicator: &mut I, timer: &mut T) -> SleepDepth
    where
        I: Indicator,
        T: IntervalTimer,
    {
        for _ in 0..MAX_CHAINED_STEPS {
            if self.step(&mut events, indicator, timer) == Flow::Yield {
                break;
            }
        }
        power_logic::sleep_depth(self.state)
    }

    /// Deactivate, disarm and return to Idle. Also the fail-safe target
    /// should the output and the state ever disagree.
    pub fn shut_down<I, T>(&mut self, indicator: &mut I, timer: &mut T)
    where
        I: Indicator,
        T: IntervalTimer,
    {
        indicator.deactivate();
        timer.disarm();
        self.remaining = 0;
        self.state = ControlState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Lamp {
        on: bool,
    }

    impl Indicator for Lamp {
        fn activate(&mut self) {
            self.on = true;
        }
        fn deactivate(&mut self) {
            self.on = false;
        }
        fn is_active(&self) -> bool {
            self.on
        }
    }

    #[derive(Default)]
    struct Rtc {
        armed: bool,
        arms: u32,
    }

    impl IntervalTimer for Rtc {
        fn arm(&mut self) {
            self.armed = true;
            self.arms += 1;
        }
        fn disarm(&mut self) {
            self.armed = false;
        }
        fn is_armed(&self) -> bool {
            self.armed
        }
    }

    #[test]
    fn power_on_state() {
        let ctrl = Controller::new(4);
        assert_eq!(ctrl.state(), ControlState::Idle);
        assert_eq!(ctrl.remaining_ticks(), 0);
        assert_eq!(ctrl.timeout_ticks(), 4);
    }

    #[test]
    fn idle_button_step_continues_into_activating() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(4), Lamp::default(), Rtc::default());
        let mut ev = Events::button();

        assert_eq!(ctrl.step(&mut ev, &mut lamp, &mut rtc), Flow::Continue);
        assert_eq!(ctrl.state(), ControlState::Activating);
        assert!(!ev.button);
        // Nothing switched yet; Activating does that.
        assert!(!lamp.on);

        assert_eq!(ctrl.step(&mut ev, &mut lamp, &mut rtc), Flow::Continue);
        assert_eq!(ctrl.state(), ControlState::Active);
        assert_eq!(ctrl.remaining_ticks(), 4);
        assert!(lamp.on && rtc.armed);

        assert_eq!(ctrl.step(&mut ev, &mut lamp, &mut rtc), Flow::Yield);
        assert_eq!(ctrl.state(), ControlState::Active);
    }

    #[test]
    fn idle_without_events_yields() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(4), Lamp::default(), Rtc::default());
        let mut ev = Events::NONE;
        assert_eq!(ctrl.step(&mut ev, &mut lamp, &mut rtc), Flow::Yield);
        assert_eq!(ctrl.state(), ControlState::Idle);
    }

    #[test]
    fn run_pass_reaches_active_in_one_pass() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(4), Lamp::default(), Rtc::default());
        let depth = ctrl.run_pass(Events::button(), &mut lamp, &mut rtc);
        assert_eq!(depth, SleepDepth::Shallow);
        assert_eq!(ctrl.state(), ControlState::Active);
        assert_eq!(rtc.arms, 1);
    }

    #[test]
    fn stray_tick_in_idle_is_consumed() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(4), Lamp::default(), Rtc::default());
        let mut ev = Events::tick();
        assert_eq!(ctrl.step(&mut ev, &mut lamp, &mut rtc), Flow::Yield);
        assert!(ev.is_empty());
        assert_eq!(ctrl.remaining_ticks(), 0);
        assert!(!lamp.on && !rtc.armed);
    }

    #[test]
    fn press_on_expiry_tick_reactivates() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(1), Lamp::default(), Rtc::default());
        ctrl.run_pass(Events::button(), &mut lamp, &mut rtc);

        let both = Events {
            button: true,
            tick: true,
        };
        let depth = ctrl.run_pass(both, &mut lamp, &mut rtc);
        assert_eq!(depth, SleepDepth::Shallow);
        assert_eq!(ctrl.state(), ControlState::Active);
        assert_eq!(ctrl.remaining_ticks(), 1);
        assert!(lamp.on && rtc.armed);
        assert_eq!(rtc.arms, 2);
    }

    #[test]
    fn expiry_step_continues_when_press_pending() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(1), Lamp::default(), Rtc::default());
        ctrl.run_pass(Events::button(), &mut lamp, &mut rtc);

        let mut both = Events {
            button: true,
            tick: true,
        };
        assert_eq!(ctrl.step(&mut both, &mut lamp, &mut rtc), Flow::Continue);
        assert_eq!(ctrl.state(), ControlState::Idle);
        assert!(both.button && !both.tick);
    }

    #[test]
    fn tick_and_button_mid_window_cancel() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(4), Lamp::default(), Rtc::default());
        ctrl.run_pass(Events::button(), &mut lamp, &mut rtc);

        let mut both = Events {
            button: true,
            tick: true,
        };
        assert_eq!(ctrl.step(&mut both, &mut lamp, &mut rtc), Flow::Yield);
        assert!(both.is_empty());
        assert_eq!(ctrl.state(), ControlState::Idle);
        assert!(!lamp.on);
    }

    #[test]
    fn shut_down_clears_counter() {
        let (mut ctrl, mut lamp, mut rtc) = (Controller::new(4), Lamp::default(), Rtc::default());
        ctrl.run_pass(Events::button(), &mut lamp, &mut rtc);
        ctrl.shut_down(&mut lamp, &mut rtc);
        assert_eq!(ctrl.state(), ControlState::Idle);
        assert_eq!(ctrl.remaining_ticks(), 0);
        assert!(!lamp.on && !rtc.armed);
    }
}
