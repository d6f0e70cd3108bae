//! The control loop context.
//!
//! Owns everything the loop mutates (state machine, output, interval timer,
//! sleep primitive) and borrows the latches it shares with the interrupt
//! handlers. On the board the latches are a `static`; in tests a local.

use crate::control::{ControlState, Controller};
use crate::indicator::Indicator;
use crate::interval::IntervalTimer;
use crate::latch::Latches;
use crate::power_logic::{Sleep, SleepDepth};

pub struct ControlLoop<'a, I, T, S> {
    latches: &'a Latches,
    controller: Controller,
    indicator: I,
    timer: T,
    sleeper: S,
}

impl<'a, I, T, S> ControlLoop<'a, I, T, S>
where
    I: Indicator,
    T: IntervalTimer,
    S: Sleep,
{
    /// Assemble the loop. The output is forced inactive and the timer
    /// disarmed so the hardware matches the controller's Idle state.
    pub fn new(
        latches: &'a Latches,
        controller: Controller,
        mut indicator: I,
        mut timer: T,
        sleeper: S,
    ) -> Self {
        indicator.deactivate();
        timer.disarm();
        Self {
            latches,
            controller,
            indicator,
            timer,
            sleeper,
        }
    }

    /// One pass: snapshot and clear the latches, run the state machine and
    /// return the sleep depth for the state it ended in.
    pub fn poll(&mut self) -> SleepDepth {
        let events = self.latches.take();
        if !events.is_empty() {
            trace!("Loop: events {}", events);
        }
        self.controller
            .run_pass(events, &mut self.indicator, &mut self.timer)
    }

    /// One pass followed by the sleep wait.
    pub fn run_once(&mut self) {
        let depth = self.poll();
        self.sleeper.sleep(depth, self.latches);
    }

    /// Run forever.
    pub fn run(mut self) -> ! {
        info!("Loop: started, timeout {} ticks", self.controller.timeout_ticks());
        loop {
            self.run_once();
        }
    }

    pub fn state(&self) -> ControlState {
        self.controller.state()
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.controller.remaining_ticks()
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }
}
