//! Power management - the sleep primitive for the Cortex-M4F.
//!
//! Sleep depths map onto the core's two sleep flavours:
//! - Deep: `SLEEPDEEP` set. With LFCLK stopped by the disarmed RTC and
//!   HFCLK idle, only the GPIOTE edge can wake the chip.
//! - Shallow: `SLEEPDEEP` clear, LFCLK keeps RTC2 ticking.
//!
//! The wait itself is lost-wakeup free: interrupts are masked, the latches
//! re-checked, and WFI entered only if nothing is pending. A pending
//! interrupt still ends WFI while masked; its handler runs as soon as the
//! mask is lifted, before the loop reads the latches again.

use cortex_m::peripheral::SCB;
use defmt::debug;
use lamp_timer::latch::Latches;
use lamp_timer::power_logic::{Sleep, SleepDepth};

/// Owns the System Control Block so nothing else can flip `SLEEPDEEP`.
pub struct CortexSleep {
    scb: SCB,
    depth: Option<SleepDepth>,
}

impl CortexSleep {
    pub fn new(scb: SCB) -> Self {
        Self { scb, depth: None }
    }

    fn select(&mut self, depth: SleepDepth) {
        if self.depth == Some(depth) {
            return;
        }
        match depth {
            SleepDepth::Deep => self.scb.set_sleepdeep(),
            SleepDepth::Shallow => self.scb.clear_sleepdeep(),
        }
        debug!("Power: sleep depth -> {:?}", depth);
        self.depth = Some(depth);
    }
}

impl Sleep for CortexSleep {
    fn sleep(&mut self, depth: SleepDepth, latches: &Latches) {
        self.select(depth);
        cortex_m::interrupt::free(|_| {
            if !latches.pending() {
                cortex_m::asm::wfi();
            }
        });
    }
}
