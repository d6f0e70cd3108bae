//! lamp-timer firmware entry point.
//!
//! Push the button: the LED comes on for `config::ACTIVE_SECS`, then goes
//! off by itself. Push again while it is on: it goes off at once.
//!
//! # Low Power Operation
//!
//! - Idle: RTC and LFCLK stopped, `SLEEPDEEP` set, only the button wakes us
//! - Active: RTC2 ticks at `config::TICK_HZ` from LFCLK, shallow sleep
//!   between ticks
//!
//! # Module Organization
//!
//! - [`board`] - clocks, pins, GPIOTE and RTC2 setup
//! - [`isr`] - the two latch-setting interrupt handlers and the trap vector
//! - [`power`] - race-free sleep wait
//!
//! The state machine itself lives in the `lamp_timer` library.

#![no_std]
#![no_main]

mod board;
mod isr;
mod power;

use cortex_m_rt::entry;
use defmt::info;
use lamp_timer::{config, ControlLoop, Controller, Latches};
use {defmt_rtt as _, panic_probe as _};

use board::Board;

/// Event latches shared by the interrupt handlers and the control loop.
pub(crate) static LATCHES: Latches = Latches::new();

#[entry]
fn main() -> ! {
    info!("lamp-timer starting...");

    let Board {
        indicator,
        timer,
        sleeper,
        button,
    } = match Board::init() {
        Ok(board) => board,
        Err(e) => defmt::panic!("Board init failed: {}", e),
    };

    let control = ControlLoop::new(
        &LATCHES,
        Controller::new(config::TIMEOUT_TICKS),
        indicator,
        timer,
        sleeper,
    );

    board::enable_interrupts();
    info!("Entering control loop");

    // Held for the lifetime of the firmware; dropping it would disconnect
    // the button pin.
    let _button = button;
    control.run()
}
