//! Interrupt handlers.
//!
//! Each handler acknowledges its hardware event and sets its latch - nothing
//! else. Control state and the shutdown counter belong to the main loop.
//! Returning from the handler ends the WFI in [`crate::power`].

use cortex_m_rt::exception;
use embassy_nrf::pac;
use embassy_nrf::pac::interrupt;
use lamp_timer::config;

use crate::LATCHES;

/// Button edge (GPIOTE IN event).
#[interrupt]
fn GPIOTE() {
    pac::GPIOTE
        .events_in(config::BUTTON_GPIOTE_CHANNEL)
        .write_value(0);
    LATCHES.on_button_edge();
}

/// Interval tick (RTC2 TICK event).
#[interrupt]
fn RTC2() {
    pac::RTC2.events_tick().write_value(0);
    LATCHES.on_timer_tick();

    #[cfg(feature = "debug-trace")]
    crate::board::toggle_heartbeat();
}

/// Any other vector. Normally ignored; with `debug-trace` the core parks
/// here so the debugger shows which IRQ fired.
#[exception]
unsafe fn DefaultHandler(irqn: i16) {
    defmt::warn!("Trap: unexpected IRQ {}", irqn);

    #[cfg(feature = "debug-trace")]
    loop {
        cortex_m::asm::nop();
    }
}
