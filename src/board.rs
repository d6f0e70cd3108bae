//! Board bring-up for the nRF52840-DK.
//!
//! One-time configuration only:
//! - clocks: internal HFCLK, RC LFCLK for the RTC
//! - pins: button input with pull-up, active-low LED output (off)
//! - GPIOTE channel for the button edge, RTC2 for the interval tick
//!
//! Unused pins are left in their reset state (disconnected input), which is
//! already the lowest-power configuration on this part.

#[cfg(feature = "debug-trace")]
use core::cell::RefCell;
#[cfg(feature = "debug-trace")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use defmt::info;
use embassy_nrf::config::{Config, HfclkSource, LfclkSource};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::pac;
use embassy_nrf::pac::gpiote::vals::{Mode, Polarity};
use lamp_timer::config;
use lamp_timer::indicator::ActiveLowIndicator;
use lamp_timer::interval::IntervalTimer;
use lamp_timer::Error;

use crate::power::CortexSleep;

/// Shared by both handlers so neither can preempt the other.
const IRQ_PRIORITY: Priority = Priority::P3;

/// LED2, toggled from the RTC handler to measure the tick on a scope.
#[cfg(feature = "debug-trace")]
static HEARTBEAT: Mutex<CriticalSectionRawMutex, RefCell<Option<Output<'static>>>> =
    Mutex::new(RefCell::new(None));

/// Everything the control loop needs, plus the button pin, which must stay
/// alive for its pull-up to remain configured.
pub struct Board {
    pub indicator: ActiveLowIndicator<Output<'static>>,
    pub timer: RtcInterval,
    pub sleeper: CortexSleep,
    pub button: Input<'static>,
}

impl Board {
    /// Configure clocks and pins. Interrupts stay masked until
    /// [`enable_interrupts`] is called.
    pub fn init() -> Result<Self, Error> {
        let core = cortex_m::Peripherals::take().ok_or(Error::PeripheralsTaken)?;

        let mut cfg = Config::default();
        cfg.hfclk_source = HfclkSource::Internal;
        cfg.lfclk_source = LfclkSource::InternalRC;
        let p = embassy_nrf::init(cfg);

        let button = Input::new(p.P0_11, Pull::Up);
        let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

        #[cfg(feature = "debug-trace")]
        {
            let heartbeat = Output::new(p.P0_14, Level::High, OutputDrive::Standard);
            HEARTBEAT.lock(|h| *h.borrow_mut() = Some(heartbeat));
        }

        configure_button_event();
        let timer = RtcInterval::new(config::RTC_PRESCALER);

        info!(
            "Board: tick {} Hz (prescaler {}), timeout {} ticks",
            config::TICK_HZ,
            config::RTC_PRESCALER,
            config::TIMEOUT_TICKS
        );

        Ok(Self {
            indicator: ActiveLowIndicator::new(led),
            timer,
            sleeper: CortexSleep::new(core.SCB),
            button,
        })
    }
}

/// Route a HI→LO edge on the button pin to a GPIOTE event + interrupt.
fn configure_button_event() {
    let ch = config::BUTTON_GPIOTE_CHANNEL;
    let g = pac::GPIOTE;
    g.config(ch).write(|w| {
        w.set_mode(Mode::EVENT);
        w.set_psel(config::BUTTON_PIN);
        w.set_polarity(Polarity::HI_TO_LO);
    });
    g.events_in(ch).write_value(0);
    g.intenset().write(|w| w.set_in(ch, true));
}

/// Unmask both handler interrupts. Called once, after the latches and the
/// control loop context exist.
pub fn enable_interrupts() {
    for irq in [interrupt::GPIOTE, interrupt::RTC2] {
        irq.unpend();
        irq.set_priority(IRQ_PRIORITY);
        // SAFETY: the handlers only touch the `static` latches and their own
        // event registers.
        unsafe { irq.enable() };
    }
}

/// RTC2 used as a periodic interval timer on the TICK event.
pub struct RtcInterval {
    armed: bool,
}

impl RtcInterval {
    fn new(prescaler: u16) -> Self {
        let rtc = pac::RTC2;
        // PRESCALER is only writable while the RTC is stopped.
        rtc.tasks_stop().write_value(1);
        rtc.prescaler().write(|w| w.set_prescaler(prescaler));
        rtc.events_tick().write_value(0);
        rtc.intenset().write(|w| w.set_tick(true));
        Self { armed: false }
    }
}

impl IntervalTimer for RtcInterval {
    fn arm(&mut self) {
        start_lfclk();
        let rtc = pac::RTC2;
        rtc.tasks_clear().write_value(1);
        rtc.events_tick().write_value(0);
        rtc.tasks_start().write_value(1);
        self.armed = true;
    }

    fn disarm(&mut self) {
        let rtc = pac::RTC2;
        rtc.tasks_stop().write_value(1);
        rtc.events_tick().write_value(0);
        // Nothing else runs from LFCLK; stopping it is what makes Idle deep.
        pac::CLOCK.tasks_lfclkstop().write_value(1);
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Start LFCLK and wait for it (RC oscillator, well under a millisecond).
fn start_lfclk() {
    let clock = pac::CLOCK;
    clock.events_lfclkstarted().write_value(0);
    clock.tasks_lfclkstart().write_value(1);
    while clock.events_lfclkstarted().read() == 0 {}
}

/// Flip the heartbeat LED. Called from the RTC handler.
#[cfg(feature = "debug-trace")]
pub fn toggle_heartbeat() {
    HEARTBEAT.lock(|h| {
        if let Some(pin) = h.borrow_mut().as_mut() {
            pin.toggle();
        }
    });
}
