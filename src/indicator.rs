//! Output driver for the indicator.
//!
//! The control loop only speaks in terms of active/inactive; electrical
//! polarity is decided here.

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;

/// Logical indicator output.
pub trait Indicator {
    fn activate(&mut self);
    fn deactivate(&mut self);
    fn is_active(&self) -> bool;
}

/// Indicator wired active-low (LED to VDD through a resistor): activation
/// drives the pin low, deactivation drives it high.
pub struct ActiveLowIndicator<P> {
    pin: P,
    active: bool,
}

impl<P> ActiveLowIndicator<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// Wrap `pin` and force it to the inactive level.
    pub fn new(mut pin: P) -> Self {
        infallible(pin.set_high());
        Self { pin, active: false }
    }

    /// Give the pin back, e.g. for tests.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> Indicator for ActiveLowIndicator<P>
where
    P: OutputPin<Error = Infallible>,
{
    fn activate(&mut self) {
        infallible(self.pin.set_low());
        self.active = true;
    }

    fn deactivate(&mut self) {
        infallible(self.pin.set_high());
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

fn infallible(res: Result<(), Infallible>) {
    match res {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct Pin {
        high: Option<bool>,
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = Some(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = Some(true);
            Ok(())
        }
    }

    #[test]
    fn starts_inactive_with_pin_high() {
        let ind = ActiveLowIndicator::new(Pin::default());
        assert!(!ind.is_active());
        assert_eq!(ind.release().high, Some(true));
    }

    #[test]
    fn activation_pulls_pin_low() {
        let mut ind = ActiveLowIndicator::new(Pin::default());
        ind.activate();
        assert!(ind.is_active());
        assert_eq!(ind.release().high, Some(false));
    }

    #[test]
    fn deactivation_releases_pin_high() {
        let mut ind = ActiveLowIndicator::new(Pin::default());
        ind.activate();
        ind.deactivate();
        assert!(!ind.is_active());
        assert_eq!(ind.release().high, Some(true));
    }
}
