//! Interval timer abstraction and RTC timing maths.
//!
//! The board's interval timer is an RTC running from the 32.768 kHz
//! low-frequency clock. A slow tick costs fewer wake-ups, so the prescaler is
//! picked for the lowest rate that still resolves the active window.

use crate::error::Error;

/// Frequency of the RTC input clock (LFCLK).
pub const RTC_INPUT_HZ: u32 = 32_768;

/// Largest value the 12-bit RTC prescaler register accepts.
pub const MAX_PRESCALER: u32 = 0x0FFF;

/// Periodic tick source.
///
/// `arm` starts the free-running interval from a cleared count; `disarm`
/// stops it completely (including its clock, where the platform allows).
pub trait IntervalTimer {
    fn arm(&mut self);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Prescaler that yields exactly `tick_hz` from the RTC input clock.
///
/// `f_tick = RTC_INPUT_HZ / (prescaler + 1)`
pub const fn prescaler_for(tick_hz: u32) -> Result<u16, Error> {
    if tick_hz == 0 || tick_hz > RTC_INPUT_HZ {
        return Err(Error::TickRateOutOfRange);
    }
    if RTC_INPUT_HZ % tick_hz != 0 {
        return Err(Error::InexactTickRate);
    }
    let prescaler = RTC_INPUT_HZ / tick_hz - 1;
    if prescaler > MAX_PRESCALER {
        return Err(Error::TickRateOutOfRange);
    }
    Ok(prescaler as u16)
}

/// Number of ticks at `tick_hz` that make up `active_secs`.
pub const fn timeout_ticks(active_secs: u32, tick_hz: u32) -> Result<u32, Error> {
    let ticks = match active_secs.checked_mul(tick_hz) {
        Some(t) => t,
        None => return Err(Error::TimeoutOverflow),
    };
    if ticks == 0 {
        return Err(Error::ZeroTimeout);
    }
    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slowest_tick_uses_max_prescaler() {
        assert_eq!(prescaler_for(8), Ok(4095));
    }

    #[test]
    fn full_rate_uses_zero_prescaler() {
        assert_eq!(prescaler_for(RTC_INPUT_HZ), Ok(0));
        assert_eq!(prescaler_for(1024), Ok(31));
    }

    #[test]
    fn rejects_unreachable_rates() {
        assert_eq!(prescaler_for(0), Err(Error::TickRateOutOfRange));
        assert_eq!(prescaler_for(4), Err(Error::TickRateOutOfRange));
        assert_eq!(prescaler_for(65_536), Err(Error::TickRateOutOfRange));
        assert_eq!(prescaler_for(10), Err(Error::InexactTickRate));
    }

    #[test]
    fn fifteen_minutes_at_8hz() {
        assert_eq!(timeout_ticks(15 * 60, 8), Ok(7200));
    }

    #[test]
    fn timeout_edge_cases() {
        assert_eq!(timeout_ticks(0, 8), Err(Error::ZeroTimeout));
        assert_eq!(timeout_ticks(u32::MAX, 8), Err(Error::TimeoutOverflow));
    }
}
