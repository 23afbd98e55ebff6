//! Indicator LED.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::StatefulOutputPin;

use crate::config::ERROR_BLINK_DELAY_MS;

/// The terminal error signal: toggle the indicator LED forever.
///
/// A board whose bring-up failed cannot proceed; the blink is the only
/// operator-visible channel left. Recovery requires a physical reset.
pub fn blink_forever<P, D>(led: &mut P, delay: &mut D) -> !
where
    P: StatefulOutputPin,
    D: DelayNs,
{
    loop {
        let _ = led.toggle();
        delay.delay_ms(ERROR_BLINK_DELAY_MS);
    }
}
