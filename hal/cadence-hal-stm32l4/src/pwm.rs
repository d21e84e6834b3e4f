//! Servo PWM constants for TIM2
//!
//! Both servos share TIM2: channel 1 on PA0 drives servo 0 and channel 2
//! on PA1 drives servo 1, each with one pulse per frame.

use embassy_stm32::time::Hertz;

/// Hobby servo frame rate
pub const SERVO_FRAME_HZ: u32 = 50;

/// Frame rate for a calibrated frame length in microseconds
///
/// Falls back to [`SERVO_FRAME_HZ`] for a zero period.
pub fn frame_rate(period_us: u16) -> Hertz {
    match period_us {
        0 => Hertz(SERVO_FRAME_HZ),
        period => Hertz(1_000_000 / period as u32),
    }
}
