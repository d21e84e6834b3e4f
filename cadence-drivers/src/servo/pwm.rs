//! Servo pair on two PWM channels
//!
//! Each servo gets one channel running at the calibrated frame rate. A
//! position preset is written as a pulse width fraction of the frame:
//!
//! ```ignore
//! let mut servos = PwmServoPair::new(ch1, ch2, config.calibration);
//! servos.set_output(Actor::First, Position::MAX); // 2278 µs of 20000 µs
//! ```

use embedded_hal::pwm::SetDutyCycle;

use cadence_core::config::ServoCalibration;
use cadence_core::motion::Position;
use cadence_core::state::Actor;
use cadence_core::traits::ServoDriver;

/// Two servos driven by independent PWM channels
pub struct PwmServoPair<A, B> {
    first: A,
    second: B,
    calibration: ServoCalibration,
    /// Actor whose channel last rejected a duty cycle
    fault: Option<Actor>,
}

impl<A: SetDutyCycle, B: SetDutyCycle> PwmServoPair<A, B> {
    /// Create a servo pair; outputs are untouched until the first move
    pub fn new(first: A, second: B, calibration: ServoCalibration) -> Self {
        Self {
            first,
            second,
            calibration,
            fault: None,
        }
    }

    /// Drive both servos to their home position
    pub fn home_all(&mut self) {
        for actor in Actor::ALL {
            self.set_output(actor, Position::HOME);
        }
    }
}

impl<A: SetDutyCycle, B: SetDutyCycle> ServoDriver for PwmServoPair<A, B> {
    fn set_output(&mut self, actor: Actor, position: Position) {
        let pulse = self.calibration.pulse_for(position);
        let period = self.calibration.period_us;

        let ok = match actor {
            Actor::First => self.first.set_duty_cycle_fraction(pulse, period).is_ok(),
            Actor::Second => self.second.set_duty_cycle_fraction(pulse, period).is_ok(),
        };
        if !ok {
            self.fault = Some(actor);
        }
    }

    fn take_fault(&mut self) -> Option<Actor> {
        self.fault.take()
    }
}
