//! Discrete servo position presets
//!
//! A servo is only ever commanded to one of a fixed, ordered set of
//! angle presets. The ordinal of the preset is what recipes and the
//! terminal work with; the PWM driver owns the mapping to duty cycle.

/// Number of position presets
pub const POSITION_COUNT: usize = 6;

/// Angle between neighbouring presets in degrees
pub const DEGREES_PER_STEP: u8 = 32;

/// Direction of a manual one-step jog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogDirection {
    /// Towards position 0
    Left,
    /// Towards the maximum position
    Right,
}

/// Ordinal of an angle preset, always within `0..POSITION_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position(u8);

impl Position {
    /// Starting position (0°)
    pub const HOME: Self = Self(0);

    /// Highest preset (160°)
    pub const MAX: Self = Self(POSITION_COUNT as u8 - 1);

    /// Create a position from its ordinal, rejecting out-of-range values
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < POSITION_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Ordinal of this preset
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Nominal angle of this preset
    pub const fn degrees(self) -> u8 {
        self.0 * DEGREES_PER_STEP
    }

    /// Neighbouring preset in the given direction, `None` at the edges
    pub fn jog(self, direction: JogDirection) -> Option<Self> {
        match direction {
            JogDirection::Left => self.0.checked_sub(1).map(Self),
            JogDirection::Right => Self::new(self.0 + 1),
        }
    }

    /// Number of preset steps between two positions
    pub fn steps_to(self, other: Position) -> u8 {
        self.0.abs_diff(other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Position::new(5), Some(Position::MAX));
        assert_eq!(Position::new(6), None);
        assert_eq!(Position::new(31), None);
    }

    #[test]
    fn test_jog_clamps_at_edges() {
        assert_eq!(Position::HOME.jog(JogDirection::Left), None);
        assert_eq!(Position::MAX.jog(JogDirection::Right), None);
        assert_eq!(
            Position::HOME.jog(JogDirection::Right),
            Position::new(1)
        );
    }

    #[test]
    fn test_steps_are_symmetric() {
        let a = Position::new(1).unwrap();
        let b = Position::new(4).unwrap();
        assert_eq!(a.steps_to(b), 3);
        assert_eq!(b.steps_to(a), 3);
        assert_eq!(a.steps_to(a), 0);
    }

    #[test]
    fn test_degrees_increase_monotonically() {
        let mut last = None;
        for position in (0..POSITION_COUNT as u8).filter_map(Position::new) {
            if let Some(prev) = last {
                assert!(position.degrees() > prev);
            }
            last = Some(position.degrees());
        }
        assert_eq!(Position::MAX.degrees(), 160);
    }
}
