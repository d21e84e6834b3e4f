//! Decoding of operator command lines
//!
//! The first letter of a line controls servo 0, the second servo 1.
//! Letters are case-insensitive; a missing letter means no-op.

use heapless::Vec;

use super::line::COMMAND_CAPACITY;
use crate::motion::JogDirection;
use crate::state::{Actor, SERVO_COUNT};

/// Command for one servo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoCommand {
    /// `B`: restart the current recipe from the beginning
    Begin,
    /// `C`: run the current recipe from its cursor
    Continue,
    /// `P`: pause a running recipe
    Pause,
    /// `N`: leave the servo alone
    #[default]
    NoOp,
    /// `L`: step one preset towards position 0
    Left,
    /// `R`: step one preset towards the last position
    Right,
}

impl ServoCommand {
    /// Decode a command letter
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte.to_ascii_uppercase() {
            b'B' => Some(Self::Begin),
            b'C' => Some(Self::Continue),
            b'P' => Some(Self::Pause),
            b'N' => Some(Self::NoOp),
            b'L' => Some(Self::Left),
            b'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// Check if the command starts recipe execution
    pub fn is_recipe_related(&self) -> bool {
        matches!(self, Self::Begin | Self::Continue)
    }

    /// Jog direction for `L` and `R`
    pub fn jog_direction(&self) -> Option<JogDirection> {
        match self {
            Self::Left => Some(JogDirection::Left),
            Self::Right => Some(JogDirection::Right),
            _ => None,
        }
    }
}

/// A decoded command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Commands {
    /// Command per servo; invalid letters become no-ops
    pub servos: [ServoCommand; SERVO_COUNT],
    /// Letters that were not valid commands
    pub invalid: Vec<u8, COMMAND_CAPACITY>,
}

impl Commands {
    /// Decode a command line
    pub fn parse(line: &[u8]) -> Self {
        let mut commands = Self::default();

        for (slot, &byte) in commands.servos.iter_mut().zip(line) {
            match ServoCommand::from_byte(byte) {
                Some(command) => *slot = command,
                None => {
                    // Capacity matches the servo count
                    let _ = commands.invalid.push(byte);
                }
            }
        }
        commands
    }

    /// Command for one servo
    pub fn get(&self, actor: Actor) -> ServoCommand {
        self.servos[actor.index()]
    }

    /// Check if any servo was told to begin or continue its recipe
    pub fn is_recipe_related(&self) -> bool {
        self.servos.iter().any(ServoCommand::is_recipe_related)
    }

    /// Check if the line contained letters that are not commands
    pub fn has_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }
}
