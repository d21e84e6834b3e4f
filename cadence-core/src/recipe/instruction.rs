//! One-byte recipe instructions
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! +-----------+-------------------+
//! |  opcode   |     parameter     |
//! +-----------+-------------------+
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of low bits carrying the parameter
pub const PARAMETER_BITS: u8 = 5;

/// Mask selecting the parameter bits
pub const PARAMETER_MASK: u8 = (1 << PARAMETER_BITS) - 1;

const OPCODE_MASK: u8 = 0b111;

/// Instruction operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Opcode {
    /// End of recipe
    RecipeEnd,
    /// Move to the preset given by the parameter
    Move,
    /// Dwell for parameter x wait unit
    Wait,
    /// Start a loop body repeated parameter times
    Loop,
    /// End of the loop body
    EndLoop,
    /// Deliberately invalid, for fault-path test recipes
    Erroneous,
    /// Any other bit pattern
    Unknown(u8),
}

impl Opcode {
    /// Decode the three opcode bits
    pub const fn from_bits(bits: u8) -> Self {
        match bits & OPCODE_MASK {
            0b000 => Opcode::RecipeEnd,
            0b001 => Opcode::Move,
            0b010 => Opcode::Wait,
            0b100 => Opcode::Loop,
            0b101 => Opcode::EndLoop,
            0b111 => Opcode::Erroneous,
            other => Opcode::Unknown(other),
        }
    }

    /// The three opcode bits
    pub const fn bits(self) -> u8 {
        match self {
            Opcode::RecipeEnd => 0b000,
            Opcode::Move => 0b001,
            Opcode::Wait => 0b010,
            Opcode::Loop => 0b100,
            Opcode::EndLoop => 0b101,
            Opcode::Erroneous => 0b111,
            Opcode::Unknown(bits) => bits & OPCODE_MASK,
        }
    }
}

/// A packed recipe instruction
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instruction(u8);

impl Instruction {
    /// Pack an opcode and parameter; parameter bits above the mask are dropped
    pub const fn encode(opcode: Opcode, parameter: u8) -> Self {
        Self((opcode.bits() << PARAMETER_BITS) | (parameter & PARAMETER_MASK))
    }

    /// Wrap a raw instruction byte
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn mov(position: u8) -> Self {
        Self::encode(Opcode::Move, position)
    }

    pub const fn wait(units: u8) -> Self {
        Self::encode(Opcode::Wait, units)
    }

    pub const fn loop_start(count: u8) -> Self {
        Self::encode(Opcode::Loop, count)
    }

    pub const fn end_loop() -> Self {
        Self::encode(Opcode::EndLoop, 0)
    }

    pub const fn recipe_end() -> Self {
        Self::encode(Opcode::RecipeEnd, 0)
    }

    pub const fn erroneous(parameter: u8) -> Self {
        Self::encode(Opcode::Erroneous, parameter)
    }

    /// Raw byte
    pub const fn byte(self) -> u8 {
        self.0
    }

    pub const fn opcode(self) -> Opcode {
        Opcode::from_bits(self.0 >> PARAMETER_BITS)
    }

    pub const fn parameter(self) -> u8 {
        self.0 & PARAMETER_MASK
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.opcode(), self.parameter())
    }
}

/// Binary form, as shown in fault diagnostics
impl fmt::Binary for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.byte(), f)
    }
}
