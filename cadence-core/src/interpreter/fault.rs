//! Recipe execution faults

use core::fmt;

use crate::recipe::Instruction;
use crate::state::Actor;

/// A structural error found while executing a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Opcode bits do not name an executable operation
    UnknownOpcode,
    /// MOVE parameter beyond the last position preset
    MoveOutOfRange,
    /// LOOP while a loop is already open
    NestedLoop,
    /// END_LOOP with no open loop
    UnmatchedEndLoop,
    /// Cursor ran past the last slot without reaching RECIPE_END
    MissingRecipeEnd,
}

impl Fault {
    /// Check if skipping past the fault should also drop the loop context
    pub fn is_loop_related(&self) -> bool {
        matches!(self, Self::NestedLoop | Self::UnmatchedEndLoop)
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::UnknownOpcode => "Invalid opcode",
            Self::MoveOutOfRange => "Move out of range",
            Self::NestedLoop => "Nested loops are not supported",
            Self::UnmatchedEndLoop => "END_LOOP without a matching LOOP",
            Self::MissingRecipeEnd => "Recipe has no RECIPE_END",
        }
    }
}

/// Where a fault happened, for the operator diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultReport {
    pub actor: Actor,
    pub recipe: u8,
    pub cursor: u8,
    /// Offending instruction, if the cursor was inside the recipe
    pub instruction: Option<Instruction>,
    pub fault: Fault,
}

impl fmt::Display for FaultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error on servo {}: {} (recipe {}, instruction {}",
            self.actor,
            self.fault.describe(),
            self.recipe,
            self.cursor
        )?;
        if let Some(instruction) = self.instruction {
            write!(f, ", {:08b}", instruction)?;
        }
        f.write_str(")")
    }
}
