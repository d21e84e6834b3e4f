//! Recipe bytecode
//!
//! A recipe is a fixed-length program of one-byte instructions, compiled
//! into the firmware. Each servo runs its own recipe from the catalog.

pub mod catalog;
pub mod instruction;

pub use catalog::{Recipe, RecipeBook, CATALOG, MAX_RECIPE_SIZE};
pub use instruction::{Instruction, Opcode, PARAMETER_BITS, PARAMETER_MASK};
