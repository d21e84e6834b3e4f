//! Compiled-in recipe catalog

use super::instruction::Instruction;

/// Instruction slots per recipe
pub const MAX_RECIPE_SIZE: usize = 20;

/// A fixed-length recipe program
///
/// Slots after the first RECIPE_END are padding and never execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Recipe {
    instructions: [Instruction; MAX_RECIPE_SIZE],
}

impl Recipe {
    /// Build a recipe, padding the unused slots with RECIPE_END
    ///
    /// Fails const evaluation if `program` does not fit.
    pub const fn new(program: &[Instruction]) -> Self {
        assert!(program.len() <= MAX_RECIPE_SIZE, "recipe too long");

        let mut instructions = [Instruction::recipe_end(); MAX_RECIPE_SIZE];
        let mut i = 0;
        while i < program.len() {
            instructions[i] = program[i];
            i += 1;
        }
        Self { instructions }
    }

    /// Instruction at `cursor`, or `None` past the last slot
    pub fn get(&self, cursor: u8) -> Option<Instruction> {
        self.instructions.get(cursor as usize).copied()
    }
}

/// Ordered set of recipes available to the servos
#[derive(Debug, Clone, Copy)]
pub struct RecipeBook {
    recipes: &'static [Recipe],
}

impl RecipeBook {
    pub const fn new(recipes: &'static [Recipe]) -> Self {
        Self { recipes }
    }

    pub fn get(&self, index: u8) -> Option<&Recipe> {
        self.recipes.get(index as usize)
    }

    /// Number of recipes
    pub fn len(&self) -> u8 {
        self.recipes.len() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

use Instruction as I;

/// Exercises every opcode and the full position range
const DEMO: Recipe = Recipe::new(&[
    I::mov(0),
    I::mov(5),
    I::mov(0),
    I::mov(3),
    I::loop_start(0),
    I::mov(1),
    I::mov(4),
    I::end_loop(),
    I::mov(0),
    I::mov(2),
    I::wait(0),
    I::mov(3),
    I::wait(0),
    I::mov(2),
    I::mov(3),
    I::wait(31),
    I::wait(31),
    I::wait(31),
    I::mov(4),
    I::recipe_end(),
]);

/// Steps across all presets and back, three times
const SWEEP: Recipe = Recipe::new(&[
    I::mov(0),
    I::loop_start(3),
    I::mov(1),
    I::mov(2),
    I::mov(3),
    I::mov(4),
    I::mov(5),
    I::wait(5),
    I::mov(0),
    I::end_loop(),
    I::recipe_end(),
]);

/// A second LOOP inside an open loop body
const NESTED_LOOP: Recipe = Recipe::new(&[
    I::mov(5),
    I::loop_start(1),
    I::mov(1),
    I::loop_start(1),
    I::mov(5),
    I::end_loop(),
    I::end_loop(),
    I::recipe_end(),
]);

/// MOVE beyond the last preset
const OUT_OF_RANGE: Recipe = Recipe::new(&[
    I::mov(2),
    I::mov(7),
    I::mov(0),
    I::recipe_end(),
]);

/// Reserved invalid opcode in the middle of a program
const ERRONEOUS: Recipe = Recipe::new(&[
    I::mov(3),
    I::erroneous(0),
    I::mov(0),
    I::recipe_end(),
]);

static RECIPES: [Recipe; 5] = [DEMO, SWEEP, NESTED_LOOP, OUT_OF_RANGE, ERRONEOUS];

/// The firmware's recipe catalog
pub static CATALOG: RecipeBook = RecipeBook::new(&RECIPES);
