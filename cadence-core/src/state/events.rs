//! Events that trigger servo status transitions

/// Events that can change a servo's run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoEvent {
    // Operator events
    /// `B`: start the current recipe from its first instruction
    Begin,
    /// `C`: resume the current recipe at its cursor
    Continue,
    /// `P` on the command line or as a keystroke during a run
    Pause,

    // Interpreter events
    /// RECIPE_END reached and the servo was reset
    RecipeFinished,
}
