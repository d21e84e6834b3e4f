//! Controller loop tying the terminal to the interpreter
//!
//! The controller owns both servo states and every collaborator. Each
//! [`Controller::poll`] reads one command line, applies it, and, if a
//! recipe was started, runs scheduling passes until no servo is running.
//!
//! Everything runs on one thread by polling. A pass gives each running
//! servo, in actor order, one chance to notice a pause keystroke or to
//! consume its next instruction.

use embedded_hal::delay::DelayNs;

use crate::command::{CommandLine, Commands, Feed, LineEditor, ServoCommand};
use crate::config::ControllerConfig;
use crate::interpreter::{Fault, FaultReport, Interpreter, StepOutcome};
use crate::motion::{JogDirection, JogError, MotionScheduler};
use crate::recipe::{RecipeBook, CATALOG};
use crate::state::{Actor, ServoBank, ServoEvent};
use crate::traits::{Console, ServoDriver, TimeSource, LINE_END};

/// Terminal prompt
pub const PROMPT: &str = ">";

const BANNER: &[&str] = &[
    "",
    "Enter commands to control motor execution",
    "   --The first letter controls the first servo",
    "   --The second letter controls the second servo",
    "   --Available letters:",
    "      --L or l: Turn the servo left if possible",
    "      --R or r: Turn the servo right if possible",
    "      --C or c: Continue execution of a recipe on the servo",
    "      --P or p: Pause execution of a recipe on the servo",
    "      --N or n: No op on the servo",
    "      --B or b: Begin execution of a recipe on the servo immediately",
    "Example: Enter 'Cc' to begin recipe execution on each servo",
];

/// The operator chose to stop after a recipe fault
///
/// The device must be reset to continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Halted;

/// Two-servo recipe controller
pub struct Controller<T, S, D, C> {
    bank: ServoBank,
    motion: MotionScheduler<T, S>,
    interpreter: Interpreter,
    editor: LineEditor,
    delay: D,
    console: C,
}

impl<T, S, D, C> Controller<T, S, D, C>
where
    T: TimeSource,
    S: ServoDriver,
    D: DelayNs,
    C: Console,
{
    /// Create a controller running the built-in recipe catalog
    pub fn new(config: &ControllerConfig, clock: T, servos: S, delay: D, console: C) -> Self {
        Self {
            bank: ServoBank::new(),
            motion: MotionScheduler::new(clock, servos, config.timing),
            interpreter: Interpreter::new(CATALOG),
            editor: LineEditor::new(),
            delay,
            console,
        }
    }

    /// Replace the recipe catalog
    pub fn with_recipes(mut self, book: RecipeBook) -> Self {
        self.interpreter = Interpreter::new(book);
        self
    }

    pub fn bank(&self) -> &ServoBank {
        &self.bank
    }

    pub fn motion(&self) -> &MotionScheduler<T, S> {
        &self.motion
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Print the command help
    pub fn print_banner(&mut self) {
        for line in BANNER {
            self.console.write_line(line);
        }
    }

    /// Read and execute one command line
    pub fn poll(&mut self) -> Result<(), Halted> {
        let _ = self.console.write_str(PROMPT);

        let Some(line) = self.read_line() else {
            return Ok(());
        };

        if self.execute_line(&line) {
            self.run_recipes()?;
        }
        Ok(())
    }

    /// Read a command line with echo; `None` if the operator reset input
    fn read_line(&mut self) -> Option<CommandLine> {
        loop {
            let byte = self.console.read_byte();
            match self.editor.feed(byte) {
                Feed::Stored(byte) => self.console.echo(byte, false),
                Feed::Erased => {
                    let _ = self.console.write_str("\x08 \x08");
                }
                Feed::Ignored => {}
                Feed::Reset => {
                    let _ = self.console.write_str(LINE_END);
                    self.console.write_line("Input cleared");
                    return None;
                }
                Feed::Complete(line) => {
                    let _ = self.console.write_str(LINE_END);
                    return Some(line);
                }
            }
        }
    }

    /// Apply a command line to both servos
    ///
    /// Returns true if a recipe was begun or continued.
    pub fn execute_line(&mut self, line: &[u8]) -> bool {
        let commands = Commands::parse(line);

        if commands.has_invalid() {
            let _ = self.console.write_str("Invalid command:");
            for &byte in &commands.invalid {
                let _ = write!(self.console, " '{}'", char::from(byte));
            }
            self.console
                .write_line(" (use B, C, P, N, L or R for each servo)");
        }

        for actor in Actor::ALL {
            self.apply_command(actor, commands.get(actor));
        }
        self.check_outputs();

        commands.is_recipe_related()
    }

    fn apply_command(&mut self, actor: Actor, command: ServoCommand) {
        let servo = self.bank.get_mut(actor);

        match command {
            ServoCommand::Begin => self.interpreter.begin(actor, servo, &mut self.motion),
            ServoCommand::Continue => {
                self.interpreter
                    .apply(actor, servo, &mut self.motion, ServoEvent::Continue);
            }
            ServoCommand::Pause => {
                self.interpreter
                    .apply(actor, servo, &mut self.motion, ServoEvent::Pause);
            }
            ServoCommand::NoOp => {}
            ServoCommand::Left | ServoCommand::Right => {
                let Some(direction) = command.jog_direction() else {
                    return;
                };
                if let Err(JogError::AtLimit { position, .. }) =
                    self.motion.jog(actor, servo, direction, &mut self.delay)
                {
                    self.console.line(format_args!(
                        "Servo {} cannot turn {} from position {} ({} degrees)",
                        actor,
                        match direction {
                            JogDirection::Left => "left",
                            JogDirection::Right => "right",
                        },
                        position.index(),
                        position.degrees()
                    ));
                }
            }
        }
    }

    /// Run scheduling passes until no servo is running
    pub fn run_recipes(&mut self) -> Result<(), Halted> {
        while self.bank.any_running() {
            for actor in Actor::ALL {
                self.run_step(actor)?;
                self.check_outputs();
            }
        }
        Ok(())
    }

    fn run_step(&mut self, actor: Actor) -> Result<(), Halted> {
        let servo = self.bank.get_mut(actor);
        if !servo.is_running() {
            return Ok(());
        }

        // Anything other than a pause key is dropped while recipes run
        if let Some(byte) = self.console.try_read_byte() {
            if byte.eq_ignore_ascii_case(&b'p') {
                self.interpreter
                    .apply(actor, servo, &mut self.motion, ServoEvent::Pause);
                self.console
                    .line(format_args!("Recipe paused on servo {}", actor));
                return Ok(());
            }
        }

        match self
            .interpreter
            .step(actor, servo, &mut self.motion, &mut self.delay)
        {
            Ok(StepOutcome::RecipeComplete { recipe }) => {
                self.report_complete(actor, recipe);
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(fault) => self.handle_fault(actor, fault),
        }
    }

    /// Stop a servo whose output failed to update and tell the operator
    fn check_outputs(&mut self) {
        let Some(actor) = self.motion.take_output_fault() else {
            return;
        };
        self.console
            .line(format_args!("Output fault on servo {}, the servo may not have moved", actor));

        let servo = self.bank.get_mut(actor);
        if servo.is_running() {
            self.interpreter
                .apply(actor, servo, &mut self.motion, ServoEvent::Pause);
            self.console
                .line(format_args!("Recipe paused on servo {}", actor));
        }
    }

    fn report_complete(&mut self, actor: Actor, recipe: u8) {
        self.console.line(format_args!(
            "Recipe {} complete for servo {}, resetting servo {} to starting position ...",
            recipe, actor, actor
        ));
    }

    fn handle_fault(&mut self, actor: Actor, fault: Fault) -> Result<(), Halted> {
        let servo = self.bank.get_mut(actor);
        let report = FaultReport {
            actor,
            recipe: servo.recipe_index(),
            cursor: servo.cursor(),
            instruction: self.interpreter.current_instruction(servo),
            fault,
        };
        self.console.line(format_args!("{}", report));

        if !self.confirm_skip() {
            self.console.write_line("Exiting the program");
            return Err(Halted);
        }

        let servo = self.bank.get_mut(actor);
        if let Some(recipe) = self
            .interpreter
            .recover(actor, servo, &mut self.motion, fault)
        {
            self.report_complete(actor, recipe);
        }
        Ok(())
    }

    /// Ask whether to skip the faulting instruction until the answer is Y or N
    fn confirm_skip(&mut self) -> bool {
        self.console
            .write_line("Do you wish to skip to the next instruction? (Yy or Nn):");
        loop {
            let _ = self.console.write_str(PROMPT);
            let byte = self.console.read_byte();
            self.console.echo(byte, true);

            match byte.to_ascii_uppercase() {
                b'Y' => return true,
                b'N' => return false,
                _ => {
                    self.console.write_line("");
                    self.console.line(format_args!(
                        "Invalid input ({}) please enter Yy or Nn:",
                        char::from(byte)
                    ));
                }
            }
        }
    }
}
