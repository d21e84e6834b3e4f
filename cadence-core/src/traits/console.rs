//! Operator console trait
//!
//! The console is the serial terminal the operator types commands into.
//! Formatted output goes through [`core::fmt::Write`].

use core::fmt::{self, Write};

/// ASCII backspace
pub const BACKSPACE: u8 = 0x08;

/// ASCII delete (sent by most terminals for the backspace key)
pub const DELETE: u8 = 0x7F;

/// ASCII escape
pub const ESCAPE: u8 = 0x1B;

/// Line terminator written after every output line
pub const LINE_END: &str = "\r\n";

/// Serial terminal used for prompts, echo and diagnostics
///
/// Output errors are not recoverable on the device, so the provided
/// helpers drop them.
pub trait Console: Write {
    /// Block until the operator sends a byte
    fn read_byte(&mut self) -> u8;

    /// Return a byte if one is already waiting, without blocking
    fn try_read_byte(&mut self) -> Option<u8>;

    /// Echo a keystroke back to the terminal
    fn echo(&mut self, byte: u8, newline: bool) {
        let mut buf = [0u8; 4];
        let text = char::from(byte).encode_utf8(&mut buf);
        let _ = self.write_str(text);
        if newline {
            let _ = self.write_str(LINE_END);
        }
    }

    /// Write text followed by a line terminator
    fn write_line(&mut self, text: &str) {
        let _ = self.write_str(text);
        let _ = self.write_str(LINE_END);
    }

    /// Write formatted text followed by a line terminator
    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.write_fmt(args);
        let _ = self.write_str(LINE_END);
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::ScriptedConsole;
    use crate::traits::{Console, BACKSPACE, DELETE, ESCAPE, LINE_END};

    #[test]
    fn test_control_keys_reachable_from_traits() {
        assert_eq!([BACKSPACE, DELETE, ESCAPE], [0x08, 0x7F, 0x1B]);

        let mut console = ScriptedConsole::new();
        console.write_line("Ready");
        console.echo(b'B', true);
        assert_eq!(LINE_END, "\r\n");
        assert_eq!(console.output(), "Ready\r\nB\r\n");
    }
}
