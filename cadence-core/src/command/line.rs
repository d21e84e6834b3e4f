//! Terminal line editing for two-letter command lines

use heapless::Vec;

use crate::state::SERVO_COUNT;
use crate::traits::{BACKSPACE, DELETE, ESCAPE};

/// Characters kept per command line, one per servo
pub const COMMAND_CAPACITY: usize = SERVO_COUNT;

/// A completed command line
pub type CommandLine = Vec<u8, COMMAND_CAPACITY>;

/// Effect of one received byte
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// Character added to the line; echo it
    Stored(u8),
    /// Last character removed; erase it on the terminal
    Erased,
    /// Nothing changed
    Ignored,
    /// Input aborted; the line was cleared
    Reset,
    /// Terminator received
    Complete(CommandLine),
}

/// Accumulates keystrokes into a [`CommandLine`]
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: CommandLine,
    after_cr: bool,
}

impl LineEditor {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            after_cr: false,
        }
    }

    /// Process one byte from the terminal
    pub fn feed(&mut self, byte: u8) -> Feed {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');

        match byte {
            // CR LF counts as a single terminator
            b'\n' if after_cr => Feed::Ignored,
            b'\r' | b'\n' => Feed::Complete(core::mem::take(&mut self.buffer)),
            ESCAPE => {
                self.buffer.clear();
                Feed::Reset
            }
            BACKSPACE | DELETE => match self.buffer.pop() {
                Some(_) => Feed::Erased,
                None => Feed::Ignored,
            },
            _ => match self.buffer.push(byte) {
                Ok(()) => Feed::Stored(byte),
                // Extra input is dropped
                Err(_) => Feed::Ignored,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(bytes: &[u8]) -> CommandLine {
        CommandLine::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_two_letters_and_enter() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.feed(b'C'), Feed::Stored(b'C'));
        assert_eq!(editor.feed(b'n'), Feed::Stored(b'n'));
        assert_eq!(editor.feed(b'\r'), Feed::Complete(line(b"Cn")));
        assert!(editor.buffer.is_empty());
    }

    #[test]
    fn test_excess_input_is_dropped() {
        let mut editor = LineEditor::new();
        editor.feed(b'L');
        editor.feed(b'R');
        assert_eq!(editor.feed(b'B'), Feed::Ignored);
        assert_eq!(editor.feed(b'\n'), Feed::Complete(line(b"LR")));
    }

    #[test]
    fn test_backspace_removes_last() {
        let mut editor = LineEditor::new();
        editor.feed(b'L');
        editor.feed(b'x');
        assert_eq!(editor.feed(BACKSPACE), Feed::Erased);
        assert_eq!(editor.feed(b'R'), Feed::Stored(b'R'));
        assert_eq!(editor.feed(b'\r'), Feed::Complete(line(b"LR")));
    }

    #[test]
    fn test_backspace_on_empty_line() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.feed(DELETE), Feed::Ignored);
        assert!(editor.buffer.is_empty());
    }

    #[test]
    fn test_escape_resets() {
        let mut editor = LineEditor::new();
        editor.feed(b'B');
        assert_eq!(editor.feed(ESCAPE), Feed::Reset);
        assert!(editor.buffer.is_empty());
        assert_eq!(editor.feed(b'\r'), Feed::Complete(line(b"")));
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let mut editor = LineEditor::new();
        editor.feed(b'P');
        assert_eq!(editor.feed(b'\r'), Feed::Complete(line(b"P")));
        assert_eq!(editor.feed(b'\n'), Feed::Ignored);
        assert_eq!(editor.feed(b'\n'), Feed::Complete(line(b"")));
    }

    proptest! {
        #[test]
        fn prop_line_never_exceeds_capacity(bytes in proptest::collection::vec(0x20u8..0x7F, 0..16)) {
            let mut editor = LineEditor::new();
            for byte in bytes.iter().copied() {
                editor.feed(byte);
                prop_assert!(editor.buffer.len() <= COMMAND_CAPACITY);
            }
            match editor.feed(b'\r') {
                Feed::Complete(done) => {
                    let expected = bytes.len().min(COMMAND_CAPACITY);
                    prop_assert_eq!(&done[..], &bytes[..expected]);
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
