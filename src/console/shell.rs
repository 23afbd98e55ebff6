//! Byte-wise shell input processing.
//!
//! Owns the line buffer, history and completion state; every received
//! byte runs to completion through `process_byte`. Command output and
//! echo both go to the same writer (the serial line).

use core::fmt::Write;

use super::{execute, command_names, parse_line, Completer, ConsoleError, History, LineBuffer};
use crate::config::PROMPT;
use crate::display::CharacterDisplay;

/// Shell state machine.
pub struct Shell {
    line: LineBuffer,
    history: History,
    completer: Completer,
    /// Escape sequence state.
    escape_state: EscapeState,
}

#[derive(Clone, Copy, PartialEq)]
enum EscapeState {
    Normal,
    Escape,  // Got ESC
    Bracket, // Got ESC [
}

impl Shell {
    /// Create a new shell.
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            history: History::new(),
            completer: Completer::new(),
            escape_state: EscapeState::Normal,
        }
    }

    /// Process a single input byte.
    ///
    /// Returns Some(result) if a command line was executed, None if more
    /// input is needed. Rejected commands have their diagnostic printed
    /// here; the result is informational.
    pub fn process_byte(
        &mut self,
        byte: u8,
        display: &mut dyn CharacterDisplay,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match self.escape_state {
            EscapeState::Normal => self.process_normal(byte, display, out),
            EscapeState::Escape => {
                if byte == b'[' {
                    self.escape_state = EscapeState::Bracket;
                } else {
                    self.escape_state = EscapeState::Normal;
                }
                None
            }
            EscapeState::Bracket => {
                self.escape_state = EscapeState::Normal;
                match byte {
                    b'A' => self.handle_up(out),   // Up arrow
                    b'B' => self.handle_down(out), // Down arrow
                    _ => {}
                }
                None
            }
        }
    }

    fn process_normal(
        &mut self,
        byte: u8,
        display: &mut dyn CharacterDisplay,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match byte {
            // Enter
            b'\r' | b'\n' => {
                let _ = writeln!(out);
                let line = self.line.as_str();

                if !line.is_empty() {
                    self.history.push(line);
                    let cmd = parse_line(line);
                    let result = execute(&cmd, display, out);

                    if let Err(error) = result {
                        match error {
                            ConsoleError::UnknownCommand => {
                                let _ = writeln!(out, "Unknown command '{}'.", cmd.command);
                            }
                            _ => {
                                let _ = writeln!(out, "{}", error.message());
                            }
                        }
                    }

                    self.line.clear();
                    self.print_prompt(out);
                    return Some(result);
                }

                self.print_prompt(out);
                None
            }

            // Backspace
            0x7F | 0x08 => {
                if !self.line.is_empty() {
                    self.line.backspace();
                    // Echo: backspace, space, backspace
                    let _ = write!(out, "\x08 \x08");
                }
                self.completer.reset();
                self.history.reset_nav();
                None
            }

            // Tab
            b'\t' => {
                self.handle_tab(out);
                None
            }

            // Escape
            0x1B => {
                self.escape_state = EscapeState::Escape;
                None
            }

            // Ctrl+C
            0x03 => {
                let _ = writeln!(out, "^C");
                self.line.clear();
                self.print_prompt(out);
                None
            }

            // Ctrl+U (clear line)
            0x15 => {
                for _ in 0..self.line.len() {
                    let _ = write!(out, "\x08 \x08");
                }
                self.line.clear();
                None
            }

            // Printable character
            0x20..=0x7E => {
                self.line.push(byte);
                let _ = write!(out, "{}", byte as char);
                self.completer.reset();
                self.history.reset_nav();
                None
            }

            _ => None,
        }
    }

    /// Complete the command word. Arguments are free text or fixed enum
    /// names; only the first word completes.
    fn handle_tab(&mut self, out: &mut dyn Write) {
        let input = self.line.as_str();

        let word_count = input.split_whitespace().count();
        if word_count > 1 || input.ends_with(' ') {
            return;
        }

        if let Some(completed) = self.completer.complete(input, command_names()) {
            // Clear the current word and replace it with the completion.
            let prefix_len = input.len();
            for _ in 0..prefix_len {
                self.line.backspace();
                let _ = write!(out, "\x08 \x08");
            }

            for c in completed.bytes() {
                self.line.push(c);
                let _ = write!(out, "{}", c as char);
            }
        }
    }

    // The recalled entry borrows the history, so the redraw must not
    // touch it; `replace_line` takes the line buffer alone.

    fn handle_up(&mut self, out: &mut dyn Write) {
        if let Some(prev) = self.history.get_prev() {
            Self::replace_line(&mut self.line, prev, out);
        }
    }

    fn handle_down(&mut self, out: &mut dyn Write) {
        if let Some(next) = self.history.get_next() {
            Self::replace_line(&mut self.line, next, out);
        } else {
            // Back to an empty line
            Self::replace_line(&mut self.line, "", out);
        }
    }

    fn replace_line(line: &mut LineBuffer, new_line: &str, out: &mut dyn Write) {
        // Clear displayed line
        for _ in 0..line.len() {
            let _ = write!(out, "\x08 \x08");
        }

        // Set and display new line
        line.set(new_line);
        let _ = write!(out, "{}", new_line);
    }

    /// Print the prompt.
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}", PROMPT);
    }

    /// Print the welcome banner.
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "*** Welcome to the LCD demo! ***");
        let _ = writeln!(out, "Use the command 'help' to get help.");
        self.print_prompt(out);
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
