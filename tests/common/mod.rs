//! Shared test doubles: a recording display and a scriptable serial line.

#![allow(dead_code)]

use std::collections::VecDeque;

use lcd_shell::display::{CharacterDisplay, CursorMode, Direction, DisplayError};
use lcd_shell::hal::SerialLine;

/// One display mutation, as the mock saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Initialize,
    WriteText(String),
    WriteChar(char),
    SetCursor(u8, u8),
    SetCursorMode(CursorMode),
    Backlight(bool),
    Enabled(bool),
    AutoScroll(bool),
    Scroll(Direction),
    Clear,
    Reset,
}

/// Records every operation; never fails.
#[derive(Default)]
pub struct MockDisplay {
    pub ops: Vec<DisplayOp>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops excluding pure cursor movement, which most tests treat as
    /// incidental.
    pub fn mutations(&self) -> Vec<&DisplayOp> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, DisplayOp::SetCursor(_, _)))
            .collect()
    }

    /// The characters written, in order.
    pub fn written_chars(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DisplayOp::WriteChar(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

impl CharacterDisplay for MockDisplay {
    fn initialize(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Initialize);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::WriteText(text.to_string()));
        Ok(())
    }

    fn write_char(&mut self, c: char) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::WriteChar(c));
        Ok(())
    }

    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::SetCursor(column, row));
        Ok(())
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::SetCursorMode(mode));
        Ok(())
    }

    fn set_backlight_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Backlight(enabled));
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Enabled(enabled));
        Ok(())
    }

    fn set_auto_scroll_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::AutoScroll(enabled));
        Ok(())
    }

    fn scroll(&mut self, direction: Direction) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Scroll(direction));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Clear);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Reset);
        Ok(())
    }
}

/// Scriptable serial line: readiness flag, queued input, captured output.
#[derive(Default)]
pub struct MockSerial {
    pub ready: bool,
    pub initialized: bool,
    pub input: VecDeque<u8>,
    pub output: String,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &str) {
        self.input.extend(bytes.bytes());
    }
}

impl core::fmt::Write for MockSerial {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl SerialLine for MockSerial {
    fn initialize(&mut self) {
        self.initialized = true;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn poll_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}
