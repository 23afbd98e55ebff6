//! Character display abstraction.
//!
//! The console never talks to hardware directly; it drives this trait.
//! The target implementation is [`crate::hal::Hd44780`] behind the
//! MCP23008 I/O expander, host tests use a recording mock.

/// Errors that can occur talking to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// I2C transfer to the I/O expander failed.
    Bus,
    /// Cursor position outside the display geometry.
    OutOfRange,
    /// Controller rejected or cannot perform the operation.
    Controller,
}

/// Visual style of the text cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Cursor hidden.
    Off,
    /// Blinking solid block.
    Block,
    /// Underline cursor.
    Line,
}

/// Scroll direction for one-step scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A character LCD with cursor, backlight and scrolling.
///
/// All operations are synchronous and run to completion; there is exactly
/// one writer at a time (single-threaded dispatch).
pub trait CharacterDisplay {
    /// Initialize the display controller into a known state: cleared,
    /// cursor at the origin, cursor hidden, backlight off.
    fn initialize(&mut self) -> Result<(), DisplayError>;

    /// Write text at the current cursor position.
    fn write_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Write a single character at the current cursor position.
    fn write_char(&mut self, c: char) -> Result<(), DisplayError>;

    /// Move the cursor to the given column and row.
    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError>;

    /// Set the cursor style.
    fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), DisplayError>;

    /// Switch the backlight on or off.
    fn set_backlight_enabled(&mut self, enabled: bool) -> Result<(), DisplayError>;

    /// Enable or disable the display (disabled displays blank but keep
    /// their contents).
    fn set_enabled(&mut self, enabled: bool) -> Result<(), DisplayError>;

    /// Enable or disable auto-scroll on writes past the visible width.
    fn set_auto_scroll_enabled(&mut self, enabled: bool) -> Result<(), DisplayError>;

    /// Scroll the visible contents one step.
    fn scroll(&mut self, direction: Direction) -> Result<(), DisplayError>;

    /// Clear the display and return the cursor to the origin.
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Reset the controller to its power-on state.
    fn reset(&mut self) -> Result<(), DisplayError>;
}
