//! Console error types.
//!
//! Every error maps to exactly one line on the serial line; the offending
//! command is dropped and the shell keeps serving. Nothing propagates
//! further.

use crate::display::DisplayError;

/// Why a command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// First token did not match any command.
    UnknownCommand,
    /// `char` called with malformed or missing character numbers.
    CharUsage,
    /// `cursor` called with neither coordinates nor a mode name.
    CursorUsage,
    /// `backlight` called with something other than `on`/`off`.
    BacklightUsage,
    /// The display rejected an operation mid-command.
    DisplayFailed,
}

impl ConsoleError {
    /// The fixed message printed to the operator.
    ///
    /// `UnknownCommand` is the exception: the shell formats it together
    /// with the offending token.
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::CharUsage => "Use with character number. <begin> [<end>]",
            Self::CursorUsage => "Add x and y coordinate, or mode 'off', 'block', 'line'.",
            Self::BacklightUsage => "Add parameter 'on' and 'off'.",
            Self::DisplayFailed => "display error",
        }
    }
}

impl From<DisplayError> for ConsoleError {
    fn from(_: DisplayError) -> Self {
        ConsoleError::DisplayFailed
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
