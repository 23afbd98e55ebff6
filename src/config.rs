//! Compile-time configuration.
//!
//! There are no runtime parameters in this firmware; everything the board
//! wiring and the demo behavior depend on lives here as constants.

/// Display geometry: columns.
pub const LCD_COLUMNS: u8 = 20;

/// Display geometry: rows.
pub const LCD_ROWS: u8 = 4;

/// Delay between wait-animation frames, in milliseconds.
pub const WAIT_ANIMATION_DELAY_MS: u64 = 300;

/// Indicator LED toggle period for the fatal error signal, in milliseconds.
pub const ERROR_BLINK_DELAY_MS: u32 = 200;

/// The shell prompt.
pub const PROMPT: &str = "lcd-demo> ";
