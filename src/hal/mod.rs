//! Hardware abstraction layer.
//!
//! Thin wrappers around the board peripherals. Business logic stays in
//! the core modules; HAL is just I/O. Everything that can run on the
//! host is generic over `embedded-hal` traits.

pub mod gpio;
pub mod hd44780;
pub mod mcp23008;
pub mod serial;

pub use hd44780::Hd44780;
pub use mcp23008::{Mcp23008, Mcp23008Error, MCP23008_ADDR};
pub use serial::SerialLine;
