//! # lcd-shell
//!
//! Demonstration firmware for an I2C character LCD: bring the display up,
//! wait for a USB serial connection, then serve a line-based command shell
//! that pokes at display primitives (text, cursor, backlight, scrolling).
//!
//! ## Architecture
//!
//! Everything runs as run-to-completion callbacks on a cooperative
//! [`event::EventLoop`]; there is no preemption and no shared mutable
//! state. The [`session::Session`] owns the display and the serial line
//! and walks a one-way state machine: waiting-for-connection (spinner
//! animation) into the interactive shell.
//!
//! The display and serial line are traits ([`display::CharacterDisplay`],
//! [`hal::SerialLine`]), so the whole console runs against mocks on the
//! host while `src/main.rs` wires up the real MCP23008-backed HD44780 on
//! the target.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod display;
pub mod event;
pub mod fault;
pub mod hal;
pub mod session;

pub use display::{CharacterDisplay, CursorMode, Direction, DisplayError};
pub use event::EventLoop;
pub use fault::{FaultCode, FaultState};
pub use hal::SerialLine;
pub use session::Session;
