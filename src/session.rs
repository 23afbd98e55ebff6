//! Console session: connection wait, then the interactive shell.
//!
//! A two-state machine, one-way: WaitingForConnection -> ShellActive.
//! While waiting, a delayed event re-arms itself every animation frame
//! and draws a spinner glyph; once the serial peer attaches, the shell
//! poll event takes over and the wait event is never rescheduled.

use core::fmt::Write;

use log::info;

use crate::config::WAIT_ANIMATION_DELAY_MS;
use crate::console::Shell;
use crate::display::{CharacterDisplay, DisplayError};
use crate::event::EventLoop;
use crate::hal::SerialLine;

/// The four spinner glyphs, in draw order.
pub const WAIT_GLYPHS: &[u8; 4] = b"^>v<";

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Spinner on the display, no serial peer yet.
    WaitingForConnection,
    /// Serial peer attached, shell serving lines.
    ShellActive,
}

/// Owns the display, the serial line and the shell.
pub struct Session<D, S> {
    display: D,
    serial: S,
    shell: Shell,
    phase: Phase,
    wait_glyph_idx: usize,
}

impl<D, S> Session<D, S>
where
    D: CharacterDisplay,
    S: SerialLine,
{
    /// Create a new session around an initialized display.
    pub fn new(display: D, serial: S) -> Self {
        Self {
            display,
            serial,
            shell: Shell::new(),
            phase: Phase::WaitingForConnection,
            wait_glyph_idx: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The display, for inspection.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The serial line, for inspection and test input injection.
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Initialize the console: serial line up, backlight on, waiting
    /// message, first animation frame scheduled.
    ///
    /// A refused backlight is an initialization error; the waiting text
    /// itself is cosmetic and written best-effort.
    pub fn initialize(&mut self, lp: &mut EventLoop<Self>) -> Result<(), DisplayError> {
        self.serial.initialize();

        self.display.set_backlight_enabled(true)?;

        let _ = self.display.write_text("Waiting for");
        let _ = self.display.set_cursor(0, 1);
        let _ = self.display.write_text("USB serial...");

        lp.add_delayed_event(Self::wait_for_serial_event, WAIT_ANIMATION_DELAY_MS);

        info!("console up, waiting for USB serial");
        Ok(())
    }

    /// Animation step while waiting for the serial peer.
    ///
    /// Draws the next spinner glyph and re-arms itself; once the line is
    /// ready it hands over to the shell instead and is gone for good.
    pub fn wait_for_serial_event(&mut self, lp: &mut EventLoop<Self>) {
        let _ = self.display.set_cursor(0, 2);
        if self.serial.is_ready() {
            self.start_shell(lp);
        } else {
            let glyph = WAIT_GLYPHS[self.wait_glyph_idx] as char;
            let _ = self.display.write_char(glyph);
            self.wait_glyph_idx = (self.wait_glyph_idx + 1) % WAIT_GLYPHS.len();
            lp.add_delayed_event(Self::wait_for_serial_event, WAIT_ANIMATION_DELAY_MS);
        }
    }

    fn start_shell(&mut self, lp: &mut EventLoop<Self>) {
        let _ = self.display.write_text("OK!");

        self.shell.print_banner(&mut self.serial);

        lp.add_poll_event(Self::shell_poll_event);
        self.phase = Phase::ShellActive;

        info!("serial peer attached, shell active");
    }

    /// Drain pending serial input into the shell.
    pub fn shell_poll_event(&mut self, _lp: &mut EventLoop<Self>) {
        while let Some(byte) = self.serial.poll_byte() {
            let _ = self
                .shell
                .process_byte(byte, &mut self.display, &mut self.serial as &mut dyn Write);
        }
    }
}
