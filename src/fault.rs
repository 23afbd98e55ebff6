//! Bring-up fault state.
//!
//! Initialization failures are fatal by design: a board whose I2C bus or
//! display did not come up cannot usefully proceed, so the first failure
//! ends in the indicator-LED blink loop and stays there until a physical
//! reset. This module only records *which* step failed; the diverging
//! blink itself lives in `main.rs` next to the pin it toggles.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Which bring-up step failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// I2C bus driver failed to initialize.
    I2cInit = 1,

    /// MCP23008 I/O expander failed to initialize.
    ExpanderInit = 2,

    /// MCP23008 register self-test failed (wrong chip or bad wiring).
    ExpanderSelfTest = 3,

    /// Display controller initialization failed.
    DisplayInit = 4,

    /// Console session initialization failed (backlight refused).
    ConsoleInit = 5,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::I2cInit,
            2 => FaultCode::ExpanderInit,
            3 => FaultCode::ExpanderSelfTest,
            4 => FaultCode::DisplayInit,
            5 => FaultCode::ConsoleInit,
            _ => FaultCode::None,
        }
    }

    /// Human-readable step name for the log line before the blink loop.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::I2cInit => "i2c bus init",
            FaultCode::ExpanderInit => "io expander init",
            FaultCode::ExpanderSelfTest => "io expander self-test",
            FaultCode::DisplayInit => "display init",
            FaultCode::ConsoleInit => "console init",
        }
    }
}

/// Terminal fault state: Running -> Faulted, no transition out.
///
/// Atomic so the record survives into whatever context inspects it (a
/// debugger, or a future watchdog handler); there is no concurrent writer
/// in this firmware.
pub struct FaultState {
    /// True once a bring-up step has failed.
    active: AtomicBool,

    /// Fault code (reason for the fault).
    code: AtomicU8,
}

impl FaultState {
    /// Create new fault state (no fault).
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
        }
    }

    /// Record a fault. The first recorded code wins; bring-up stops at the
    /// first failed step, so a second call would be a bug.
    #[inline]
    pub fn set(&self, code: FaultCode) {
        if !self.active.load(Ordering::Acquire) {
            self.code.store(code as u8, Ordering::Release);
            self.active.store(true, Ordering::Release);
        }
    }

    /// Check if a fault has been recorded.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Get the fault code (only meaningful if `is_active()` is true).
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}
