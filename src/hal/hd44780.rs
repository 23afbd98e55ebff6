//! HD44780 display backend behind the MCP23008.
//!
//! Pin mapping is the Adafruit I2C backpack one: GP1 = RS, GP2 = E,
//! GP3..GP6 = D4..D7, GP7 = backlight. The controller runs in 4-bit
//! mode, so every byte goes out as two strobed nibbles.
//!
//! Init sequence and command bits follow the HD44780 datasheet; the
//! 3x function-set wakeup dance is the standard one for an unknown
//! power-on state.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::mcp23008::{Mcp23008, Mcp23008Error};
use crate::display::{CharacterDisplay, CursorMode, Direction, DisplayError};

/// Expander line assignments (Adafruit backpack).
mod lines {
    pub const RS: u8 = 1 << 1;
    pub const ENABLE: u8 = 1 << 2;
    pub const DATA_SHIFT: u8 = 3; // D4..D7 on GP3..GP6
    pub const BACKLIGHT: u8 = 1 << 7;
}

/// HD44780 instruction set.
mod cmds {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const ENTRY_SHIFT: u8 = 0x01;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;
    pub const SHIFT: u8 = 0x10;
    pub const SHIFT_DISPLAY: u8 = 0x08;
    pub const SHIFT_RIGHT: u8 = 0x04;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const FUNCTION_2LINE: u8 = 0x08;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM start address of each row on 4-row modules.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

impl From<Mcp23008Error> for DisplayError {
    fn from(_: Mcp23008Error) -> Self {
        DisplayError::Bus
    }
}

/// HD44780 character display on an MCP23008 I/O expander.
pub struct Hd44780<I2C, D> {
    expander: Mcp23008<I2C>,
    delay: D,
    columns: u8,
    rows: u8,
    backlight: bool,
    enabled: bool,
    cursor_mode: CursorMode,
    auto_scroll: bool,
    cursor_row: u8,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new backend over an initialized expander.
    pub fn new(expander: Mcp23008<I2C>, delay: D, columns: u8, rows: u8) -> Self {
        Self {
            expander,
            delay,
            columns,
            rows,
            backlight: false,
            enabled: true,
            cursor_mode: CursorMode::Off,
            auto_scroll: false,
            cursor_row: 0,
        }
    }

    /// Drive the expander lines, merging in the backlight state.
    fn set_lines(&mut self, value: u8) -> Result<(), DisplayError> {
        let backlight = if self.backlight { lines::BACKLIGHT } else { 0 };
        self.expander.write_gpio(value | backlight)?;
        Ok(())
    }

    /// Strobe one nibble out, with RS selecting command/data.
    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), DisplayError> {
        let mut value = (nibble & 0x0F) << lines::DATA_SHIFT;
        if rs {
            value |= lines::RS;
        }
        self.set_lines(value)?;
        self.set_lines(value | lines::ENABLE)?;
        self.delay.delay_us(1);
        self.set_lines(value)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, rs: bool) -> Result<(), DisplayError> {
        self.write_nibble(byte >> 4, rs)?;
        self.write_nibble(byte & 0x0F, rs)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.write_byte(cmd, false)
    }

    fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.write_byte(value, true)
    }

    fn update_display_control(&mut self) -> Result<(), DisplayError> {
        let mut control = cmds::DISPLAY_CONTROL;
        if self.enabled {
            control |= cmds::DISPLAY_ON;
        }
        match self.cursor_mode {
            CursorMode::Off => {}
            CursorMode::Block => control |= cmds::BLINK_ON,
            CursorMode::Line => control |= cmds::CURSOR_ON,
        }
        self.command(control)
    }

    fn update_entry_mode(&mut self) -> Result<(), DisplayError> {
        let mut mode = cmds::ENTRY_MODE | cmds::ENTRY_INCREMENT;
        if self.auto_scroll {
            mode |= cmds::ENTRY_SHIFT;
        }
        self.command(mode)
    }
}

impl<I2C, D> CharacterDisplay for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn initialize(&mut self) -> Result<(), DisplayError> {
        self.backlight = false;
        self.enabled = true;
        self.cursor_mode = CursorMode::Off;
        self.auto_scroll = false;
        self.cursor_row = 0;

        // Power-on settle.
        self.delay.delay_ms(50);

        // Wake-up dance: three 8-bit function sets, then switch to 4-bit.
        for _ in 0..3 {
            self.write_nibble(0x03, false)?;
            self.delay.delay_ms(5);
        }
        self.write_nibble(0x02, false)?;

        self.command(cmds::FUNCTION_SET | cmds::FUNCTION_2LINE)?;
        self.update_display_control()?;
        self.clear()?;
        self.update_entry_mode()?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        for c in text.chars() {
            self.write_char(c)?;
        }
        Ok(())
    }

    fn write_char(&mut self, c: char) -> Result<(), DisplayError> {
        let code = u32::from(c);
        if code > 0xFF {
            // Outside the controller's character ROM.
            return Err(DisplayError::Controller);
        }
        self.data(code as u8)
    }

    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        if column >= self.columns || row >= self.rows {
            return Err(DisplayError::OutOfRange);
        }
        self.cursor_row = row;
        self.command(cmds::SET_DDRAM | (ROW_OFFSETS[row as usize] + column))
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), DisplayError> {
        self.cursor_mode = mode;
        self.update_display_control()
    }

    fn set_backlight_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.backlight = enabled;
        // Refresh the lines so the new state latches immediately.
        self.set_lines(0)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.enabled = enabled;
        self.update_display_control()
    }

    fn set_auto_scroll_enabled(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.auto_scroll = enabled;
        self.update_entry_mode()
    }

    fn scroll(&mut self, direction: Direction) -> Result<(), DisplayError> {
        match direction {
            Direction::Left => self.command(cmds::SHIFT | cmds::SHIFT_DISPLAY),
            Direction::Right => {
                self.command(cmds::SHIFT | cmds::SHIFT_DISPLAY | cmds::SHIFT_RIGHT)
            }
            // The controller has no vertical shift; move the cursor a row
            // instead (clamped at the edges).
            Direction::Up => {
                let row = self.cursor_row.saturating_sub(1);
                self.cursor_row = row;
                self.command(cmds::SET_DDRAM | ROW_OFFSETS[row as usize])
            }
            Direction::Down => {
                let row = (self.cursor_row + 1).min(self.rows - 1);
                self.cursor_row = row;
                self.command(cmds::SET_DDRAM | ROW_OFFSETS[row as usize])
            }
        }
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmds::CLEAR)?;
        self.cursor_row = 0;
        // Clear is the one slow instruction.
        self.delay.delay_ms(2);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        self.initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mcp23008::MCP23008_ADDR;
    use embedded_hal::i2c::{ErrorType, Operation};

    struct QuietBus;

    impl ErrorType for QuietBus {
        type Error = core::convert::Infallible;
    }

    impl I2c for QuietBus {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn display() -> Hd44780<QuietBus, NoDelay> {
        let expander = Mcp23008::new(QuietBus, MCP23008_ADDR);
        Hd44780::new(expander, NoDelay, 20, 4)
    }

    #[test]
    fn test_initialize_succeeds_on_quiet_bus() {
        let mut lcd = display();
        assert!(lcd.initialize().is_ok());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut lcd = display();
        lcd.initialize().unwrap();

        assert!(lcd.set_cursor(19, 3).is_ok());
        assert_eq!(lcd.set_cursor(20, 0), Err(DisplayError::OutOfRange));
        assert_eq!(lcd.set_cursor(0, 4), Err(DisplayError::OutOfRange));
    }

    #[test]
    fn test_write_char_rejects_wide_chars() {
        let mut lcd = display();
        lcd.initialize().unwrap();

        assert!(lcd.write_char('A').is_ok());
        assert_eq!(lcd.write_char('€'), Err(DisplayError::Controller));
    }

    #[test]
    fn test_vertical_scroll_clamps() {
        let mut lcd = display();
        lcd.initialize().unwrap();

        lcd.scroll(Direction::Up).unwrap();
        lcd.scroll(Direction::Up).unwrap();
        lcd.set_cursor(0, 3).unwrap();
        lcd.scroll(Direction::Down).unwrap();
        lcd.scroll(Direction::Down).unwrap();
    }
}
