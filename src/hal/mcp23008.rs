//! MCP23008 I/O expander driver.
//!
//! 8 GPIO lines over I2C; drives the display's control and data lines.
//! Reference: MCP23008 datasheet (register map in sequential mode).

use embedded_hal::i2c::I2c;

/// MCP23008 I2C base address (all address pins low).
pub const MCP23008_ADDR: u8 = 0x20;

/// MCP23008 register addresses.
#[allow(dead_code)]
mod regs {
    pub const IODIR: u8 = 0x00;
    pub const IPOL: u8 = 0x01;
    pub const GPINTEN: u8 = 0x02;
    pub const DEFVAL: u8 = 0x03;
    pub const INTCON: u8 = 0x04;
    pub const IOCON: u8 = 0x05;
    pub const GPPU: u8 = 0x06;
    pub const INTF: u8 = 0x07;
    pub const INTCAP: u8 = 0x08;
    pub const GPIO: u8 = 0x09;
    pub const OLAT: u8 = 0x0A;
}

/// MCP23008 driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mcp23008Error {
    /// I2C transfer failed.
    I2c,
    /// Register readback mismatch: wrong chip or bad wiring.
    SelfTest,
}

/// MCP23008 driver.
pub struct Mcp23008<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mcp23008<I2C> {
    /// Create a new driver on the given bus and address.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Configure all lines as outputs driving low, pull-ups off.
    pub fn initialize(&mut self) -> Result<(), Mcp23008Error> {
        self.write_reg(regs::IODIR, 0x00)?;
        self.write_reg(regs::GPPU, 0x00)?;
        self.write_reg(regs::OLAT, 0x00)?;
        Ok(())
    }

    /// Register write/readback self-test.
    ///
    /// IPOL is read-write and has no electrical side effect on outputs,
    /// so it is safe to scribble on. A mismatch means no chip, the wrong
    /// chip, or a broken bus.
    pub fn test(&mut self) -> Result<(), Mcp23008Error> {
        for pattern in [0xAAu8, 0x55u8] {
            self.write_reg(regs::IPOL, pattern)?;
            if self.read_reg(regs::IPOL)? != pattern {
                return Err(Mcp23008Error::SelfTest);
            }
        }
        self.write_reg(regs::IPOL, 0x00)?;
        Ok(())
    }

    /// Drive the GPIO lines to `value`.
    pub fn write_gpio(&mut self, value: u8) -> Result<(), Mcp23008Error> {
        self.write_reg(regs::GPIO, value)
    }

    /// Read the GPIO lines.
    pub fn read_gpio(&mut self) -> Result<u8, Mcp23008Error> {
        self.read_reg(regs::GPIO)
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Mcp23008Error> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| Mcp23008Error::I2c)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, Mcp23008Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| Mcp23008Error::I2c)?;
        Ok(buf[0])
    }
}
