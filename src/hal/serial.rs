//! USB serial line.
//!
//! The transport transitions from not-ready to ready exactly once per
//! device attach; readiness is checked, never awaited. Output goes
//! through `core::fmt::Write` so the shell can treat the line as any
//! other writer.

/// A line-oriented serial transport.
pub trait SerialLine: core::fmt::Write {
    /// Bring the transport up. Readiness arrives later, once a peer
    /// attaches.
    fn initialize(&mut self);

    /// True once a peer is attached.
    fn is_ready(&self) -> bool;

    /// Non-blocking read of a single byte.
    fn poll_byte(&mut self) -> Option<u8>;
}

/// USB-Serial-JTAG transport on the ESP32-S3.
#[cfg(all(not(test), target_arch = "xtensa"))]
pub struct UsbSerial<'d> {
    driver: esp_idf_svc::hal::usb_serial::UsbSerialDriver<'d>,
}

#[cfg(all(not(test), target_arch = "xtensa"))]
impl<'d> UsbSerial<'d> {
    /// Wrap an already constructed driver.
    pub fn new(driver: esp_idf_svc::hal::usb_serial::UsbSerialDriver<'d>) -> Self {
        Self { driver }
    }
}

#[cfg(all(not(test), target_arch = "xtensa"))]
impl SerialLine for UsbSerial<'_> {
    fn initialize(&mut self) {
        // The driver is live from construction; nothing more to do.
    }

    fn is_ready(&self) -> bool {
        unsafe { esp_idf_svc::sys::usb_serial_jtag_is_connected() }
    }

    fn poll_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.driver.read(&mut buf, 0) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }
}

#[cfg(all(not(test), target_arch = "xtensa"))]
impl core::fmt::Write for UsbSerial<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            match self.driver.write(bytes, esp_idf_svc::hal::delay::BLOCK) {
                Ok(written) if written > 0 => bytes = &bytes[written..],
                _ => return Err(core::fmt::Error),
            }
        }
        Ok(())
    }
}
