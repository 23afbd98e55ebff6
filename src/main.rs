//! lcd-shell - firmware entry point.
//!
//! Bring-up runs in strict order: indicator LED, I2C bus, I/O expander
//! (init + self-test), display controller, console session. Each step
//! that fails records a fault code and diverges into the LED blink loop;
//! there is no retry and no partial-success path. Success falls through
//! into driving the cooperative event loop forever.

#![cfg_attr(target_arch = "xtensa", no_std)]
#![cfg_attr(target_arch = "xtensa", no_main)]

#[cfg(target_arch = "xtensa")]
use esp_idf_svc::sys as esp_idf_sys;

#[cfg(target_arch = "xtensa")]
use esp_idf_svc::hal::{
    delay::FreeRtos,
    gpio::PinDriver,
    i2c::{I2cConfig, I2cDriver},
    peripherals::Peripherals,
    units::FromValueType,
    usb_serial::{UsbSerialConfig, UsbSerialDriver},
};

#[cfg(target_arch = "xtensa")]
use lcd_shell::{
    config::{LCD_COLUMNS, LCD_ROWS},
    fault::{FaultCode, FaultState},
    hal::{gpio::blink_forever, serial::UsbSerial, Hd44780, Mcp23008, MCP23008_ADDR},
    CharacterDisplay, EventLoop, Session,
};

/// Which bring-up step died, for anyone attached with a debugger.
#[cfg(target_arch = "xtensa")]
static FAULT: FaultState = FaultState::new();

#[cfg(target_arch = "xtensa")]
#[no_mangle]
fn main() {
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("{} starting", env!("VERSION_STRING"));

    let Ok(peripherals) = Peripherals::take() else {
        halt();
    };

    // Indicator LED as output. Without it there is no error signal, so
    // a failure this early just parks the core.
    let Ok(mut led) = PinDriver::output(peripherals.pins.gpio2) else {
        halt();
    };

    // I2C bus for the display.
    let i2c_config = I2cConfig::new().baudrate(100u32.kHz().into());
    let i2c = match I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &i2c_config,
    ) {
        Ok(i2c) => i2c,
        Err(_) => fatal(FaultCode::I2cInit, &mut led),
    };

    // I/O expander behind the display, init and self-test.
    let mut expander = Mcp23008::new(i2c, MCP23008_ADDR);
    if expander.initialize().is_err() {
        fatal(FaultCode::ExpanderInit, &mut led);
    }
    if expander.test().is_err() {
        fatal(FaultCode::ExpanderSelfTest, &mut led);
    }

    // Display controller.
    let mut display = Hd44780::new(expander, FreeRtos, LCD_COLUMNS, LCD_ROWS);
    if display.initialize().is_err() {
        fatal(FaultCode::DisplayInit, &mut led);
    }

    // USB serial line.
    let serial = match UsbSerialDriver::new(peripherals.usb_serial, &UsbSerialConfig::new()) {
        Ok(driver) => UsbSerial::new(driver),
        Err(_) => fatal(FaultCode::ConsoleInit, &mut led),
    };

    // Console session: backlight, waiting message, animation event.
    // The loop runs on esp_timer milliseconds, so align its clock before
    // the first event is scheduled.
    let mut events = EventLoop::new();
    events.set_time(now_ms());
    let mut session = Session::new(display, serial);
    if session.initialize(&mut events).is_err() {
        fatal(FaultCode::ConsoleInit, &mut led);
    }

    loop {
        events.loop_once(&mut session, now_ms());
        FreeRtos::delay_ms(1);
    }
}

/// Record the failed step and enter the terminal blink. Never returns.
#[cfg(target_arch = "xtensa")]
fn fatal<P: embedded_hal::digital::StatefulOutputPin>(code: FaultCode, led: &mut P) -> ! {
    FAULT.set(code);
    log::error!("bring-up failed at {}", code.as_str());
    blink_forever(led, &mut FreeRtos)
}

/// Last resort when even the indicator pin is unavailable.
#[cfg(target_arch = "xtensa")]
fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(1000);
    }
}

#[cfg(target_arch = "xtensa")]
fn now_ms() -> u64 {
    let us = unsafe { esp_idf_sys::esp_timer_get_time() };
    (us / 1000) as u64
}

#[cfg(not(target_arch = "xtensa"))]
fn main() {
    // Hardware bring-up only exists on the target; the console logic is
    // exercised on the host through the test suite.
    println!("lcd-shell is ESP32-S3 firmware; build it for the xtensa target.");
}
