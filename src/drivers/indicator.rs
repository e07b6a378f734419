//! Indicator LED driver.
//!
//! One LED per key-fob button, active HIGH.  Generic over any
//! `embedded-hal` output pin; write failures are logged and leave the
//! tracked state unchanged, matching how the loop treats outputs as
//! best-effort once they have been acquired.

use embedded_hal::digital::OutputPin;
use log::warn;

pub struct IndicatorLed<P> {
    pin: P,
    gpio: u32,
    lit: bool,
}

impl<P: OutputPin> IndicatorLed<P> {
    pub fn new(pin: P, gpio: u32) -> Self {
        Self {
            pin,
            gpio,
            lit: false,
        }
    }

    pub fn set(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => self.lit = on,
            Err(e) => warn!("LED on GPIO{} write failed: {:?}", self.gpio, e),
        }
    }

    pub fn on(&mut self) {
        self.set(true);
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn gpio(&self) -> u32 {
        self.gpio
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}
