//! Hardware adapter: bridges the indicator LEDs to the [`OutputPort`] trait.
//!
//! Owns one [`IndicatorLed`] per configured output pin.  Acquisition exports
//! and configures every pin up front; dropping the adapter drives every LED
//! off and releases the pins, so teardown happens on every exit path.

use log::{info, warn};

use crate::app::ports::OutputPort;
use crate::config::GpioConfig;
use crate::drivers::gpio::BoardPin;
use crate::drivers::indicator::IndicatorLed;
use crate::error::Result;

/// Concrete adapter that combines all indicator LEDs behind [`OutputPort`].
pub struct HardwareAdapter {
    leds: Vec<IndicatorLed<BoardPin>>,
}

impl HardwareAdapter {
    /// Acquire `cfg.output_pins` in order.
    ///
    /// If any pin fails, the ones already acquired are released before the
    /// error is returned.
    pub fn acquire(cfg: &GpioConfig) -> Result<Self> {
        let mut adapter = Self {
            leds: Vec::with_capacity(cfg.output_pins.len()),
        };
        for &bcm in &cfg.output_pins {
            let pin = BoardPin::acquire(cfg, bcm)?;
            adapter.leds.push(IndicatorLed::new(pin, bcm));
        }
        info!(
            "Outputs acquired ({:?} backend): GPIO {:?}",
            cfg.backend, cfg.output_pins
        );
        Ok(adapter)
    }

    /// In-memory outputs on `pins`, for host runs and tests.
    pub fn simulated(pins: &[u32]) -> Self {
        Self {
            leds: pins
                .iter()
                .map(|&bcm| IndicatorLed::new(BoardPin::simulated(bcm), bcm))
                .collect(),
        }
    }

    pub fn is_lit(&self, index: usize) -> bool {
        self.leds.get(index).is_some_and(IndicatorLed::is_lit)
    }

    /// BCM numbers of the lit outputs.
    pub fn lit_pins(&self) -> Vec<u32> {
        self.leds
            .iter()
            .filter(|l| l.is_lit())
            .map(IndicatorLed::gpio)
            .collect()
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for HardwareAdapter {
    fn output_count(&self) -> usize {
        self.leds.len()
    }

    fn set_output(&mut self, index: usize, on: bool) {
        match self.leds.get_mut(index) {
            Some(led) => led.set(on),
            None => warn!("No output at index {}", index),
        }
    }
}

impl Drop for HardwareAdapter {
    fn drop(&mut self) {
        for led in &mut self.leds {
            led.off();
            if let Err(e) = led.pin_mut().release() {
                warn!("Output release failed: {}", e);
            }
        }
        if !self.leds.is_empty() {
            info!("Outputs off and released");
        }
    }
}
