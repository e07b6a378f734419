//! Digital output pins.
//!
//! ## Dual-target design
//!
//! On a Raspberry Pi: [`SysfsPin`] drives `/sys/class/gpio/gpioN/value`.
//! On host/test: [`SimPin`] tracks the level in-memory only.
//!
//! Both implement the `embedded-hal` [`OutputPin`] traits so the LED
//! driver above them never knows which one it has.  [`BoardPin`] picks
//! between them at runtime from [`GpioConfig::backend`].

use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use log::{debug, info};

use crate::config::{GpioBackend, GpioConfig};
use crate::error::GpioError;

/// Attempts while waiting for udev to hand over a freshly exported pin.
const EXPORT_SETTLE_ATTEMPTS: u32 = 20;
const EXPORT_SETTLE_DELAY: Duration = Duration::from_millis(10);

// ───────────────────────────────────────────────────────────────
// Sysfs pin
// ───────────────────────────────────────────────────────────────

/// Output pin exported through the legacy sysfs GPIO interface.
#[derive(Debug)]
pub struct SysfsPin {
    bcm: u32,
    number: u32,
    root: PathBuf,
    dir: PathBuf,
    /// Only unexport pins this process exported.
    exported_here: bool,
    high: bool,
}

impl SysfsPin {
    /// Export `bcm` (offset by `chip_base`) and configure it as an output
    /// driven low.
    pub fn export(root: &Path, bcm: u32, chip_base: u32) -> Result<Self, GpioError> {
        let number = bcm + chip_base;
        let dir = root.join(format!("gpio{number}"));

        let exported_here = if dir.exists() {
            debug!("gpio: {} already exported", number);
            false
        } else {
            fs::write(root.join("export"), number.to_string())
                .map_err(|e| GpioError::new(bcm, "export", e))?;
            true
        };

        let pin = Self {
            bcm,
            number,
            root: root.to_path_buf(),
            dir,
            exported_here,
            high: false,
        };

        // "low" sets the direction to output with an initial low level.
        settle(|| fs::write(pin.dir.join("direction"), "low"))
            .map_err(|e| GpioError::new(bcm, "set direction", e))?;

        info!("gpio: GPIO{} ready as output (sysfs #{})", bcm, number);
        Ok(pin)
    }

    pub fn bcm(&self) -> u32 {
        self.bcm
    }

    fn write_level(&mut self, high: bool) -> Result<(), GpioError> {
        fs::write(self.dir.join("value"), if high { "1" } else { "0" })
            .map_err(|e| GpioError::new(self.bcm, "write", e))?;
        self.high = high;
        Ok(())
    }

    /// Drive low and hand the pin back to the kernel.
    pub fn unexport(&mut self) -> Result<(), GpioError> {
        self.write_level(false)?;
        if self.exported_here {
            fs::write(self.root.join("unexport"), self.number.to_string())
                .map_err(|e| GpioError::new(self.bcm, "unexport", e))?;
            self.exported_here = false;
        }
        Ok(())
    }
}

/// Retry `op` while the kernel/udev is still creating or chowning the
/// attribute files of a new export.
fn settle(mut op: impl FnMut() -> io::Result<()>) -> io::Result<()> {
    let mut attempt = 1;
    loop {
        match op() {
            Err(e)
                if attempt < EXPORT_SETTLE_ATTEMPTS
                    && matches!(
                        e.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                    ) =>
            {
                attempt += 1;
                thread::sleep(EXPORT_SETTLE_DELAY);
            }
            other => return other,
        }
    }
}

impl ErrorType for SysfsPin {
    type Error = GpioError;
}

impl OutputPin for SysfsPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write_level(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write_level(true)
    }
}

impl StatefulOutputPin for SysfsPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

// ───────────────────────────────────────────────────────────────
// Simulated pin
// ───────────────────────────────────────────────────────────────

/// In-memory output pin for host runs and tests.
#[derive(Debug, Clone, Default)]
pub struct SimPin {
    high: bool,
    writes: u32,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Total level writes seen, including redundant ones.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

// ───────────────────────────────────────────────────────────────
// Board pin (runtime backend selection)
// ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum BoardPin {
    Sysfs(SysfsPin),
    Sim { bcm: u32, pin: SimPin },
}

impl BoardPin {
    /// Acquire `bcm` with the backend named in `cfg`.
    pub fn acquire(cfg: &GpioConfig, bcm: u32) -> Result<Self, GpioError> {
        match cfg.backend {
            GpioBackend::Sysfs => {
                SysfsPin::export(Path::new(&cfg.sysfs_root), bcm, cfg.chip_base).map(Self::Sysfs)
            }
            GpioBackend::Sim => {
                debug!("gpio(sim): GPIO{} ready", bcm);
                Ok(Self::simulated(bcm))
            }
        }
    }

    pub fn simulated(bcm: u32) -> Self {
        Self::Sim {
            bcm,
            pin: SimPin::new(),
        }
    }

    pub fn bcm(&self) -> u32 {
        match self {
            Self::Sysfs(p) => p.bcm(),
            Self::Sim { bcm, .. } => *bcm,
        }
    }

    /// Release the pin (sysfs: unexport; sim: drive low).
    pub fn release(&mut self) -> Result<(), GpioError> {
        match self {
            Self::Sysfs(p) => p.unexport(),
            Self::Sim { pin, .. } => {
                let Ok(()) = pin.set_low();
                Ok(())
            }
        }
    }
}

impl ErrorType for BoardPin {
    type Error = GpioError;
}

impl OutputPin for BoardPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        match self {
            Self::Sysfs(p) => p.set_low(),
            Self::Sim { pin, .. } => {
                let Ok(()) = pin.set_low();
                Ok(())
            }
        }
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        match self {
            Self::Sysfs(p) => p.set_high(),
            Self::Sim { pin, .. } => {
                let Ok(()) = pin.set_high();
                Ok(())
            }
        }
    }
}
