//! System configuration parameters
//!
//! All tunable parameters for the keyfob-lights daemon.  Every field has a
//! default, so a config file only needs to mention what it changes.
//! Command-line flags are applied on top by `main`.

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;
use crate::resolver::{ButtonCode, ButtonMap};

/// Default UDP port the decoder sends syslog datagrams to.
pub const DEFAULT_PORT: u16 = 1433;

/// Key-fob button codes `[A, B, C, D]`.
pub const DEFAULT_BUTTONS: [ButtonCode; 4] = [3, 12, 48, 192];

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub network: NetworkConfig,
    /// Button codes; position `i` lights `gpio.output_pins[i]`.
    pub buttons: Vec<ButtonCode>,
    pub gpio: GpioConfig,
    pub decoder: DecoderConfig,
}

/// Where the decoder's datagrams arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub bind_address: IpAddr,
    pub port: u16,
}

/// Which GPIO implementation drives the indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpioBackend {
    /// Linux `/sys/class/gpio` interface.
    Sysfs,
    /// In-memory pins (no hardware).
    Sim,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpioConfig {
    pub backend: GpioBackend,
    /// BCM pin numbers, parallel to `buttons`.
    pub output_pins: Vec<u32>,
    /// Root of the sysfs GPIO class directory.
    pub sysfs_root: String,
    /// Offset added to BCM numbers (512 on recent Raspberry Pi kernels).
    pub chip_base: u32,
}

/// Optional launch of the `rtl_433` subprocess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub enabled: bool,
    pub program: String,
    /// Tuning frequency passed to `-f`.
    pub frequency: String,
    /// Appended verbatim after the built-in arguments.
    pub extra_args: Vec<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            buttons: DEFAULT_BUTTONS.to_vec(),
            gpio: GpioConfig::default(),
            decoder: DecoderConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            backend: GpioBackend::Sysfs,
            output_pins: pins::INDICATOR_GPIOS.to_vec(),
            sysfs_root: pins::SYSFS_GPIO_ROOT.to_owned(),
            chip_base: 0,
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "rtl_433".to_owned(),
            frequency: "315M".to_owned(),
            extra_args: Vec::new(),
        }
    }
}

impl NetworkConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl SystemConfig {
    /// Load a JSON config file.  Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Syntax)
    }

    /// Validate buttons against output pins and build the runtime mapping.
    pub fn button_map(&self) -> Result<ButtonMap, ConfigError> {
        let pins = &self.gpio.output_pins;
        for (i, pin) in pins.iter().enumerate() {
            if pins[..i].contains(pin) {
                return Err(ConfigError::DuplicateOutput(*pin));
            }
        }
        ButtonMap::new(&self.buttons, pins.len())
    }
}
