//! Unified error types for the keyfob-lights daemon.
//!
//! Two families live here:
//!
//! - **Per-datagram** errors ([`ParseError`], [`DatagramError`]) are
//!   recoverable.  The event loop resets every output and keeps listening.
//! - **Startup / resource** errors ([`ConfigError`], [`GpioError`], and the
//!   I/O side of [`Error`]) are fatal and surface to the operator.

use core::fmt;
use std::io;

use crate::resolver::ButtonCode;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fatal failure funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// An output pin could not be acquired or released.
    Gpio(GpioError),
    /// The UDP socket failed (bind or receive).
    Socket(io::Error),
    /// The decoder subprocess could not be launched.
    Decoder(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Socket(e) => write!(f, "socket: {e}"),
            Self::Decoder(e) => write!(f, "decoder: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Gpio(e) => Some(e),
            Self::Socket(e) | Self::Decoder(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    /// No buttons configured.
    NoButtons,
    /// More buttons than the fixed capacity allows.
    TooManyButtons { count: usize, max: usize },
    /// Button list and output-pin list differ in length.
    LengthMismatch { buttons: usize, outputs: usize },
    /// The same button code appears twice.
    DuplicateButton(ButtonCode),
    /// The same output pin appears twice.
    DuplicateOutput(u32),
    /// A two-button sum equals a single configured code.
    SumShadowsButton { a: ButtonCode, b: ButtonCode, sum: ButtonCode },
    /// Two different button pairs produce the same sum.
    AmbiguousSum { sum: ButtonCode },
    /// Config file could not be read.
    Read(io::Error),
    /// Config file is not valid JSON for [`SystemConfig`](crate::config::SystemConfig).
    Syntax(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoButtons => write!(f, "no buttons configured"),
            Self::TooManyButtons { count, max } => {
                write!(f, "{count} buttons configured, at most {max} supported")
            }
            Self::LengthMismatch { buttons, outputs } => {
                write!(f, "{buttons} buttons but {outputs} output pins")
            }
            Self::DuplicateButton(code) => write!(f, "button code {code} listed twice"),
            Self::DuplicateOutput(pin) => write!(f, "output pin {pin} listed twice"),
            Self::SumShadowsButton { a, b, sum } => {
                write!(f, "{a} + {b} = {sum} collides with a button code")
            }
            Self::AmbiguousSum { sum } => {
                write!(f, "two different button pairs both sum to {sum}")
            }
            Self::Read(e) => write!(f, "cannot read config file: {e}"),
            Self::Syntax(e) => write!(f, "invalid config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Syntax(e) => Some(e),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

/// Sysfs GPIO access failure, tagged with the pin it concerns.
#[derive(Debug)]
pub struct GpioError {
    pub pin: u32,
    pub op: &'static str,
    pub source: io::Error,
}

impl GpioError {
    pub fn new(pin: u32, op: &'static str, source: io::Error) -> Self {
        Self { pin, op, source }
    }
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO {} {} failed: {}", self.pin, self.op, self.source)
    }
}

impl std::error::Error for GpioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

// ---------------------------------------------------------------------------
// Per-datagram errors
// ---------------------------------------------------------------------------

/// The datagram text could not be turned into a JSON object.
#[derive(Debug)]
pub enum ParseError {
    /// Bytes are not valid UTF-8.
    Encoding(core::str::Utf8Error),
    /// Payload is not valid JSON.
    Json(serde_json::Error),
    /// Payload is valid JSON but not an object.
    NotAnObject,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding(e) => write!(f, "payload is not text: {e}"),
            Self::Json(e) => write!(f, "payload is not JSON: {e}"),
            Self::NotAnObject => write!(f, "payload is not a JSON object"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::NotAnObject => None,
        }
    }
}

/// Why a single datagram was rejected.  Always recoverable.
#[derive(Debug)]
pub enum DatagramError {
    Parse(ParseError),
    /// The object has no `cmd` key.
    MissingCommand,
    /// `cmd` is present but not an integer.
    InvalidCommand,
}

impl fmt::Display for DatagramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::MissingCommand => write!(f, "no `cmd` field"),
            Self::InvalidCommand => write!(f, "`cmd` is not an integer"),
        }
    }
}

impl std::error::Error for DatagramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for DatagramError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias for fatal errors.
pub type Result<T> = core::result::Result<T, Error>;
