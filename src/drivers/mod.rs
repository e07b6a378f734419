//! Output drivers: GPIO pin backends and the indicator LED built on them.

pub mod gpio;
pub mod indicator;
