//! GPIO pin assignments for the Raspberry Pi indicator board.
//!
//! Default wiring only; the running daemon takes its pins from
//! [`GpioConfig`](crate::config::GpioConfig).  Numbers are BCM, not header
//! positions.

// ---------------------------------------------------------------------------
// Indicator LEDs (active HIGH, one per key-fob button A-D)
// ---------------------------------------------------------------------------

pub const LED_A_GPIO: u32 = 18;
pub const LED_B_GPIO: u32 = 23;
pub const LED_C_GPIO: u32 = 24;
pub const LED_D_GPIO: u32 = 25;

/// Indicator pins in button order.
pub const INDICATOR_GPIOS: [u32; 4] = [LED_A_GPIO, LED_B_GPIO, LED_C_GPIO, LED_D_GPIO];

// ---------------------------------------------------------------------------
// Sysfs interface
// ---------------------------------------------------------------------------

pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";
