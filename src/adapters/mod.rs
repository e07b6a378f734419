//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to                     |
//! |------------|------------------|---------------------------------|
//! | `udp`      | DatagramSource   | UDP socket fed by `rtl_433`     |
//! | `hardware` | OutputPort       | Indicator LEDs (sysfs or sim)   |
//! | `log_sink` | EventSink        | `log` facade                    |
//! | `decoder`  | (none)           | `rtl_433` child process         |

pub mod decoder;
pub mod hardware;
pub mod log_sink;
pub mod udp;
