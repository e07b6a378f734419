//! Application core: pure domain logic, zero I/O.
//!
//! Payload decoding and button resolution live in [`crate::payload`] and
//! [`crate::resolver`]; this module wires them into the per-datagram
//! protocol.  All interaction with sockets and pins happens through
//! **port traits** defined in [`ports`].

pub mod events;
pub mod ports;
pub mod service;
pub mod state;
