//! keyfob-lights library.
//!
//! Turns `rtl_433` key-fob events into lit indicator LEDs.  Exposes the
//! pure-logic modules for integration testing; the binary in `main.rs`
//! only wires adapters together.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod payload;
pub mod resolver;

pub mod adapters;
pub mod drivers;
pub mod pins;
