//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::resolver::{ButtonCode, Resolution};

use super::state::OutputState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service is ready; all outputs are off.
    Started { buttons: usize },

    /// A command resolved to one or two buttons and their outputs are lit.
    Pressed {
        command: ButtonCode,
        resolution: Resolution,
        outputs: OutputState,
    },

    /// A well-formed command matched no button or pair.
    Unresolved { command: ButtonCode },

    /// A datagram was malformed or had no usable `cmd`.
    Rejected { reason: String },

    /// The event loop exited; carries totals for the run.
    Stopped(LoopStats),
}

/// Per-run datagram counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub received: u64,
    pub pressed: u64,
    pub unresolved: u64,
    pub rejected: u64,
}
