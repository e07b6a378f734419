//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the validated [`ButtonMap`] and the current
//! [`OutputState`].  It runs the per-datagram protocol and the blocking
//! event loop; all I/O flows through port traits injected at call sites.
//!
//! ```text
//!  DatagramSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                     │        AppService         │
//!    OutputPort ◀──── │  extract · cmd · resolve  │
//!                     └──────────────────────────┘
//! ```
//!
//! ## Per-datagram protocol
//!
//! 1. Extract the JSON fields and read `cmd`.
//! 2. Turn every output off (also when step 1 failed).
//! 3. Resolve `cmd` and light the output of each resolved button.
//!
//! A bad datagram therefore always leaves every output off, and nothing
//! stays lit from an earlier, unrelated event.

use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::error::{DatagramError, Error};
use crate::payload;
use crate::resolver::{ButtonMap, Resolution};

use super::events::{AppEvent, LoopStats};
use super::ports::{DatagramSource, EventSink, OutputPort};
use super::state::OutputState;

/// Largest datagram the decoder sends.
pub const MAX_DATAGRAM_LEN: usize = 1024;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    map: ButtonMap,
    outputs: OutputState,
    stats: LoopStats,
}

impl AppService {
    pub fn new(map: ButtonMap) -> Self {
        let outputs = OutputState::new(map.len());
        Self {
            map,
            outputs,
            stats: LoopStats::default(),
        }
    }

    /// Drive every output off and announce readiness.
    pub fn start(&mut self, hw: &mut impl OutputPort, sink: &mut impl EventSink) {
        self.reset_outputs(hw);
        sink.emit(&AppEvent::Started {
            buttons: self.map.len(),
        });
        info!("AppService started with {} buttons", self.map.len());
    }

    // ── Per-datagram processing ───────────────────────────────

    /// Process one raw datagram.
    ///
    /// Errors are recoverable: outputs have already been reset when one is
    /// returned.
    pub fn handle_datagram(
        &mut self,
        raw: &[u8],
        hw: &mut impl OutputPort,
        sink: &mut impl EventSink,
    ) -> Result<Resolution, DatagramError> {
        self.stats.received += 1;

        let command = match payload::extract(raw)
            .map_err(DatagramError::from)
            .and_then(|fields| payload::command(&fields))
        {
            Ok(command) => command,
            Err(e) => {
                self.reset_outputs(hw);
                self.stats.rejected += 1;
                sink.emit(&AppEvent::Rejected {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        self.reset_outputs(hw);

        let resolution = self.map.resolve(command);
        for code in resolution.codes() {
            if let Some(index) = self.map.output_of(code) {
                self.outputs.light(index);
                hw.set_output(index, true);
            }
        }

        if resolution.is_none() {
            self.stats.unresolved += 1;
            sink.emit(&AppEvent::Unresolved { command });
        } else {
            self.stats.pressed += 1;
            sink.emit(&AppEvent::Pressed {
                command,
                resolution,
                outputs: self.outputs.clone(),
            });
        }

        Ok(resolution)
    }

    /// Turn every output off.  Idempotent.
    pub fn reset_outputs(&mut self, hw: &mut impl OutputPort) {
        self.outputs.clear();
        hw.all_off();
    }

    // ── Event loop ────────────────────────────────────────────

    /// Receive and process datagrams until the source fails or `shutdown`
    /// is raised.
    ///
    /// The shutdown flag is checked when a zero-length datagram arrives
    /// (the wake-up sent by the signal handler), so datagrams queued ahead
    /// of it are still processed.  Outputs are reset on every exit path.
    pub fn run(
        &mut self,
        source: &mut impl DatagramSource,
        hw: &mut impl OutputPort,
        sink: &mut impl EventSink,
        shutdown: &AtomicBool,
    ) -> Result<(), Error> {
        let mut buf = [0u8; MAX_DATAGRAM_LEN];

        let result = loop {
            let len = match source.recv(&mut buf) {
                Ok(len) => len,
                Err(e) => break Err(Error::Socket(e)),
            };

            if len == 0 && shutdown.load(Ordering::SeqCst) {
                info!("Shutdown requested, leaving event loop");
                break Ok(());
            }

            // Per-datagram errors were reported through the sink.
            let _ = self.handle_datagram(&buf[..len], hw, sink);
        };

        self.reset_outputs(hw);
        sink.emit(&AppEvent::Stopped(self.stats));
        result
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn outputs(&self) -> &OutputState {
        &self.outputs
    }

    pub fn button_map(&self) -> &ButtonMap {
        &self.map
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }
}
