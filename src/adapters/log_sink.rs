//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the
//! `log` facade.  Presses go out at `info`; rejected and unrecognised
//! datagrams only at `debug`, since the decoder hears every fob in range.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { buttons } => {
                info!("START | buttons={} | all outputs off", buttons);
            }
            AppEvent::Pressed {
                command,
                resolution,
                outputs,
            } => {
                info!(
                    "PRESS | cmd={} | buttons={:?} | lit={:?}",
                    command,
                    resolution.codes(),
                    outputs.lit().collect::<Vec<_>>(),
                );
            }
            AppEvent::Unresolved { command } => {
                debug!("PRESS | cmd={} matched no button", command);
            }
            AppEvent::Rejected { reason } => {
                debug!("DROP  | {}", reason);
            }
            AppEvent::Stopped(stats) => {
                info!(
                    "STOP  | received={} pressed={} unresolved={} rejected={}",
                    stats.received, stats.pressed, stats.unresolved, stats.rejected,
                );
            }
        }
    }
}
