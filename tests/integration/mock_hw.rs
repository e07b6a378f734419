//! Mock adapters for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching real GPIO.

use std::collections::VecDeque;
use std::io;

use keyfob_lights::app::events::AppEvent;
use keyfob_lights::app::ports::{DatagramSource, EventSink, OutputPort};

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCall {
    pub index: usize,
    pub on: bool,
}

// ── MockOutputs ───────────────────────────────────────────────

pub struct MockOutputs {
    pub levels: Vec<bool>,
    pub calls: Vec<OutputCall>,
}

#[allow(dead_code)]
impl MockOutputs {
    pub fn new(count: usize) -> Self {
        Self {
            levels: vec![false; count],
            calls: Vec::new(),
        }
    }

    pub fn lit(&self) -> Vec<usize> {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect()
    }
}

impl OutputPort for MockOutputs {
    fn output_count(&self) -> usize {
        self.levels.len()
    }

    fn set_output(&mut self, index: usize, on: bool) {
        self.calls.push(OutputCall { index, on });
        if let Some(level) = self.levels.get_mut(index) {
            *level = on;
        }
    }
}

// ── ScriptedSource ────────────────────────────────────────────

/// Replays queued datagrams, then fails like a closed socket.
pub struct ScriptedSource {
    queue: VecDeque<Vec<u8>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new<I, D>(datagrams: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[u8]>,
    {
        Self {
            queue: datagrams.into_iter().map(|d| d.as_ref().to_vec()).collect(),
        }
    }
}

impl DatagramSource for ScriptedSource {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.queue.pop_front() {
            Some(d) => {
                let n = d.len().min(buf.len());
                buf[..n].copy_from_slice(&d[..n]);
                Ok(n)
            }
            None => Err(io::Error::new(
                io::ErrorKind::ConnectionAborted,
                "script exhausted",
            )),
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
