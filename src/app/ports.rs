//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   DatagramSource ──▶ AppService ──▶ OutputPort
//!                          │
//!                          └────────▶ EventSink
//! ```
//!
//! Adapters (UDP socket, GPIO hardware, logger) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via
//! generics, so the decoding core never touches a socket or a pin directly.

use std::io;

// ───────────────────────────────────────────────────────────────
// Datagram source (driving adapter: network → domain)
// ───────────────────────────────────────────────────────────────

/// Blocking source of decoder datagrams.
pub trait DatagramSource {
    /// Block until the next datagram arrives and copy it into `buf`.
    /// Returns the datagram length; longer datagrams are truncated.
    ///
    /// An error here is fatal to the event loop.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → indicator LEDs)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to switch indicator outputs.
pub trait OutputPort {
    /// Number of outputs, equal to the number of configured buttons.
    fn output_count(&self) -> usize;

    /// Switch output `index` on or off.  Out-of-range indices are ignored.
    fn set_output(&mut self, index: usize, on: bool);

    /// Switch every output off.  Safe to call repeatedly.
    fn all_off(&mut self) {
        for index in 0..self.output_count() {
            self.set_output(index, false);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
