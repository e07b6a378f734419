//! Datagram payload extraction.
//!
//! `rtl_433 -F syslog:<host>:<port>` wraps every decoded event in an
//! RFC 5424 envelope:
//!
//! ```text
//! <PRI>VER TIMESTAMP HOSTNAME APP-NAME PROCID MSGID SD MSG
//! ```
//!
//! The JSON event is `MSG`, the eighth whitespace-separated field.  The
//! decoder may also be pointed at us with raw JSON output, so a datagram
//! that does not start with `<` is taken as the payload verbatim.

use serde_json::{Map, Value};

use crate::error::{DatagramError, ParseError};
use crate::resolver::ButtonCode;

/// Parsed JSON fields of one event.
pub type Fields = Map<String, Value>;

/// Key holding the button command value.
pub const COMMAND_KEY: &str = "cmd";

/// Number of envelope fields before `MSG`.
const SYSLOG_HEADER_FIELDS: usize = 7;

const BOM: char = '\u{feff}';

/// Strip optional syslog framing from `raw` and parse the payload as a
/// JSON object.
pub fn extract(raw: &[u8]) -> Result<Fields, ParseError> {
    let text = core::str::from_utf8(raw).map_err(ParseError::Encoding)?;

    let payload = if text.starts_with('<') {
        syslog_message(text)
    } else {
        text
    };
    let payload = payload.strip_prefix(BOM).unwrap_or(payload);

    match serde_json::from_str::<Value>(payload).map_err(ParseError::Json)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(ParseError::NotAnObject),
    }
}

/// Read the integer `cmd` field.
pub fn command(fields: &Fields) -> Result<ButtonCode, DatagramError> {
    fields
        .get(COMMAND_KEY)
        .ok_or(DatagramError::MissingCommand)?
        .as_i64()
        .ok_or(DatagramError::InvalidCommand)
}

/// Last of at most eight whitespace-separated fields of `line`.
///
/// Whitespace runs count as one separator.  The eighth field keeps any
/// interior whitespace; with fewer fields the last token is returned.
fn syslog_message(line: &str) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..SYSLOG_HEADER_FIELDS {
        let Some(end) = rest.find(char::is_whitespace) else {
            break;
        };
        let next = rest[end..].trim_start();
        if next.is_empty() {
            return &rest[..end];
        }
        rest = next;
    }
    rest
}
