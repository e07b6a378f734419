//! Button-combination resolution.
//!
//! A key fob reports one integer per event.  Pressing a single button sends
//! that button's code; pressing two at once sends the sum of both codes.
//! [`resolve`] decomposes the value back into the pressed buttons.
//!
//! ## Resolution order
//!
//! 1. Exact match against a configured code wins.
//! 2. Otherwise the first `b` (list order) for which `command - b` is a
//!    configured code yields the pair `(command - b, b)`.  When that code
//!    is `b` itself the set collapses to the single button `b`.
//! 3. Otherwise nothing was recognised.
//!
//! [`ButtonMap`] is the startup-validated mapping from codes to output
//! indices.  Its constructor rejects any configuration where step 2 could
//! be ambiguous, so at runtime list order only matters for determinism.

use heapless::Vec;

use crate::error::ConfigError;

/// Integer code identifying one logical button.
pub type ButtonCode = i64;

/// Maximum number of configured buttons (and outputs).
pub const MAX_BUTTONS: usize = 8;

/// Outcome of decoding one command value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No single code or pair sum matched.
    None,
    /// One button pressed.
    Single(ButtonCode),
    /// Two buttons pressed together, as `(command - b, b)`.
    Pair(ButtonCode, ButtonCode),
}

impl Resolution {
    /// The resolved codes (zero, one, or two of them).
    pub fn codes(&self) -> Vec<ButtonCode, 2> {
        let mut out = Vec::new();
        match *self {
            Self::None => {}
            Self::Single(code) => {
                let _ = out.push(code);
            }
            Self::Pair(a, b) => {
                let _ = out.push(a);
                let _ = out.push(b);
            }
        }
        out
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Decompose `command` against `buttons`.
pub fn resolve(command: ButtonCode, buttons: &[ButtonCode]) -> Resolution {
    if buttons.contains(&command) {
        return Resolution::Single(command);
    }

    for &b in buttons {
        let Some(diff) = command.checked_sub(b) else {
            continue;
        };
        if diff == b {
            return Resolution::Single(b);
        }
        if buttons.contains(&diff) {
            return Resolution::Pair(diff, b);
        }
    }

    Resolution::None
}

// ───────────────────────────────────────────────────────────────
// ButtonMap
// ───────────────────────────────────────────────────────────────

/// Validated, immutable button-code → output-index mapping.
///
/// Button at position `i` drives output `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMap {
    codes: Vec<ButtonCode, MAX_BUTTONS>,
}

impl ButtonMap {
    /// Build the map from `codes`, paired positionally with `output_count`
    /// outputs.
    ///
    /// Fails if the lists differ in length, a code repeats, or any
    /// combination could decode to more than one answer.
    pub fn new(codes: &[ButtonCode], output_count: usize) -> Result<Self, ConfigError> {
        if codes.is_empty() {
            return Err(ConfigError::NoButtons);
        }
        if codes.len() > MAX_BUTTONS {
            return Err(ConfigError::TooManyButtons {
                count: codes.len(),
                max: MAX_BUTTONS,
            });
        }
        if codes.len() != output_count {
            return Err(ConfigError::LengthMismatch {
                buttons: codes.len(),
                outputs: output_count,
            });
        }

        for (i, code) in codes.iter().enumerate() {
            if codes[..i].contains(code) {
                return Err(ConfigError::DuplicateButton(*code));
            }
        }

        // Every pair sum (doubled codes included) must be unique and must
        // not be a code.
        let mut sums: std::vec::Vec<ButtonCode> = std::vec::Vec::new();
        for (i, &a) in codes.iter().enumerate() {
            for &b in &codes[i..] {
                let Some(sum) = a.checked_add(b) else {
                    // No i64 command can carry this sum.
                    continue;
                };
                if codes.contains(&sum) {
                    return Err(ConfigError::SumShadowsButton { a, b, sum });
                }
                if sums.contains(&sum) {
                    return Err(ConfigError::AmbiguousSum { sum });
                }
                sums.push(sum);
            }
        }

        let mut stored = Vec::new();
        stored
            .extend_from_slice(codes)
            .map_err(|()| ConfigError::TooManyButtons {
                count: codes.len(),
                max: MAX_BUTTONS,
            })?;
        Ok(Self { codes: stored })
    }

    /// Configured codes in output order.
    pub fn codes(&self) -> &[ButtonCode] {
        &self.codes
    }

    /// Number of buttons (equal to the number of outputs).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Output index driven by `code`, if it is configured.
    pub fn output_of(&self, code: ButtonCode) -> Option<usize> {
        self.codes.iter().position(|&c| c == code)
    }

    /// Decompose `command` against this map.
    pub fn resolve(&self, command: ButtonCode) -> Resolution {
        resolve(command, &self.codes)
    }
}
