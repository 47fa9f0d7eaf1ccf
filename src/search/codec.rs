//! Compact byte encoding of search states for the wire.
//!
//! Layout: `steps` as big-endian u16, then the move history and the
//! remaining-target list, each as a u16 element count followed by one
//! `(row, col)` byte pair per coordinate. For the board sizes the parser
//! admits this stays well inside the payload budget.

use std::collections::BTreeSet;
use std::fmt;

use crate::board::Coord;
use crate::search::state::SearchState;

/// Codec failure. Every variant is fatal by contract: an oversize state
/// means the payload budget was misconfigured for the board, and a
/// malformed payload means a protocol bug, not recoverable input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Encoded form would exceed the configured payload budget.
    Oversize { needed: usize, max: usize },
    /// Step count does not fit the u16 wire field.
    StepsOutOfRange(u32),
    /// Payload ended before the advertised contents.
    Truncated,
    /// Payload has bytes past the advertised contents.
    TrailingBytes(usize),
    /// History must hold at least the starting square.
    EmptyHistory,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Oversize { needed, max } => {
                write!(f, "encoded state needs {} bytes, budget is {}", needed, max)
            }
            CodecError::StepsOutOfRange(steps) => {
                write!(f, "step count {} does not fit the wire format", steps)
            }
            CodecError::Truncated => write!(f, "payload is truncated"),
            CodecError::TrailingBytes(n) => write!(f, "payload has {} trailing bytes", n),
            CodecError::EmptyHistory => write!(f, "payload carries an empty move history"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Encode `state` into at most `max_payload` bytes.
pub fn encode(state: &SearchState, max_payload: usize) -> Result<Vec<u8>, CodecError> {
    let steps: u16 = state
        .steps()
        .try_into()
        .map_err(|_| CodecError::StepsOutOfRange(state.steps()))?;

    let needed = 6 + 2 * state.history().len() + 2 * state.remaining().len();
    if needed > max_payload {
        return Err(CodecError::Oversize {
            needed,
            max: max_payload,
        });
    }

    let mut buf = Vec::with_capacity(needed);
    buf.extend_from_slice(&steps.to_be_bytes());
    push_coords(&mut buf, state.history().iter());
    push_coords(&mut buf, state.remaining().iter());
    Ok(buf)
}

/// Decode a payload produced by [`encode`]. Round-trips exactly:
/// `decode(&encode(s, max)?) == s`.
pub fn decode(payload: &[u8]) -> Result<SearchState, CodecError> {
    let mut cursor = Cursor::new(payload);

    let steps = cursor.take_u16()? as u32;

    let history_len = cursor.take_u16()? as usize;
    if history_len == 0 {
        return Err(CodecError::EmptyHistory);
    }
    let mut history = Vec::with_capacity(history_len);
    for _ in 0..history_len {
        history.push(cursor.take_coord()?);
    }

    let remaining_len = cursor.take_u16()? as usize;
    let mut remaining = BTreeSet::new();
    for _ in 0..remaining_len {
        remaining.insert(cursor.take_coord()?);
    }

    cursor.finish()?;
    Ok(SearchState::from_parts(history, remaining, steps))
}

fn push_coords<'a>(buf: &mut Vec<u8>, coords: impl ExactSizeIterator<Item = &'a Coord>) {
    buf.extend_from_slice(&(coords.len() as u16).to_be_bytes());
    for coord in coords {
        buf.push(coord.row);
        buf.push(coord.col);
    }
}

struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self { rest: payload }
    }

    fn take_u16(&mut self) -> Result<u16, CodecError> {
        let (head, rest) = self
            .rest
            .split_first_chunk::<2>()
            .ok_or(CodecError::Truncated)?;
        self.rest = rest;
        Ok(u16::from_be_bytes(*head))
    }

    fn take_coord(&mut self) -> Result<Coord, CodecError> {
        let (head, rest) = self
            .rest
            .split_first_chunk::<2>()
            .ok_or(CodecError::Truncated)?;
        self.rest = rest;
        Ok(Coord::new(head[0], head[1]))
    }

    fn finish(self) -> Result<(), CodecError> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes(self.rest.len()))
        }
    }
}
