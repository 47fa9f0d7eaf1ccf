//! Board-file parser.
//!
//! A puzzle file starts with a header line `N upper_bound`, followed by N
//! rows of N characters each: `'1'` marks a target square, `'3'` the
//! knight's starting square (exactly one per file), anything else is empty.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::board::Coord;

/// Largest accepted board side. Coordinates travel as one byte per axis on
/// the wire.
pub const MAX_BOARD_SIZE: usize = u8::MAX as usize;

/// Largest accepted move budget. Step counts travel as u16 on the wire.
pub const MAX_UPPER_BOUND: usize = u16::MAX as usize;

/// Parse error with location information
#[derive(Debug, Clone)]
pub struct ParseError {
    pub line_number: usize,
    pub message: String,
    pub line_content: String,
}

impl ParseError {
    pub fn new(
        line_number: usize,
        message: impl Into<String>,
        line_content: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            message: message.into(),
            line_content: line_content.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {}\n  | {}",
            self.line_number, self.message, self.line_content
        )
    }
}

impl std::error::Error for ParseError {}

/// A parsed puzzle instance: the board, the knight, and the squares it
/// must visit within `upper_bound` moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub board_size: u8,
    pub upper_bound: u32,
    pub knight: Coord,
    pub targets: BTreeSet<Coord>,
}

impl Puzzle {
    /// Whether `coord` was a target in the starting setup. Drives the `*`
    /// marking in solution output.
    pub fn is_original_target(&self, coord: Coord) -> bool {
        self.targets.contains(&coord)
    }
}

/// Parse a puzzle from a file on disk.
pub fn parse_file(path: &Path) -> Result<Puzzle, ParseError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ParseError::new(0, format!("cannot read {}: {}", path.display(), e), ""))?;
    parse_str(&contents)
}

/// Parse a puzzle from its textual form.
pub fn parse_str(input: &str) -> Result<Puzzle, ParseError> {
    let mut lines = input.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| ParseError::new(1, "missing header line", ""))?;
    let (board_size, upper_bound) = parse_header(header)?;

    let mut knight: Option<Coord> = None;
    let mut targets = BTreeSet::new();

    for row in 0..board_size {
        let (idx, line) = lines.next().ok_or_else(|| {
            ParseError::new(
                row as usize + 2,
                format!("expected {} board rows, found {}", board_size, row),
                "",
            )
        })?;
        let line_number = idx + 1;

        let cells: Vec<char> = line.chars().collect();
        if cells.len() != board_size as usize {
            return Err(ParseError::new(
                line_number,
                format!("row has {} cells, expected {}", cells.len(), board_size),
                line,
            ));
        }

        for (col, cell) in cells.iter().enumerate() {
            let coord = Coord::new(row, col as u8);
            match cell {
                '1' => {
                    targets.insert(coord);
                }
                '3' => {
                    if knight.is_some() {
                        return Err(ParseError::new(
                            line_number,
                            "more than one knight square ('3') in file",
                            line,
                        ));
                    }
                    knight = Some(coord);
                }
                _ => {}
            }
        }
    }

    let knight = knight.ok_or_else(|| ParseError::new(1, "no knight square ('3') in file", ""))?;

    // The knight's starting square counts as visited.
    targets.remove(&knight);

    Ok(Puzzle {
        board_size,
        upper_bound,
        knight,
        targets,
    })
}

fn parse_header(line: &str) -> Result<(u8, u32), ParseError> {
    let mut fields = line.split_whitespace();

    let board_size: usize = fields
        .next()
        .ok_or_else(|| ParseError::new(1, "empty header, expected 'N upper_bound'", line))?
        .parse()
        .map_err(|e| ParseError::new(1, format!("invalid board size: {}", e), line))?;
    let upper_bound: usize = fields
        .next()
        .ok_or_else(|| ParseError::new(1, "header is missing the upper bound", line))?
        .parse()
        .map_err(|e| ParseError::new(1, format!("invalid upper bound: {}", e), line))?;

    if fields.next().is_some() {
        return Err(ParseError::new(1, "trailing fields in header", line));
    }
    if board_size == 0 || board_size > MAX_BOARD_SIZE {
        return Err(ParseError::new(
            1,
            format!("board size must be in 1..={}", MAX_BOARD_SIZE),
            line,
        ));
    }
    if upper_bound > MAX_UPPER_BOUND {
        return Err(ParseError::new(
            1,
            format!("upper bound must be at most {}", MAX_UPPER_BOUND),
            line,
        ));
    }

    Ok((board_size as u8, upper_bound as u32))
}
