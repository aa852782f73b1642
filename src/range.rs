//! Position tokens (`N` or `N-M`) and their validation against a frame index.

use std::fmt;

use crate::error::{FrameError, Result};

/// Which position an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Source,
    Destination,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => f.write_str("source position"),
            Role::Destination => f.write_str("destination position"),
        }
    }
}

/// Distinct 1-indexed frame positions, sorted ascending.
///
/// Stored as merged inclusive runs, so a wide range costs nothing until it
/// is validated. A set carries no bound of its own; it must be validated
/// against the index of the document it addresses before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSet {
    runs: Vec<(usize, usize)>,
}

impl PositionSet {
    /// Parse `N` or the inclusive range `N-M`.
    pub fn parse(token: &str) -> Result<Self> {
        let Some((lo, hi)) = token.split_once('-') else {
            let pos = parse_number(token, token)?;
            return Ok(Self {
                runs: vec![(pos, pos)],
            });
        };
        if hi.contains('-') {
            return Err(FrameError::format(token, "expected N or N-M"));
        }

        let start = parse_number(token, lo)?;
        let end = parse_number(token, hi)?;
        if start > end {
            return Err(FrameError::format(
                token,
                format!("start ({start}) > end ({end})"),
            ));
        }
        Ok(Self {
            runs: vec![(start, end)],
        })
    }

    /// Build a set from arbitrary positions (sorted and deduplicated).
    pub fn from_positions(mut positions: Vec<usize>) -> Result<Self> {
        if positions.is_empty() {
            return Err(FrameError::format("", "no positions given"));
        }
        positions.sort_unstable();
        positions.dedup();

        let mut runs: Vec<(usize, usize)> = Vec::new();
        for pos in positions {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == pos => *end = pos,
                _ => runs.push((pos, pos)),
            }
        }
        Ok(Self { runs })
    }

    /// Fail with `OutOfRange` on the first position outside `[1, index_size]`.
    pub fn validate(&self, index_size: usize, role: Role) -> Result<()> {
        for &(start, end) in &self.runs {
            validate_position(start, index_size, role)?;
            if end > index_size {
                validate_position(index_size + 1, index_size, role)?;
            }
        }
        Ok(())
    }

    pub fn first(&self) -> usize {
        self.runs[0].0
    }

    pub fn last(&self) -> usize {
        self.runs[self.runs.len() - 1].1
    }

    /// Number of positions, saturating for ranges no document can hold.
    pub fn len(&self) -> usize {
        self.runs
            .iter()
            .fold(0usize, |n, &(start, end)| n.saturating_add(end - start).saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.runs
            .iter()
            .any(|&(start, end)| start <= position && position <= end)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.runs.iter().flat_map(|&(start, end)| start..=end)
    }

    pub fn is_contiguous(&self) -> bool {
        self.runs.len() == 1
    }

    /// `"3"` for a single position, `"3-5"` for several.
    pub fn label(&self) -> String {
        if self.first() != self.last() {
            format!("{}-{}", self.first(), self.last())
        } else {
            self.first().to_string()
        }
    }
}

/// Parse a single destination position; ranges are rejected.
pub fn parse_position(token: &str) -> Result<usize> {
    parse_number(token, token)
}

/// Fail with `OutOfRange` unless `1 <= position <= max`.
pub fn validate_position(position: usize, max: usize, role: Role) -> Result<()> {
    if position < 1 || position > max {
        return Err(FrameError::OutOfRange {
            role,
            value: position,
            min: 1,
            max,
        });
    }
    Ok(())
}

/// Digits only. A number too large for `usize` saturates, so it fails
/// validation as out of range rather than as malformed.
fn parse_number(token: &str, part: &str) -> Result<usize> {
    let digits = part.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FrameError::format(
            token,
            format!("{:?} is not a frame number", part),
        ));
    }
    Ok(digits.parse::<usize>().unwrap_or(usize::MAX))
}
