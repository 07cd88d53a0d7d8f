//! ExhaustiveSource - Enumerates every choice path
//!
//! # Algorithm
//!
//! The source keeps a stack of choice points, one per `choose_int` call on
//! the current path:
//!
//! ```text
//! choices   [ (lo,hi,v0), (lo,hi,v1), ..., (lo,hi,vk) ]
//! cursor    index of the next call on the current run
//! ```
//!
//! A run replays recorded values while `cursor < choices.len()` and pushes a
//! fresh choice point (at `low`) past that. [`advance`](ExhaustiveSource::advance)
//! then steps the path like an odometer: pop every exhausted trailing choice
//! (`v == hi`), increment the last remaining one, and rewind the cursor.
//! When the stack empties, every path has been visited.
//!
//! The driver must be deterministic: the same prefix of values must lead to
//! the same sequence of `(low, high)` ranges.

use super::{check_range, ValueSource};
use crate::domain::error::BankerError;
use crate::domain::resources::Units;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChoicePoint {
    low: Units,
    high: Units,
    value: Units,
}

/// Depth-first enumeration of all value paths
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSource {
    choices: Vec<ChoicePoint>,
    cursor: usize,
    paths: usize,
    exhausted: bool,
}

impl ExhaustiveSource {
    /// Fresh source positioned at the all-`low` path
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next path
    ///
    /// Returns `false` once every path has been produced.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }

        self.paths += 1;
        self.choices.truncate(self.cursor);
        self.cursor = 0;

        while let Some(last) = self.choices.last_mut() {
            if last.value < last.high {
                last.value += 1;
                return true;
            }
            self.choices.pop();
        }

        self.exhausted = true;
        false
    }

    /// Number of completed paths (calls to `advance`)
    pub fn paths_completed(&self) -> usize {
        self.paths
    }

    /// True once `advance` has returned `false`
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Depth of the current path
    pub fn depth(&self) -> usize {
        self.choices.len()
    }
}

impl ValueSource for ExhaustiveSource {
    fn choose_int(&mut self, low: Units, high: Units) -> Result<Units, BankerError> {
        check_range(low, high)?;

        if let Some(point) = self.choices.get(self.cursor) {
            if point.low == low && point.high == high {
                self.cursor += 1;
                return Ok(point.value);
            }
            // Diverged from the recorded path; drop the stale suffix
            tracing::trace!(cursor = self.cursor, "choice path diverged");
            self.choices.truncate(self.cursor);
        }

        self.choices.push(ChoicePoint {
            low,
            high,
            value: low,
        });
        self.cursor += 1;
        Ok(low)
    }
}
