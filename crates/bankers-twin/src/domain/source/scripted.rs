//! ScriptedSource - Replays a fixed list of values

use super::{check_range, ValueSource};
use crate::domain::error::BankerError;
use crate::domain::resources::Units;

/// Source backed by a literal vector
///
/// Values are handed out in order. A value outside the requested range is
/// reported, not clamped, so a script that drifts from the scenario's draw
/// order fails loudly.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<Units>,
    position: usize,
}

impl ScriptedSource {
    /// Script from any sequence of values
    pub fn new(values: impl IntoIterator<Item = Units>) -> Self {
        Self {
            values: values.into_iter().collect(),
            position: 0,
        }
    }

    /// Values consumed so far
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Values not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }
}

impl ValueSource for ScriptedSource {
    fn choose_int(&mut self, low: Units, high: Units) -> Result<Units, BankerError> {
        check_range(low, high)?;

        let value = *self
            .values
            .get(self.position)
            .ok_or(BankerError::SourceExhausted {
                consumed: self.position,
            })?;

        if !(low..=high).contains(&value) {
            return Err(BankerError::ValueOutOfRange { value, low, high });
        }

        self.position += 1;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut source = ScriptedSource::new([2, 0, 3]);
        assert_eq!(source.choose_int(0, 3).unwrap(), 2);
        assert_eq!(source.choose_int(0, 0).unwrap(), 0);
        assert_eq!(source.choose_int(1, 3).unwrap(), 3);
        assert_eq!(source.consumed(), 3);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let mut source = ScriptedSource::new([1]);
        source.choose_int(0, 1).unwrap();
        assert_eq!(
            source.choose_int(0, 1),
            Err(BankerError::SourceExhausted { consumed: 1 })
        );
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let mut source = ScriptedSource::new([5]);
        assert_eq!(
            source.choose_int(0, 3),
            Err(BankerError::ValueOutOfRange { value: 5, low: 0, high: 3 })
        );
        // Rejected value is not consumed
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn test_empty_range_is_configuration_error() {
        let mut source = ScriptedSource::new([0]);
        assert_eq!(
            source.choose_int(2, 1),
            Err(BankerError::InvalidRange { low: 2, high: 1 })
        );
    }
}
