//! KaniSource - Symbolic values for proof harnesses

use super::{check_range, ValueSource};
use crate::domain::error::BankerError;
use crate::domain::resources::Units;

/// Every call yields a fresh symbolic value constrained to the range
#[derive(Debug, Clone, Copy, Default)]
pub struct KaniSource;

impl ValueSource for KaniSource {
    fn choose_int(&mut self, low: Units, high: Units) -> Result<Units, BankerError> {
        check_range(low, high)?;
        let value: Units = kani::any();
        kani::assume(value >= low && value <= high);
        Ok(value)
    }
}
