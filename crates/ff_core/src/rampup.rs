//! `RampUp` — a validated `[0.0, 100.0]` percentage (spec.md §3).

use crate::errors::CoreError;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct RampUp(f64);

impl RampUp {
    pub const FULL: RampUp = RampUp(100.0);
    pub const ZERO: RampUp = RampUp(0.0);

    pub fn new(value: f64) -> Result<Self, CoreError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidRampUp)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for RampUp {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<f64> for RampUp {
    type Error = CoreError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RampUp> for f64 {
    fn from(r: RampUp) -> Self {
        r.0
    }
}

impl PartialEq for RampUp {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for RampUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_values() {
        assert!(RampUp::new(0.0).is_ok());
        assert!(RampUp::new(100.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(RampUp::new(-0.01).unwrap_err(), CoreError::InvalidRampUp);
        assert_eq!(RampUp::new(100.01).unwrap_err(), CoreError::InvalidRampUp);
        assert_eq!(RampUp::new(f64::NAN).unwrap_err(), CoreError::InvalidRampUp);
    }

    #[test]
    fn default_is_full() {
        assert_eq!(RampUp::default().value(), 100.0);
    }
}
