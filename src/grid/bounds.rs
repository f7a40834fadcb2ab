use crate::error::Error;
use crate::error::Result;
use serde::Deserialize;
use serde::Serialize;

/// Inclusive numeric interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    lo: f64,
    hi: f64,
}

impl Bounds {
    /// Rejects non-finite endpoints and reversed intervals.
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(Error::configuration(format!(
                "bounds must be finite, got [{}, {}]",
                lo, hi
            )));
        }
        if lo > hi {
            return Err(Error::configuration(format!(
                "lower bound {} exceeds upper bound {}",
                lo, hi
            )));
        }
        Ok(Self { lo, hi })
    }
    /// Degenerate interval containing a single value.
    pub fn point(x: f64) -> Result<Self> {
        Self::new(x, x)
    }
    pub fn lo(&self) -> f64 {
        self.lo
    }
    pub fn hi(&self) -> f64 {
        self.hi
    }
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = Error;
    fn try_from((lo, hi): (f64, f64)) -> Result<Self> {
        Self::new(lo, hi)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_bounds_rejected() {
        assert!(matches!(
            Bounds::new(2.0, 1.0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn nan_bounds_rejected() {
        assert!(Bounds::new(f64::NAN, 1.0).is_err());
        assert!(Bounds::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn inclusive_containment() {
        let b = Bounds::new(3.5, 4.0).unwrap();
        assert!(b.contains(3.5));
        assert!(b.contains(4.0));
        assert!(!b.contains(4.0000001));
    }
}
