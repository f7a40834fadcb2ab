use crate::Frequency;
use crate::error::Error;
use serde::Deserialize;
use serde::Serialize;

/// Joint encoding of harmonic degree `l` and azimuthal order `m`.
///
/// The store's lookup table enumerates (l, m) pairs degree by degree with
/// m ascending, so the code is `l² + l + m`: 0 is radial, 1..=3 dipole,
/// 4..=8 quadrupole, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModeType(i16);

impl ModeType {
    pub fn new(l: u8, m: i8) -> Result<Self, Error> {
        if m.unsigned_abs() > l {
            return Err(Error::configuration(format!(
                "azimuthal order m={} out of range for degree l={}",
                m, l
            )));
        }
        let l = l as i16;
        l.checked_mul(l)
            .and_then(|x| x.checked_add(l))
            .and_then(|x| x.checked_add(m as i16))
            .map(Self)
            .ok_or_else(|| Error::configuration(format!("degree l={} has no mode type code", l)))
    }
    /// Harmonic degree.
    pub fn l(&self) -> u8 {
        (self.0 as f64).sqrt().floor() as u8
    }
    /// Azimuthal order.
    pub fn m(&self) -> i8 {
        let l = self.l() as i16;
        (self.0 - l * l - l) as i8
    }
}

impl TryFrom<i16> for ModeType {
    type Error = Error;
    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            c if c < 0 => Err(Error::configuration(format!("negative mode type {}", c))),
            c => Ok(Self(c)),
        }
    }
}
impl From<ModeType> for i16 {
    fn from(t: ModeType) -> Self {
        t.0
    }
}

impl std::fmt::Display for ModeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(l={}, m={})", self.l(), self.m())
    }
}

/// One computed pulsation mode of a (model, rotation rate) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// Radial order; negative for g modes.
    pub n: i16,
    pub kind: ModeType,
    /// Cycles per day.
    pub freq: Frequency,
}
