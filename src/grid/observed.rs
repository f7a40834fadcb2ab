use super::*;
use crate::Frequency;
use crate::error::Error;
use serde::Deserialize;
use serde::Serialize;

const SECONDS_PER_DAY: f64 = 86400.;

/// Frequency unit of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Cycles per day; the grid's native unit.
    #[default]
    PerDay,
    Hertz,
    MicroHertz,
}

impl Unit {
    /// Multiplier taking a value in this unit to cycles per day.
    pub fn per_day(&self) -> f64 {
        match self {
            Self::PerDay => 1.,
            Self::Hertz => SECONDS_PER_DAY,
            Self::MicroHertz => SECONDS_PER_DAY * 1e-6,
        }
    }
}

impl TryFrom<&str> for Unit {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "cd" | "c/d" | "1/d" | "d-1" => Ok(Self::PerDay),
            "Hz" | "hz" => Ok(Self::Hertz),
            "uHz" | "muHz" | "microHz" => Ok(Self::MicroHertz),
            _ => Err(Error::configuration(format!("unknown frequency unit \"{}\"", s))),
        }
    }
}

/// A frequency measured on a real star.
///
/// Only the frequency is required; identification is optional and, when
/// present, constrains which theoretical modes may be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObservedMode {
    pub freq: Frequency,
    pub unit: Unit,
    /// Identified (l, m), if any.
    pub kind: Option<ModeType>,
    /// Identified radial order, if any.
    pub n: Option<i16>,
    /// Known pressure mode: positive radial order.
    pub p_mode: bool,
    /// Known gravity mode: negative radial order.
    pub g_mode: bool,
}

impl ObservedMode {
    pub fn new(freq: Frequency, unit: Unit) -> Self {
        Self {
            freq,
            unit,
            ..Self::default()
        }
    }
    pub fn identified(self, kind: ModeType) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }
    pub fn ordered(self, n: i16) -> Self {
        Self { n: Some(n), ..self }
    }
    pub fn pressure(self) -> Self {
        Self { p_mode: true, ..self }
    }
    pub fn gravity(self) -> Self {
        Self { g_mode: true, ..self }
    }
    /// Frequency converted to cycles per day.
    pub fn per_day(&self) -> Frequency {
        (self.freq as f64 * self.unit.per_day()) as Frequency
    }
    /// Whether a theoretical mode of this type may stand in for this one.
    pub fn accepts_type(&self, kind: ModeType) -> bool {
        self.kind.map_or(true, |k| k == kind)
    }
    /// Whether a theoretical mode of this radial order may stand in for this one.
    pub fn accepts_order(&self, n: i16) -> bool {
        self.n.map_or(true, |o| o == n) && (!self.p_mode || n > 0) && (!self.g_mode || n < 0)
    }
    pub fn accepts(&self, mode: &Mode) -> bool {
        self.accepts_type(mode.kind) && self.accepts_order(mode.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion_to_per_day() {
        let hz = ObservedMode::new(1e-5, Unit::Hertz);
        assert!((hz.per_day() - 0.864).abs() < 1e-6);
        let uhz = ObservedMode::new(10., Unit::MicroHertz);
        assert!((uhz.per_day() - 0.864).abs() < 1e-6);
        let cd = ObservedMode::new(1.25, Unit::PerDay);
        assert_eq!(cd.per_day(), 1.25);
    }

    #[test]
    fn unidentified_mode_accepts_any_type() {
        let dipole = ModeType::new(1, 0).unwrap();
        let radial = ModeType::new(0, 0).unwrap();
        let free = ObservedMode::new(1., Unit::PerDay);
        assert!(free.accepts_type(dipole) && free.accepts_type(radial));
        let tagged = free.identified(dipole);
        assert!(tagged.accepts_type(dipole));
        assert!(!tagged.accepts_type(radial));
    }

    #[test]
    fn identified_order_and_family_constrain_modes() {
        let dipole = ModeType::new(1, 0).unwrap();
        let g = Mode { n: -12, kind: dipole, freq: 1. };
        let p = Mode { n: 2, kind: dipole, freq: 15. };
        let free = ObservedMode::new(1., Unit::PerDay);
        assert!(free.accepts(&g) && free.accepts(&p));
        assert!(free.ordered(-12).accepts(&g));
        assert!(!free.ordered(-11).accepts(&g));
        assert!(free.gravity().accepts(&g) && !free.gravity().accepts(&p));
        assert!(free.pressure().accepts(&p) && !free.pressure().accepts(&g));
        assert!(!free.identified(dipole).ordered(-12).accepts(&p));
    }
}
