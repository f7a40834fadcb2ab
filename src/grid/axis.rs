use crate::error::Error;
use serde::Deserialize;
use serde::Serialize;

/// The six physical dimensions of the grid.
///
/// The first four identify a [`Track`](super::Track), `Hydrogen` places a
/// model along its track, and `Rotation` selects the rotation rate the
/// modes were computed at. Declaration order here is the canonical column
/// order of a learning set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Initial mass, M_ini (solar units).
    Mass,
    /// Exponential core-overshoot parameter, fov.
    Overshoot,
    /// Initial metallicity, Z.
    Metallicity,
    /// Log of the extra diffusive-mixing coefficient, logD.
    Mixing,
    /// Central hydrogen mass fraction, Xc.
    Hydrogen,
    /// Rotation rate as a percentage of critical, eta.
    Rotation,
}

impl Axis {
    pub const ALL: [Self; 6] = [
        Self::Mass,
        Self::Overshoot,
        Self::Metallicity,
        Self::Mixing,
        Self::Hydrogen,
        Self::Rotation,
    ];

    /// Conventional short name, as used in column headers.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mass => "M_ini",
            Self::Overshoot => "fov",
            Self::Metallicity => "Z",
            Self::Mixing => "logD",
            Self::Hydrogen => "Xc",
            Self::Rotation => "eta",
        }
    }

    /// Column holding this axis, qualified for [`crate::MODELS_TRACKS`].
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Mass => "t.m_ini",
            Self::Overshoot => "t.fov",
            Self::Metallicity => "t.z",
            Self::Mixing => "t.logd",
            Self::Hydrogen => "m.xc",
            Self::Rotation => "eta",
        }
    }

    /// Unqualified column name in the axis's own table.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Mass => "m_ini",
            Self::Overshoot => "fov",
            Self::Metallicity => "z",
            Self::Mixing => "logd",
            Self::Hydrogen => "xc",
            Self::Rotation => "eta",
        }
    }

    /// Table whose rows carry this axis.
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Mass | Self::Overshoot | Self::Metallicity | Self::Mixing => crate::TRACKS,
            Self::Hydrogen => crate::MODELS,
            Self::Rotation => crate::ROTATION_RATES,
        }
    }

    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for Axis {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s) || a.field() == s)
            .ok_or_else(|| Error::configuration(format!("unknown axis \"{}\"", s)))
    }
}

impl std::str::FromStr for Axis {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// One value per [`Axis`], addressed by name or by axis.
///
/// Used for anchors (`PerAxis<Param>`), neighbour counts
/// (`PerAxis<usize>`) and per-axis ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerAxis<T> {
    pub mass: T,
    pub overshoot: T,
    pub metallicity: T,
    pub mixing: T,
    pub hydrogen: T,
    pub rotation: T,
}

impl<T> PerAxis<T> {
    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Mass => &self.mass,
            Axis::Overshoot => &self.overshoot,
            Axis::Metallicity => &self.metallicity,
            Axis::Mixing => &self.mixing,
            Axis::Hydrogen => &self.hydrogen,
            Axis::Rotation => &self.rotation,
        }
    }
    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Mass => &mut self.mass,
            Axis::Overshoot => &mut self.overshoot,
            Axis::Metallicity => &mut self.metallicity,
            Axis::Mixing => &mut self.mixing,
            Axis::Hydrogen => &mut self.hydrogen,
            Axis::Rotation => &mut self.rotation,
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
    pub fn map<U>(&self, f: impl Fn(Axis, &T) -> U) -> PerAxis<U> {
        PerAxis {
            mass: f(Axis::Mass, &self.mass),
            overshoot: f(Axis::Overshoot, &self.overshoot),
            metallicity: f(Axis::Metallicity, &self.metallicity),
            mixing: f(Axis::Mixing, &self.mixing),
            hydrogen: f(Axis::Hydrogen, &self.hydrogen),
            rotation: f(Axis::Rotation, &self.rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_names_roundtrip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::try_from(axis.name()).unwrap(), axis);
        }
        assert_eq!("logd".parse::<Axis>().unwrap(), Axis::Mixing);
        assert!("teff".parse::<Axis>().is_err());
    }

    #[test]
    fn per_axis_indexing() {
        let mut counts = PerAxis::<usize>::default();
        *counts.get_mut(Axis::Hydrogen) = 3;
        assert_eq!(counts.hydrogen, 3);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 3);
        assert_eq!(counts.iter().nth(4).map(|(a, _)| a), Some(Axis::Hydrogen));
    }
}
