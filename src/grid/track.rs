use super::*;
use crate::Param;
use serde::Deserialize;
use serde::Serialize;

/// One evolution sequence, keyed by its four input physics parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub m_ini: Param,
    pub fov: Param,
    pub z: Param,
    pub logd: Param,
}

impl Track {
    pub fn new(m_ini: Param, fov: Param, z: Param, logd: Param) -> Self {
        Self {
            m_ini,
            fov,
            z,
            logd,
        }
    }
    /// Value of one of the four track axes.
    pub fn value(&self, axis: Axis) -> Option<Param> {
        match axis {
            Axis::Mass => Some(self.m_ini),
            Axis::Overshoot => Some(self.fov),
            Axis::Metallicity => Some(self.z),
            Axis::Mixing => Some(self.logd),
            Axis::Hydrogen | Axis::Rotation => None,
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(M_ini={}, fov={}, Z={}, logD={})",
            self.m_ini, self.fov, self.z, self.logd
        )
    }
}

/// Resolved attributes of one model: its track plus central hydrogen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub track: Track,
    pub xc: Param,
}

impl Params {
    /// Attributes joined with a rotation rate, in [`Axis::ALL`] order.
    pub fn features(&self, eta: Param) -> [Param; 6] {
        [
            self.track.m_ini,
            self.track.fov,
            self.track.z,
            self.track.logd,
            self.xc,
            eta,
        ]
    }
}
