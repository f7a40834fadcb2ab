use crate::ETA_DECIMALS;
use crate::Param;
use crate::grid::*;
use std::collections::BTreeMap;

/// Rotation id to eta, rounded once at load time.
///
/// Eta is held as its fixed-precision decimal string, so a rate stored as
/// 9.999999 reads back as 10.0.
#[derive(Debug, Default, Clone)]
pub struct RotationLookup {
    by_id: BTreeMap<RotationId, String>,
}

impl RotationLookup {
    fn key(eta: Param) -> String {
        format!("{:.*}", ETA_DECIMALS, eta)
    }
    /// Eta of a rotation id, rounded to [`ETA_DECIMALS`].
    pub fn eta(&self, id: RotationId) -> Option<Param> {
        self.by_id.get(&id).and_then(|s| s.parse::<Param>().ok())
    }
    pub fn len(&self) -> usize {
        self.by_id.len()
    }
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl From<Vec<RotationRate>> for RotationLookup {
    fn from(rates: Vec<RotationRate>) -> Self {
        let mut lookup = Self::default();
        for rate in rates {
            let key = Self::key(rate.eta);
            if let Some((prev, _)) = lookup.by_id.iter().find(|(_, k)| **k == key) {
                log::warn!("{} and {} share eta {}", prev, rate.id, key);
            }
            lookup.by_id.insert(rate.id, key);
        }
        lookup
    }
}
