use super::*;
use crate::Param;
use serde::Deserialize;
use serde::Serialize;

/// A rotation rate row: store id and eta (percent of critical).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationRate {
    pub id: RotationId,
    pub eta: Param,
}

impl RotationRate {
    pub fn new(id: RotationId, eta: Param) -> Self {
        Self { id, eta }
    }
}
