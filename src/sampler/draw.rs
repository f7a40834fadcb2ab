use crate::grid::*;
use serde::Deserialize;
use serde::Serialize;

/// One (model, rotation rate) pair drawn from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Draw {
    pub model: ModelId,
    pub rotation: RotationId,
}

impl Draw {
    pub fn new(model: ModelId, rotation: RotationId) -> Self {
        Self { model, rotation }
    }
}

impl From<(ModelId, RotationId)> for Draw {
    fn from((model, rotation): (ModelId, RotationId)) -> Self {
        Self { model, rotation }
    }
}

impl std::fmt::Display for Draw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.model, self.rotation)
    }
}
