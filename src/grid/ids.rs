use serde::Deserialize;
use serde::Serialize;

/// Primary key of the `models` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelId(i32);

/// Primary key of the `rotation_rates` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RotationId(i16);

/// Primary key of the `tracks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId(i32);

impl From<i32> for ModelId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
impl From<ModelId> for i32 {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

impl From<i16> for RotationId {
    fn from(id: i16) -> Self {
        Self(id)
    }
}
impl From<RotationId> for i16 {
    fn from(id: RotationId) -> Self {
        id.0
    }
}

impl From<i32> for TrackId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
impl From<TrackId> for i32 {
    fn from(id: TrackId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "model#{}", self.0)
    }
}
impl std::fmt::Display for RotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rotation#{}", self.0)
    }
}
impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "track#{}", self.0)
    }
}
