use crate::error::Error;
use crate::error::Result;
use crate::grid::*;

/// Which theoretical modes are eligible for matching: the mode types to
/// fetch and the inclusive frequency window (cycles per day).
#[derive(Debug, Clone, PartialEq)]
pub struct ModeFilter {
    types: Vec<ModeType>,
    window: Bounds,
}

impl ModeFilter {
    pub fn new(types: Vec<ModeType>, window: Bounds) -> Result<Self> {
        if types.is_empty() {
            return Err(Error::configuration("mode filter needs at least one mode type"));
        }
        let mut types = types;
        types.sort();
        types.dedup();
        Ok(Self { types, window })
    }
    pub fn types(&self) -> &[ModeType] {
        &self.types
    }
    pub fn window(&self) -> Bounds {
        self.window
    }
}
