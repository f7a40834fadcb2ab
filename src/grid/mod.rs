//! Domain records of the model grid.
//!
//! These mirror the store's tables closely but carry no I/O: tracks and
//! their natural key, model parameters, rotation rates, theoretical and
//! observed modes, and the six physical axes used throughout sampling and
//! interpolation.
mod axis;
mod bounds;
mod ids;
mod mode;
mod observed;
mod rotation;
mod track;

pub use axis::*;
pub use bounds::*;
pub use ids::*;
pub use mode::*;
pub use observed::*;
pub use rotation::*;
pub use track::*;
