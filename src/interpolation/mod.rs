//! Mesh-grid interpolation.
//!
//! An [`InterpolationSpec`] declares which axes span the mesh and how
//! finely; the [`MeshBuilder`] materialises it; the anchor and range
//! collectors pick the grid models that feed the [`Interpolator`].
mod anchor;
mod collection;
mod interpolator;
mod mesh;
mod spec;

pub use anchor::*;
pub use collection::*;
pub use interpolator::*;
pub use mesh::*;
pub use spec::*;
