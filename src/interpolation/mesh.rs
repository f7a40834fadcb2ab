use super::*;
use crate::Coordinate;
use crate::MESH_COORDINATE_LIMIT;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;
use ndarray::ArrayD;
use ndarray::IxDyn;

/// Outer product of the included axes' coordinates.
///
/// `grid` has shape `(k, s1, …, sk)`: slice `a` along the first dimension
/// holds every mesh point's coordinate on axis `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    axes: Vec<Axis>,
    coords: Vec<Vec<Coordinate>>,
    grid: ArrayD<Coordinate>,
}

impl Mesh {
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }
    pub fn coords(&self) -> &[Vec<Coordinate>] {
        &self.coords
    }
    pub fn grid(&self) -> &ArrayD<Coordinate> {
        &self.grid
    }
    /// Step counts `(s1, …, sk)`.
    pub fn steps(&self) -> Vec<usize> {
        self.coords.iter().map(Vec::len).collect()
    }
    /// Number of mesh points.
    pub fn size(&self) -> usize {
        self.coords.iter().map(Vec::len).product()
    }
    /// Coordinates of the `index`-th point in row-major order of the grid.
    pub fn point(&self, index: usize) -> Vec<Coordinate> {
        unravel(&self.coords, index)
    }
}

/// Coordinates of the `index`-th point of the outer product of `coords`,
/// last axis varying fastest.
pub fn unravel(coords: &[Vec<Coordinate>], mut index: usize) -> Vec<Coordinate> {
    let mut point = vec![0.; coords.len()];
    for (a, c) in coords.iter().enumerate().rev() {
        if c.is_empty() {
            continue;
        }
        point[a] = c[index % c.len()];
        index /= c.len();
    }
    point
}

/// Materialises meshes from an [`InterpolationSpec`].
///
/// A failed build leaves the builder without a mesh.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    limit: usize,
    mesh: Option<Mesh>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new(MESH_COORDINATE_LIMIT)
    }
}

impl MeshBuilder {
    /// Builder refusing meshes of more than `limit` coordinates.
    pub fn new(limit: usize) -> Self {
        Self { limit, mesh: None }
    }

    /// Point count of the mesh `spec` would produce, without building it.
    pub fn estimate(spec: &InterpolationSpec) -> Result<usize> {
        let steps = spec.included().map(|(_, s)| s.steps()).collect::<Vec<_>>();
        if steps.is_empty() {
            return Err(Error::configuration("no axis is included in the mesh"));
        }
        steps
            .iter()
            .try_fold(1usize, |n, s| n.checked_mul(*s))
            .ok_or_else(|| Error::mesh("mesh point count overflows"))
    }

    /// Pre-flight: the point count, if the mesh's coordinates fit under
    /// this builder's limit.
    pub fn check(&self, spec: &InterpolationSpec) -> Result<usize> {
        let points = Self::estimate(spec)?;
        let total = points
            .checked_mul(spec.included().count())
            .ok_or_else(|| Error::mesh("mesh size overflows"))?;
        match total {
            total if total > self.limit => Err(Error::mesh(format!(
                "{} mesh coordinates ({} points) exceed the limit of {}",
                total, points, self.limit
            ))),
            _ => Ok(points),
        }
    }

    /// Drops any mesh from a previous build.
    pub fn reset(&mut self) {
        self.mesh = None;
    }

    pub fn prepare(&mut self, spec: &InterpolationSpec) -> Result<&Mesh> {
        self.reset();
        let points = self.check(spec)?;
        let axes = spec.included().map(|(a, _)| a).collect::<Vec<_>>();
        let coords = spec
            .included()
            .map(|(_, s)| s.linspace())
            .collect::<Vec<_>>();
        let steps = coords.iter().map(Vec::len).collect::<Vec<_>>();
        let total = points
            .checked_mul(axes.len())
            .ok_or_else(|| Error::mesh("mesh size overflows"))?;
        let mut data = Vec::new();
        data.try_reserve_exact(total)
            .map_err(|e| Error::mesh(format!("cannot allocate {} coordinates: {}", total, e)))?;
        for (a, c) in coords.iter().enumerate() {
            data.extend(
                ndarray::indices(IxDyn(&steps))
                    .into_iter()
                    .map(|ix| c[ix[a]]),
            );
        }
        let shape = std::iter::once(axes.len())
            .chain(steps.iter().copied())
            .collect::<Vec<_>>();
        let grid = ArrayD::from_shape_vec(IxDyn(&shape), data)
            .map_err(|e| Error::mesh(e.to_string()))?;
        log::info!(
            "built {} mesh over {} ({} points)",
            shape
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join("×"),
            axes.iter()
                .map(Axis::name)
                .collect::<Vec<_>>()
                .join(", "),
            points
        );
        Ok(self.mesh.insert(Mesh { axes, coords, grid }))
    }

    pub fn is_ready(&self) -> bool {
        self.mesh.is_some()
    }
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }
}
