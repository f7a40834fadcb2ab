use super::*;
use crate::Coordinate;
use crate::IDW_POWER;
use crate::database::Source;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;
use crate::sampler::*;
use ndarray::Array2;
use rayon::prelude::*;

/// Scattered-data interpolation scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Value of the closest input.
    Nearest,
    /// Shepard weighting by `distance^-power`.
    InverseDistance { power: Coordinate },
}

impl Default for Method {
    fn default() -> Self {
        Self::InverseDistance { power: IDW_POWER }
    }
}

/// Synthetic frequencies over a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub axes: Vec<Axis>,
    /// Per-axis coordinates; mesh points are their product in row-major order.
    pub coords: Vec<Vec<Coordinate>>,
    /// Mesh points × observed modes.
    pub frequencies: Array2<Coordinate>,
    /// Grid rows the values were interpolated from.
    pub inputs: Sample,
}

impl Interpolation {
    /// Coordinates of the point behind row `index` of `frequencies`.
    pub fn point(&self, index: usize) -> Vec<Coordinate> {
        unravel(&self.coords, index)
    }
}

/// Interpolates matched theoretical frequencies onto a mesh.
///
/// Owns the mesh declaration and the matching configuration; grid rows are
/// resolved through a [`Sampler`] over the same store.
pub struct Interpolator<'a, S: Source> {
    source: &'a S,
    spec: InterpolationSpec,
    filter: ModeFilter,
    observed: Vec<ObservedMode>,
    rule: MatchRule,
    method: Method,
    builder: MeshBuilder,
}

impl<'a, S: Source> Interpolator<'a, S> {
    pub fn new(
        source: &'a S,
        spec: InterpolationSpec,
        filter: ModeFilter,
        observed: Vec<ObservedMode>,
    ) -> Self {
        Self {
            source,
            spec,
            filter,
            observed,
            rule: MatchRule::default(),
            method: Method::default(),
            builder: MeshBuilder::default(),
        }
    }
    pub fn rule(self, rule: MatchRule) -> Self {
        Self { rule, ..self }
    }
    pub fn method(self, method: Method) -> Self {
        Self { method, ..self }
    }
    pub fn limit(self, limit: usize) -> Self {
        Self {
            builder: MeshBuilder::new(limit),
            ..self
        }
    }
    pub fn spec(&self) -> &InterpolationSpec {
        &self.spec
    }
    pub fn mesh(&self) -> Option<&Mesh> {
        self.builder.mesh()
    }

    /// Resolves and matches every grid row the collection selects.
    pub async fn collect(&self, collection: &Collection) -> Result<Sample> {
        let draws = collection.draws(self.source).await?;
        Sampler::new(self.source)
            .resolve(&draws, &self.filter, &self.observed, self.rule)
            .await
    }

    /// Validates the mesh, collects its inputs, builds it and evaluates
    /// every point.
    pub async fn interpolate(&mut self, collection: &Collection) -> Result<Interpolation> {
        self.builder.reset();
        if let Method::InverseDistance { power } = self.method {
            if !(power.is_finite() && power > 0.) {
                return Err(Error::configuration(format!(
                    "inverse-distance power must be positive, got {}",
                    power
                )));
            }
        }
        let points = self.builder.check(&self.spec)?;
        log::info!("mesh of {} points passes pre-flight", points);

        let inputs = self.collect(collection).await?;
        if inputs.is_empty() {
            return Err(Error::empty("no grid rows survived mode matching"));
        }
        let features = inputs.features().mapv(|x| x as Coordinate);
        let values = inputs.frequencies().mapv(|x| x as Coordinate);
        if features.nrows() != values.nrows() {
            return Err(Error::InconsistentMatch {
                context: "interpolation inputs",
                expected: features.nrows(),
                found: values.nrows(),
            });
        }

        let mesh = self.builder.prepare(&self.spec)?;
        let frequencies = evaluate(&features, &values, mesh, self.method)?;
        log::info!(
            "interpolated {} frequencies at {} points from {} rows",
            frequencies.ncols(),
            frequencies.nrows(),
            inputs.len()
        );
        Ok(Interpolation {
            axes: mesh.axes().to_vec(),
            coords: mesh.coords().to_vec(),
            frequencies,
            inputs,
        })
    }
}

/// Evaluates `values` (rows × outputs), known at `features` (rows × axes),
/// at every point of `mesh`, whose coordinates are the features of the
/// mesh's axes. Distances are taken after scaling each column to the
/// inputs' range. Points are generated on the fly, one row per point.
pub fn evaluate(
    features: &Array2<Coordinate>,
    values: &Array2<Coordinate>,
    mesh: &Mesh,
    method: Method,
) -> Result<Array2<Coordinate>> {
    let columns = mesh.axes().iter().map(Axis::index).collect::<Vec<_>>();
    if features.nrows() == 0 {
        return Err(Error::empty("no interpolation inputs"));
    }
    if features.nrows() != values.nrows() {
        return Err(Error::InconsistentMatch {
            context: "interpolation inputs",
            expected: features.nrows(),
            found: values.nrows(),
        });
    }
    if let Some(c) = columns.iter().find(|c| **c >= features.ncols()) {
        return Err(Error::configuration(format!("feature column {} out of range", c)));
    }
    let scales = columns
        .iter()
        .map(|c| {
            let column = features.column(*c);
            let lo = column.iter().copied().fold(Coordinate::INFINITY, Coordinate::min);
            let hi = column.iter().copied().fold(Coordinate::NEG_INFINITY, Coordinate::max);
            let width = if hi > lo { hi - lo } else { 1. };
            (lo, width)
        })
        .collect::<Vec<_>>();
    let inputs = features
        .rows()
        .into_iter()
        .map(|row| {
            columns
                .iter()
                .zip(&scales)
                .map(|(c, (lo, w))| (row[*c] - lo) / w)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let outputs = values.ncols();
    let size = mesh.size();
    let total = size
        .checked_mul(outputs)
        .ok_or_else(|| Error::mesh("interpolated output size overflows"))?;
    let mut data = Vec::new();
    data.try_reserve_exact(total)
        .map_err(|e| Error::mesh(format!("cannot allocate {} frequencies: {}", total, e)))?;
    data.resize(total, 0.);
    if outputs == 0 {
        return Array2::from_shape_vec((size, 0), data).map_err(|e| Error::mesh(e.to_string()));
    }
    data.par_chunks_mut(outputs)
        .enumerate()
        .for_each(|(index, row)| {
            let target = mesh
                .point(index)
                .iter()
                .zip(&scales)
                .map(|(x, (lo, w))| (x - lo) / w)
                .collect::<Vec<_>>();
            let distances = inputs
                .iter()
                .map(|input| distance(input, &target))
                .collect::<Vec<_>>();
            let (closest, nearest) = distances
                .iter()
                .copied()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap_or((0, 0.));
            match method {
                Method::Nearest => row.iter_mut().zip(values.row(closest)).for_each(|(o, v)| *o = *v),
                Method::InverseDistance { .. } if nearest <= Coordinate::EPSILON => {
                    row.iter_mut().zip(values.row(closest)).for_each(|(o, v)| *o = *v)
                }
                Method::InverseDistance { power } => {
                    let weights = distances.iter().map(|d| d.powf(-power)).collect::<Vec<_>>();
                    let total = weights.iter().sum::<Coordinate>();
                    for (j, o) in row.iter_mut().enumerate() {
                        *o = weights
                            .iter()
                            .zip(values.column(j))
                            .map(|(w, v)| w * v)
                            .sum::<Coordinate>()
                            / total;
                    }
                }
            }
        });
    Array2::from_shape_vec((size, outputs), data).map_err(|e| Error::mesh(e.to_string()))
}

fn distance(a: &[Coordinate], b: &[Coordinate]) -> Coordinate {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<Coordinate>()
        .sqrt()
}
