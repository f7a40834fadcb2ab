use crate::Param;
use crate::database::Source;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;
use crate::sampler::Draw;
use serde::Deserialize;
use serde::Serialize;

/// Reference point of a neighbourhood, one value per axis.
pub type Anchor = PerAxis<Param>;
/// Grid values to take on each side of the anchor, per axis.
pub type Neighbors = PerAxis<usize>;

/// Half-open index window `[start, end)` into a sorted list of grid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    /// Index of the value nearest the anchor.
    pub nearest: usize,
}

impl Window {
    /// `n` values either side of the one nearest `target`, clipped at both
    /// ends. Ties go to the lower index. `None` if `values` is empty.
    pub fn around(values: &[Param], target: Param, n: usize) -> Option<Self> {
        let nearest = values
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
            .map(|(i, _)| i)?;
        Some(Self {
            start: nearest.saturating_sub(n),
            end: (nearest + n + 1).min(values.len()),
            nearest,
        })
    }
    pub fn len(&self) -> usize {
        self.end - self.start
    }
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
    pub fn contains(&self, i: usize) -> bool {
        self.start <= i && i < self.end
    }
    /// Inclusive value range spanned by the window.
    pub fn bounds(&self, values: &[Param]) -> Result<Bounds> {
        match (values.get(self.start), values.get(self.end.wrapping_sub(1))) {
            (Some(lo), Some(hi)) => Bounds::new(*lo as f64, *hi as f64),
            _ => Err(Error::empty("window lies outside the grid values")),
        }
    }
}

/// Grid models and rotation rates surrounding an anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// The anchor's own track.
    pub track: TrackId,
    /// Inclusive range per axis, in [`Axis::ALL`] order.
    pub ranges: Vec<(Axis, Bounds)>,
    /// Index windows behind `ranges`. logD has none when its range comes
    /// from the mass neighbourhood.
    pub windows: Vec<(Axis, Window)>,
    pub models: Vec<ModelId>,
    pub rotations: Vec<RotationId>,
}

impl Neighborhood {
    pub fn range(&self, axis: Axis) -> Option<Bounds> {
        self.ranges.iter().find(|(a, _)| *a == axis).map(|(_, b)| *b)
    }
    pub fn window(&self, axis: Axis) -> Option<Window> {
        self.windows.iter().find(|(a, _)| *a == axis).map(|(_, w)| *w)
    }
    /// Every (model, rotation) pair inside the neighbourhood.
    pub fn draws(&self) -> Vec<Draw> {
        self.models
            .iter()
            .flat_map(|m| self.rotations.iter().map(move |r| Draw::new(*m, *r)))
            .collect()
    }
}

/// Bounds the interpolation domain around `anchor`.
///
/// Each axis gets a window of grid values centred on the value nearest the
/// anchor: track axes over the whole grid, Xc over the anchor's own track,
/// eta over the rotation table. A zero count pins an axis to its nearest
/// value. logD is irregular across masses, so with a nonzero count its
/// range is instead `[0, max logD]` over tracks at the top mass of the mass
/// window.
pub async fn collect_around_anchor<S: Source>(
    source: &S,
    anchor: &Anchor,
    neighbors: &Neighbors,
) -> Result<Neighborhood> {
    if neighbors.iter().all(|(_, n)| *n == 0) {
        return Err(Error::configuration("every neighbour count is zero"));
    }
    let key = Track::new(anchor.mass, anchor.overshoot, anchor.metallicity, anchor.mixing);
    let track = source
        .track(key)
        .await?
        .ok_or_else(|| Error::empty(format!("no track at {}", key)))?;

    let mut ranges: Vec<(Axis, Bounds)> = Vec::with_capacity(Axis::ALL.len());
    let mut windows: Vec<(Axis, Window)> = Vec::with_capacity(Axis::ALL.len());
    for axis in Axis::ALL {
        let n = *neighbors.get(axis);
        if axis == Axis::Mixing && n > 0 {
            let mass = ranges
                .iter()
                .find(|(a, _)| *a == Axis::Mass)
                .map(|(_, b)| b.hi())
                .ok_or_else(|| Error::configuration("mass range must precede logD"))?;
            let top = source
                .mixing()
                .await?
                .into_iter()
                .filter(|(m, _)| *m as f64 == mass)
                .map(|(_, d)| d)
                .reduce(Param::max)
                .ok_or_else(|| Error::empty(format!("no logD values at M_ini={}", mass)))?;
            let range = Bounds::new(0., top as f64)?;
            log::info!("{:<6} {} (from M_ini={})", axis.name(), range, mass);
            ranges.push((axis, range));
            continue;
        }
        let values = match axis {
            Axis::Hydrogen => source.centrals(track).await?,
            axis => source.distinct(axis).await?,
        };
        let target = *anchor.get(axis);
        let window = Window::around(&values, target, n)
            .ok_or_else(|| Error::empty(format!("no grid values along {}", axis)))?;
        let range = window.bounds(&values)?;
        log::info!("{:<6} {} ({} of {} values)", axis.name(), range, window.len(), values.len());
        ranges.push((axis, range));
        windows.push((axis, window));
    }

    let inside = ranges
        .iter()
        .filter(|(a, _)| *a != Axis::Rotation)
        .copied()
        .collect::<Vec<_>>();
    let models = source.models_inside(&inside).await?;
    if models.is_empty() {
        return Err(Error::empty("no models inside the anchor neighbourhood"));
    }
    let eta = ranges
        .iter()
        .find(|(a, _)| *a == Axis::Rotation)
        .map(|(_, b)| *b)
        .ok_or_else(|| Error::configuration("rotation range missing"))?;
    let rotations = source.rotations_within(eta).await?;
    if rotations.is_empty() {
        return Err(Error::empty("no rotation rates inside the anchor neighbourhood"));
    }
    log::info!(
        "neighbourhood of {}: {} models × {} rotation rates",
        track,
        models.len(),
        rotations.len()
    );
    Ok(Neighborhood {
        track,
        ranges,
        windows,
        models,
        rotations,
    })
}
