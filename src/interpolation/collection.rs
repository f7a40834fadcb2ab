use super::*;
use crate::database::Source;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;
use crate::sampler::Draw;

/// Which grid models feed an interpolation.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    /// The neighbourhood of an anchor point.
    Anchor { anchor: Anchor, neighbors: Neighbors },
    /// Every model and rotation rate inside an explicit box. Axes left out
    /// are unconstrained.
    Range(Vec<(Axis, Bounds)>),
}

impl Collection {
    /// All (model, rotation) pairs selected by this collection.
    pub async fn draws<S: Source>(&self, source: &S) -> Result<Vec<Draw>> {
        match self {
            Self::Anchor { anchor, neighbors } => Ok(collect_around_anchor(source, anchor, neighbors)
                .await?
                .draws()),
            Self::Range(ranges) => collect_in_range(source, ranges).await,
        }
    }
}

async fn collect_in_range<S: Source>(source: &S, ranges: &[(Axis, Bounds)]) -> Result<Vec<Draw>> {
    if ranges.is_empty() {
        return Err(Error::configuration("range collection needs at least one axis"));
    }
    for (i, (axis, _)) in ranges.iter().enumerate() {
        if ranges[..i].iter().any(|(a, _)| a == axis) {
            return Err(Error::configuration(format!("{} ranged twice", axis)));
        }
    }
    let inside = ranges
        .iter()
        .filter(|(a, _)| *a != Axis::Rotation)
        .copied()
        .collect::<Vec<_>>();
    let models = match inside.is_empty() {
        true => source.models().await?,
        false => source.models_inside(&inside).await?,
    };
    if models.is_empty() {
        return Err(Error::empty("no models inside the requested ranges"));
    }
    let rotations = match ranges.iter().find(|(a, _)| *a == Axis::Rotation) {
        Some((_, eta)) => source.rotations_within(*eta).await?,
        None => source.rotations().await?.into_iter().map(|r| r.id).collect(),
    };
    if rotations.is_empty() {
        return Err(Error::empty("no rotation rates inside the requested range"));
    }
    log::info!(
        "range collection: {} models × {} rotation rates",
        models.len(),
        rotations.len()
    );
    Ok(models
        .iter()
        .flat_map(|m| rotations.iter().map(move |r| Draw::new(*m, *r)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::Memory;

    fn grid() -> Memory {
        let mut grid = Memory::default();
        for m_ini in [1.0, 2.0, 3.0] {
            let track = grid.add_track(m_ini, 0.01, 0.014, 0.0);
            grid.add_model(track, 0.5, 4.0, 4.0);
            grid.add_model(track, 0.2, 3.9, 3.8);
        }
        grid.add_rotation(0.0);
        grid.add_rotation(20.0);
        grid
    }

    #[tokio::test]
    async fn range_selects_box() {
        let grid = grid();
        let draws = Collection::Range(vec![
            (Axis::Mass, Bounds::new(1.5, 3.0).unwrap()),
            (Axis::Hydrogen, Bounds::new(0.4, 0.6).unwrap()),
        ])
        .draws(&grid)
        .await
        .unwrap();
        assert_eq!(draws.len(), 2 * 2);
    }

    #[tokio::test]
    async fn rotation_only_range() {
        let grid = grid();
        let draws = Collection::Range(vec![(Axis::Rotation, Bounds::point(20.0).unwrap())])
            .draws(&grid)
            .await
            .unwrap();
        assert_eq!(draws.len(), 6);
        assert!(draws.iter().all(|d| d.rotation == RotationId::from(2)));
    }

    #[tokio::test]
    async fn malformed_ranges_rejected() {
        let grid = grid();
        let empty = Collection::Range(vec![]).draws(&grid).await;
        assert!(matches!(empty, Err(Error::Configuration(_))));
        let twice = Collection::Range(vec![
            (Axis::Mass, Bounds::new(1.0, 2.0).unwrap()),
            (Axis::Mass, Bounds::new(2.0, 3.0).unwrap()),
        ])
        .draws(&grid)
        .await;
        assert!(matches!(twice, Err(Error::Configuration(_))));
        let outside = Collection::Range(vec![(Axis::Mass, Bounds::new(5.0, 6.0).unwrap())])
            .draws(&grid)
            .await;
        assert!(matches!(outside, Err(Error::EmptyResult(_))));
    }
}
