use super::*;
use crate::Param;
use crate::database::RotationLookup;
use crate::database::Source;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Draws learning sets from a grid store.
///
/// Holds nothing but the store handle: every call re-queries the store and
/// builds its lookups from scratch.
pub struct Sampler<'a, S: Source> {
    source: &'a S,
}

impl<'a, S: Source> Sampler<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Shuffles both id lists and pairs them, rotation rates outermost,
    /// stopping after `n` pairs. Pairs are distinct when the ids are.
    pub fn combine<R: Rng>(
        mut models: Vec<ModelId>,
        mut rotations: Vec<RotationId>,
        n: usize,
        rng: &mut R,
    ) -> Vec<Draw> {
        models.shuffle(rng);
        rotations.shuffle(rng);
        rotations
            .iter()
            .flat_map(|r| models.iter().map(move |m| Draw::new(*m, *r)))
            .take(n)
            .collect()
    }

    /// Picks (model, rotation) pairs per the request's policy.
    pub async fn draw(&self, request: &Request) -> Result<Vec<Draw>> {
        request.validate()?;
        let (models, rotations) = match request.policy {
            Policy::Random => {
                let models = self.source.models().await?;
                let rotations = self
                    .source
                    .rotations()
                    .await?
                    .into_iter()
                    .map(|r| r.id)
                    .collect::<Vec<_>>();
                (models, rotations)
            }
            Policy::Constrained => {
                let (log_teff, log_g, eta) = request
                    .constraints
                    .unwrap_or_default()
                    .ranges()?;
                let models = self.source.models_within(log_teff, log_g).await?;
                let rotations = self.source.rotations_within(eta).await?;
                (models, rotations)
            }
        };
        if models.is_empty() {
            return Err(Error::empty("no models match the selection"));
        }
        if rotations.is_empty() {
            return Err(Error::empty("no rotation rates match the selection"));
        }
        let models = models.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let rotations = rotations.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let ref mut rng = match request.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let draws = Self::combine(models, rotations, request.max_size, rng);
        log::info!("drew {} (model, rotation) pairs", draws.len());
        Ok(draws)
    }

    /// Draws, resolves and matches a whole learning set.
    pub async fn build_learning_set(&self, request: &Request) -> Result<Sample> {
        let draws = self.draw(request).await?;
        self.resolve(&draws, &request.filter, &request.observed, request.rule)
            .await
    }

    /// Resolves attributes and matched modes of caller-supplied draws.
    ///
    /// Rows whose modes do not line up with `observed` are logged and
    /// dropped; every other inconsistency fails the whole call.
    pub async fn resolve(
        &self,
        draws: &[Draw],
        filter: &ModeFilter,
        observed: &[ObservedMode],
        rule: MatchRule,
    ) -> Result<Sample> {
        if observed.is_empty() {
            return Err(Error::configuration("at least one observed mode is required"));
        }
        if draws.is_empty() {
            return Err(Error::empty("no draws to resolve"));
        }

        let lookup = RotationLookup::from(self.source.rotations().await?);
        if lookup.is_empty() {
            return Err(Error::empty("rotation rate table is empty"));
        }
        let etas = draws
            .iter()
            .filter_map(|d| lookup.eta(d.rotation))
            .collect::<Vec<Param>>();
        if etas.len() != draws.len() {
            return Err(Error::InconsistentMatch {
                context: "rotation rates",
                expected: draws.len(),
                found: etas.len(),
            });
        }

        let unique = draws
            .iter()
            .map(|d| d.model)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let params = self
            .source
            .params(&unique)
            .await?
            .into_iter()
            .collect::<BTreeMap<ModelId, Params>>();
        if params.is_empty() {
            return Err(Error::empty("no model parameters resolved"));
        }
        if params.len() != unique.len() {
            return Err(Error::InconsistentMatch {
                context: "model parameters",
                expected: unique.len(),
                found: params.len(),
            });
        }
        log::info!(
            "resolved {} models and {} rotation rates",
            params.len(),
            lookup.len()
        );

        let modes = self.source.modes(draws, filter).await?;
        if modes.len() != draws.len() {
            return Err(Error::InconsistentMatch {
                context: "mode batches",
                expected: draws.len(),
                found: modes.len(),
            });
        }

        let attributes = draws
            .iter()
            .filter_map(|d| params.get(&d.model).copied())
            .collect::<Vec<Params>>();
        if attributes.len() != draws.len() {
            return Err(Error::InconsistentMatch {
                context: "model parameters",
                expected: draws.len(),
                found: attributes.len(),
            });
        }

        let mut entries = Vec::with_capacity(draws.len());
        for (((draw, eta), params), modes) in draws.iter().zip(etas).zip(attributes).zip(modes) {
            match rule.apply(&modes, observed) {
                Ok(matched) => entries.push(Entry::new(*draw, params, eta, matched)),
                Err(why) => log::debug!("dropping {}: {}", draw, why),
            }
        }
        let sample = Sample::new(entries, draws.len());
        log::info!(
            "kept {} of {} draws ({} rejected by mode matching)",
            sample.len(),
            sample.requested(),
            sample.rejected()
        );
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::Memory;
    use std::sync::atomic::Ordering;

    fn dipole() -> ModeType {
        ModeType::new(1, 0).unwrap()
    }
    fn filter() -> ModeFilter {
        ModeFilter::new(vec![dipole()], Bounds::new(0., 5.).unwrap()).unwrap()
    }
    fn observed() -> Vec<ObservedMode> {
        [0.5, 0.6, 0.7]
            .into_iter()
            .map(|f| ObservedMode::new(f, Unit::PerDay))
            .collect()
    }
    fn random(max_size: usize) -> Request {
        Request::new(Policy::Random, max_size, filter(), observed()).seeded(42)
    }

    /// Two tracks with one model each, rotation rates 0 % and 10 %.
    fn pair() -> Memory {
        let mut grid = Memory::default();
        for m_ini in [1.0, 2.0] {
            let track = grid.add_track(m_ini, 0.0, 0.014, 0.0);
            grid.add_model(track, 0.5, 4.0, 4.0);
        }
        grid.add_rotation(0.0);
        grid.add_rotation(10.0);
        grid.uniform_modes(dipole(), -5..-2, 0.1);
        grid
    }

    /// Three tracks of three models, four rotation rates.
    fn grid() -> Memory {
        let mut grid = Memory::default();
        for (i, m_ini) in [1.5, 2.0, 2.5].into_iter().enumerate() {
            let track = grid.add_track(m_ini, 0.01, 0.014, 1.0);
            for (j, xc) in [0.6, 0.4, 0.2].into_iter().enumerate() {
                let log_teff = 3.8 + 0.1 * i as Param + 0.02 * j as Param;
                grid.add_model(track, xc, log_teff, 4.3 - 0.1 * j as Param);
            }
        }
        for eta in [0.0, 10.0, 20.0, 30.0] {
            grid.add_rotation(eta);
        }
        grid.uniform_modes(dipole(), -5..-2, 0.1);
        grid
    }

    #[tokio::test]
    async fn two_models_two_rotations_give_four_rows() {
        let grid = pair();
        let sample = Sampler::new(&grid)
            .build_learning_set(&random(10))
            .await
            .unwrap();
        assert_eq!(sample.len(), 4);
        assert_eq!(sample.rejected(), 0);
        let draws = sample.draws().into_iter().collect::<BTreeSet<_>>();
        assert_eq!(draws.len(), 4);
        assert!(sample.entries().iter().all(|e| e.frequencies.len() == 3));
        assert!(sample.entries().iter().all(|e| e.eta == 0.0 || e.eta == 10.0));
    }

    #[tokio::test]
    async fn fixed_seed_is_deterministic() {
        let grid = grid();
        let sampler = Sampler::new(&grid);
        let a = sampler.build_learning_set(&random(7)).await.unwrap();
        let b = sampler.build_learning_set(&random(7)).await.unwrap();
        assert_eq!(a.draws(), b.draws());
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn draws_are_distinct() {
        let grid = grid();
        let sample = Sampler::new(&grid)
            .build_learning_set(&random(100))
            .await
            .unwrap();
        let unique = sample.draws().into_iter().collect::<BTreeSet<_>>();
        assert_eq!(unique.len(), sample.len());
        assert_eq!(sample.len(), 9 * 4);
    }

    #[tokio::test]
    async fn truncated_to_max_size() {
        let grid = grid();
        for n in [1, 5, 36] {
            let sample = Sampler::new(&grid)
                .build_learning_set(&random(n))
                .await
                .unwrap();
            assert_eq!(sample.len(), n);
        }
    }

    #[tokio::test]
    async fn constrained_rows_stay_in_range() {
        let grid = grid();
        let log_teff = Bounds::new(3.85, 4.05).unwrap();
        let log_g = Bounds::new(4.15, 4.35).unwrap();
        let eta = Bounds::new(5.0, 25.0).unwrap();
        let allowed = grid.models_within(log_teff, log_g).await.unwrap();
        assert!(!allowed.is_empty());
        let request = Request::new(Policy::Constrained, 100, filter(), observed())
            .constrained(Constraints::new(log_teff, log_g, eta))
            .seeded(1);
        let sample = Sampler::new(&grid).build_learning_set(&request).await.unwrap();
        assert_eq!(sample.len(), allowed.len() * 2);
        for entry in sample.entries() {
            assert!(allowed.contains(&entry.draw.model));
            assert!(eta.contains(entry.eta as f64));
        }
    }

    #[tokio::test]
    async fn parameters_resolved_in_one_batch() {
        let grid = grid();
        Sampler::new(&grid)
            .build_learning_set(&random(36))
            .await
            .unwrap();
        assert_eq!(grid.lookups.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn rows_with_gaps_are_dropped() {
        let mut grid = pair();
        let gapped = vec![
            Mode { n: -5, kind: dipole(), freq: 0.5 },
            Mode { n: -3, kind: dipole(), freq: 0.7 },
            Mode { n: -2, kind: dipole(), freq: 0.8 },
        ];
        grid.add_modes(ModelId::from(1), RotationId::from(2), gapped);
        grid.add_modes(ModelId::from(2), RotationId::from(1), vec![]);
        let sample = Sampler::new(&grid)
            .build_learning_set(&random(10))
            .await
            .unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.requested(), 4);
        assert_eq!(sample.rejected(), 2);
    }

    #[tokio::test]
    async fn constrained_without_ranges_fails_before_io() {
        let grid = grid();
        let request = Request::new(Policy::Constrained, 10, filter(), observed());
        let result = Sampler::new(&grid).build_learning_set(&request).await;
        assert!(matches!(result, Err(Error::Configuration(_))));
        assert_eq!(grid.lookups.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn empty_range_is_empty_result() {
        let grid = grid();
        let request = Request::new(Policy::Constrained, 10, filter(), observed())
            .constrained(Constraints::new(
                Bounds::new(6.0, 7.0).unwrap(),
                Bounds::new(0.0, 5.0).unwrap(),
                Bounds::new(0.0, 50.0).unwrap(),
            ));
        let result = Sampler::new(&grid).build_learning_set(&request).await;
        assert!(matches!(result, Err(Error::EmptyResult(_))));
    }

    #[tokio::test]
    async fn unknown_rotation_is_inconsistent() {
        let grid = pair();
        let draws = vec![Draw::new(ModelId::from(1), RotationId::from(9))];
        let result = Sampler::new(&grid)
            .resolve(&draws, &filter(), &observed(), MatchRule::Contiguous)
            .await;
        assert!(matches!(result, Err(Error::InconsistentMatch { .. })));
    }

    #[tokio::test]
    async fn unknown_model_is_inconsistent() {
        let grid = pair();
        let draws = vec![
            Draw::new(ModelId::from(1), RotationId::from(1)),
            Draw::new(ModelId::from(7), RotationId::from(1)),
        ];
        let result = Sampler::new(&grid)
            .resolve(&draws, &filter(), &observed(), MatchRule::Contiguous)
            .await;
        assert!(matches!(
            result,
            Err(Error::InconsistentMatch { expected: 2, found: 1, .. })
        ));
    }
}
