//! In-memory grid backing the engine's unit tests.
use crate::Param;
use crate::database::Source;
use crate::error::Result;
use crate::grid::*;
use crate::sampler::Draw;
use crate::sampler::ModeFilter;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    id: ModelId,
    track: TrackId,
    xc: Param,
    log_teff: Param,
    log_g: Param,
}

#[derive(Debug, Default)]
pub struct Memory {
    tracks: Vec<(TrackId, Track)>,
    models: Vec<Snapshot>,
    rotations: Vec<RotationRate>,
    modes: BTreeMap<(ModelId, RotationId), Vec<Mode>>,
    /// Number of batched parameter lookups served.
    pub lookups: AtomicUsize,
}

impl Memory {
    pub fn add_track(&mut self, m_ini: Param, fov: Param, z: Param, logd: Param) -> TrackId {
        let id = TrackId::from(self.tracks.len() as i32 + 1);
        self.tracks.push((id, Track::new(m_ini, fov, z, logd)));
        id
    }
    pub fn add_model(
        &mut self,
        track: TrackId,
        xc: Param,
        log_teff: Param,
        log_g: Param,
    ) -> ModelId {
        let id = ModelId::from(self.models.len() as i32 + 1);
        self.models.push(Snapshot {
            id,
            track,
            xc,
            log_teff,
            log_g,
        });
        id
    }
    pub fn add_rotation(&mut self, eta: Param) -> RotationId {
        let id = RotationId::from(self.rotations.len() as i16 + 1);
        self.rotations.push(RotationRate::new(id, eta));
        id
    }
    pub fn add_modes(&mut self, model: ModelId, rotation: RotationId, modes: Vec<Mode>) {
        self.modes.insert((model, rotation), modes);
    }
    /// Gives every (model, rotation) pair the same radial-order run of one type.
    pub fn uniform_modes(&mut self, kind: ModeType, orders: std::ops::Range<i16>, spacing: Param) {
        let pairs = self
            .models
            .iter()
            .flat_map(|m| self.rotations.iter().map(move |r| (m.id, r.id)))
            .collect::<Vec<_>>();
        for (model, rotation) in pairs {
            let shift = i32::from(model) as Param * 0.01 + i16::from(rotation) as Param * 0.001;
            let modes = orders
                .clone()
                .map(|n| Mode {
                    n,
                    kind,
                    freq: 1.0 + n as Param * spacing + shift,
                })
                .collect();
            self.add_modes(model, rotation, modes);
        }
    }
    fn lookup(&self, id: TrackId) -> Option<Track> {
        self.tracks.iter().find(|(t, _)| *t == id).map(|(_, t)| *t)
    }
    fn value(&self, snapshot: &Snapshot, axis: Axis) -> Option<Param> {
        match axis {
            Axis::Hydrogen => Some(snapshot.xc),
            Axis::Rotation => None,
            axis => self.lookup(snapshot.track).and_then(|t| t.value(axis)),
        }
    }
}

fn sorted(mut values: Vec<Param>) -> Vec<Param> {
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    values
}

#[async_trait::async_trait]
impl Source for Memory {
    async fn models(&self) -> Result<Vec<ModelId>> {
        Ok(self.models.iter().map(|m| m.id).collect())
    }
    async fn models_within(&self, log_teff: Bounds, log_g: Bounds) -> Result<Vec<ModelId>> {
        Ok(self
            .models
            .iter()
            .filter(|m| log_teff.contains(m.log_teff as f64))
            .filter(|m| log_g.contains(m.log_g as f64))
            .map(|m| m.id)
            .collect())
    }
    async fn models_inside(&self, ranges: &[(Axis, Bounds)]) -> Result<Vec<ModelId>> {
        Ok(self
            .models
            .iter()
            .filter(|m| {
                ranges.iter().all(|(axis, b)| {
                    self.value(m, *axis)
                        .map_or(false, |x| b.contains(x as f64))
                })
            })
            .map(|m| m.id)
            .collect())
    }
    async fn rotations(&self) -> Result<Vec<RotationRate>> {
        Ok(self.rotations.clone())
    }
    async fn rotations_within(&self, eta: Bounds) -> Result<Vec<RotationId>> {
        Ok(self
            .rotations
            .iter()
            .filter(|r| eta.contains(r.eta as f64))
            .map(|r| r.id)
            .collect())
    }
    async fn params(&self, models: &[ModelId]) -> Result<Vec<(ModelId, Params)>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .models
            .iter()
            .filter(|m| models.contains(&m.id))
            .filter_map(|m| {
                self.lookup(m.track)
                    .map(|track| (m.id, Params { track, xc: m.xc }))
            })
            .collect())
    }
    async fn modes(&self, draws: &[Draw], filter: &ModeFilter) -> Result<Vec<Vec<Mode>>> {
        Ok(draws
            .iter()
            .map(|d| {
                let mut modes = self
                    .modes
                    .get(&(d.model, d.rotation))
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|m| filter.types().contains(&m.kind))
                    .filter(|m| filter.window().contains(m.freq as f64))
                    .collect::<Vec<_>>();
                modes.sort_by_key(|m| (m.kind, m.n));
                modes
            })
            .collect())
    }
    async fn distinct(&self, axis: Axis) -> Result<Vec<Param>> {
        Ok(sorted(match axis {
            Axis::Rotation => self.rotations.iter().map(|r| r.eta).collect(),
            Axis::Hydrogen => self.models.iter().map(|m| m.xc).collect(),
            axis => self
                .tracks
                .iter()
                .filter_map(|(_, t)| t.value(axis))
                .collect(),
        }))
    }
    async fn mixing(&self) -> Result<Vec<(Param, Param)>> {
        let mut pairs = self
            .tracks
            .iter()
            .map(|(_, t)| (t.m_ini, t.logd))
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        pairs.dedup();
        Ok(pairs)
    }
    async fn track(&self, track: Track) -> Result<Option<TrackId>> {
        Ok(self
            .tracks
            .iter()
            .find(|(_, t)| *t == track)
            .map(|(id, _)| *id))
    }
    async fn centrals(&self, track: TrackId) -> Result<Vec<Param>> {
        Ok(sorted(
            self.models
                .iter()
                .filter(|m| m.track == track)
                .map(|m| m.xc)
                .collect(),
        ))
    }
}
