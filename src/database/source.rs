use crate::Param;
use crate::error::Result;
use crate::grid::*;
use crate::sampler::Draw;
use crate::sampler::ModeFilter;

/// Source defines the read interface between the engine and the grid store.
/// All SELECT queries are consolidated behind it, decoupling SQL from the
/// sampling and interpolation logic.
///
/// Every method is one blocking round trip (or, for [`Source::modes`], one
/// prepared statement executed once per draw). Nothing is cached between
/// calls.
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    /// Every model id in the grid.
    async fn models(&self) -> Result<Vec<ModelId>>;
    /// Model ids whose log_Teff and log_g fall inside the given ranges.
    async fn models_within(&self, log_teff: Bounds, log_g: Bounds) -> Result<Vec<ModelId>>;
    /// Model ids inside a box over track axes and Xc.
    async fn models_inside(&self, ranges: &[(Axis, Bounds)]) -> Result<Vec<ModelId>>;
    /// Every rotation rate.
    async fn rotations(&self) -> Result<Vec<RotationRate>>;
    /// Rotation ids whose eta falls inside the given range.
    async fn rotations_within(&self, eta: Bounds) -> Result<Vec<RotationId>>;
    /// Track parameters and Xc of each distinct model, in one batch.
    async fn params(&self, models: &[ModelId]) -> Result<Vec<(ModelId, Params)>>;
    /// Modes passing `filter` for each draw, ordered by type then radial order.
    async fn modes(&self, draws: &[Draw], filter: &ModeFilter) -> Result<Vec<Vec<Mode>>>;
    /// Distinct ascending values of a track axis or of eta.
    async fn distinct(&self, axis: Axis) -> Result<Vec<Param>>;
    /// Distinct (M_ini, logD) pairs over all tracks.
    async fn mixing(&self) -> Result<Vec<(Param, Param)>>;
    /// Id of the track with exactly these parameters.
    async fn track(&self, track: Track) -> Result<Option<TrackId>>;
    /// Distinct ascending Xc values along one track.
    async fn centrals(&self, track: TrackId) -> Result<Vec<Param>>;
}

#[cfg(feature = "database")]
mod postgres {
    use super::*;
    use crate::MODELS;
    use crate::MODELS_TRACKS;
    use crate::MODES;
    use crate::ROTATION_RATES;
    use crate::TRACKS;
    use crate::error::Error;
    use crate::query::*;
    use std::sync::Arc;
    use tokio_postgres::Client;
    use tokio_postgres::Row;
    use tokio_postgres::types::ToSql;

    fn params(query: &Query) -> Vec<&(dyn ToSql + Sync)> {
        query
            .binds()
            .iter()
            .map(|b| b as &(dyn ToSql + Sync))
            .collect()
    }

    async fn fetch(client: &Client, query: Query) -> Result<Vec<Row>> {
        log::debug!("{}", query.sql());
        Ok(client.query(query.sql(), &params(&query)).await?)
    }

    fn modes_query(draw: Draw, filter: &ModeFilter) -> Query {
        Select::from(MODES, &["n", "id_type", "freq"])
            .equals("id_model", i32::from(draw.model))
            .equals("id_rot", i16::from(draw.rotation))
            .within(
                "id_type",
                filter.types().iter().map(|t| i16::from(*t) as i64).collect(),
            )
            .between("freq", filter.window())
            .order_by("id_type")
            .order_by("n")
            .build()
    }

    #[rustfmt::skip]
    #[async_trait::async_trait]
    impl Source for Client {
        async fn models(&self) -> Result<Vec<ModelId>> {
            let query = unconstrained_query(MODELS, &["id"]);
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| ModelId::from(row.get::<_, i32>(0)))
                .collect())
        }
        async fn models_within(&self, log_teff: Bounds, log_g: Bounds) -> Result<Vec<ModelId>> {
            let query = ranged_query(MODELS, &["id"], &["log_teff", "log_g"], &[log_teff, log_g])?;
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| ModelId::from(row.get::<_, i32>(0)))
                .collect())
        }
        async fn models_inside(&self, ranges: &[(Axis, Bounds)]) -> Result<Vec<ModelId>> {
            if let Some((axis, _)) = ranges.iter().find(|(a, _)| *a == Axis::Rotation) {
                return Err(Error::configuration(format!("{} is not a model attribute", axis)));
            }
            let keys = ranges.iter().map(|(a, _)| a.column()).collect::<Vec<_>>();
            let bounds = ranges.iter().map(|(_, b)| *b).collect::<Vec<_>>();
            let query = ranged_query(MODELS_TRACKS, &["m.id"], &keys, &bounds)?;
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| ModelId::from(row.get::<_, i32>(0)))
                .collect())
        }
        async fn rotations(&self) -> Result<Vec<RotationRate>> {
            let query = unconstrained_query(ROTATION_RATES, &["id", "eta"]);
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| RotationRate::new(RotationId::from(row.get::<_, i16>(0)), row.get::<_, Param>(1)))
                .collect())
        }
        async fn rotations_within(&self, eta: Bounds) -> Result<Vec<RotationId>> {
            let query = ranged_query(ROTATION_RATES, &["id"], &["eta"], &[eta])?;
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| RotationId::from(row.get::<_, i16>(0)))
                .collect())
        }
        async fn params(&self, models: &[ModelId]) -> Result<Vec<(ModelId, Params)>> {
            let ids = models.iter().map(|m| i32::from(*m) as i64).collect();
            let query = join_by_ids(
                MODELS_TRACKS,
                &["m.id", "t.m_ini", "t.fov", "t.z", "t.logd", "m.xc"],
                "m.id",
                ids,
            )?;
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| {
                    let id = ModelId::from(row.get::<_, i32>(0));
                    let track = Track::new(
                        row.get::<_, Param>(1),
                        row.get::<_, Param>(2),
                        row.get::<_, Param>(3),
                        row.get::<_, Param>(4),
                    );
                    let xc = row.get::<_, Param>(5);
                    (id, Params { track, xc })
                })
                .collect())
        }
        async fn modes(&self, draws: &[Draw], filter: &ModeFilter) -> Result<Vec<Vec<Mode>>> {
            let Some(first) = draws.first() else {
                return Ok(Vec::new());
            };
            let template = modes_query(*first, filter);
            log::debug!("prepare {}", template.sql());
            let statement = self.prepare(template.sql()).await?;
            let mut modes = Vec::with_capacity(draws.len());
            for draw in draws {
                let query = modes_query(*draw, filter);
                let found = self
                    .query(&statement, &params(&query))
                    .await?
                    .iter()
                    .map(|row| -> Result<Mode> {
                        Ok(Mode {
                            n: row.get::<_, i16>(0),
                            kind: ModeType::try_from(row.get::<_, i16>(1))?,
                            freq: row.get::<_, f32>(2),
                        })
                    })
                    .collect::<Result<Vec<Mode>>>()?;
                modes.push(found);
            }
            Ok(modes)
        }
        async fn distinct(&self, axis: Axis) -> Result<Vec<Param>> {
            if axis == Axis::Hydrogen {
                return Err(Error::configuration("Xc is only meaningful along one track"));
            }
            let query = distinct_query(axis.table(), &[axis.field()]);
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| row.get::<_, Param>(0))
                .collect())
        }
        async fn mixing(&self) -> Result<Vec<(Param, Param)>> {
            let query = distinct_query(TRACKS, &["m_ini", "logd"]);
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| (row.get::<_, Param>(0), row.get::<_, Param>(1)))
                .collect())
        }
        async fn track(&self, track: Track) -> Result<Option<TrackId>> {
            let query = equality_query(
                TRACKS,
                &["id"],
                &["m_ini", "fov", "z", "logd"],
                vec![track.m_ini.into(), track.fov.into(), track.z.into(), track.logd.into()],
            )?;
            Ok(fetch(self, query)
                .await?
                .first()
                .map(|row| TrackId::from(row.get::<_, i32>(0))))
        }
        async fn centrals(&self, track: TrackId) -> Result<Vec<Param>> {
            let query = Select::from(MODELS, &["xc"])
                .distinct()
                .equals("id_track", i32::from(track))
                .order_by("xc")
                .build();
            Ok(fetch(self, query)
                .await?
                .iter()
                .map(|row| row.get::<_, Param>(0))
                .collect())
        }
    }

    #[async_trait::async_trait]
    impl Source for Arc<Client> {
        async fn models(&self) -> Result<Vec<ModelId>> {
            self.as_ref().models().await
        }
        async fn models_within(&self, log_teff: Bounds, log_g: Bounds) -> Result<Vec<ModelId>> {
            self.as_ref().models_within(log_teff, log_g).await
        }
        async fn models_inside(&self, ranges: &[(Axis, Bounds)]) -> Result<Vec<ModelId>> {
            self.as_ref().models_inside(ranges).await
        }
        async fn rotations(&self) -> Result<Vec<RotationRate>> {
            self.as_ref().rotations().await
        }
        async fn rotations_within(&self, eta: Bounds) -> Result<Vec<RotationId>> {
            self.as_ref().rotations_within(eta).await
        }
        async fn params(&self, models: &[ModelId]) -> Result<Vec<(ModelId, Params)>> {
            self.as_ref().params(models).await
        }
        async fn modes(&self, draws: &[Draw], filter: &ModeFilter) -> Result<Vec<Vec<Mode>>> {
            self.as_ref().modes(draws, filter).await
        }
        async fn distinct(&self, axis: Axis) -> Result<Vec<Param>> {
            self.as_ref().distinct(axis).await
        }
        async fn mixing(&self) -> Result<Vec<(Param, Param)>> {
            self.as_ref().mixing().await
        }
        async fn track(&self, track: Track) -> Result<Option<TrackId>> {
            self.as_ref().track(track).await
        }
        async fn centrals(&self, track: TrackId) -> Result<Vec<Param>> {
            self.as_ref().centrals(track).await
        }
    }
}
