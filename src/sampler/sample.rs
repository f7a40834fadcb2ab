use super::*;
use crate::Frequency;
use crate::Param;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

/// One kept row of a learning set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub draw: Draw,
    pub params: Params,
    pub eta: Param,
    /// Matched theoretical frequencies, aligned with the observed modes.
    pub frequencies: Vec<Frequency>,
    pub orders: Vec<i16>,
    pub kinds: Vec<ModeType>,
}

impl Entry {
    pub fn new(draw: Draw, params: Params, eta: Param, matched: Matched) -> Self {
        Self {
            draw,
            params,
            eta,
            frequencies: matched.frequencies,
            orders: matched.orders,
            kinds: matched.kinds,
        }
    }
    /// M_ini, fov, Z, logD, Xc, eta.
    pub fn features(&self) -> [Param; 6] {
        self.params.features(self.eta)
    }
}

/// A learning set: kept rows in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    entries: Vec<Entry>,
    /// Number of draws attempted.
    requested: usize,
    /// Draws dropped by mode matching.
    rejected: usize,
}

impl Sample {
    pub fn new(entries: Vec<Entry>, requested: usize) -> Self {
        let rejected = requested.saturating_sub(entries.len());
        Self {
            entries,
            requested,
            rejected,
        }
    }
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn requested(&self) -> usize {
        self.requested
    }
    pub fn rejected(&self) -> usize {
        self.rejected
    }
    pub fn draws(&self) -> Vec<Draw> {
        self.entries.iter().map(|e| e.draw).collect()
    }
    /// Number of matched frequencies per row.
    pub fn width(&self) -> usize {
        self.entries.first().map_or(0, |e| e.frequencies.len())
    }

    /// Column headers: the six attributes, then one per matched frequency.
    pub fn columns(&self) -> Vec<String> {
        Axis::ALL
            .iter()
            .map(|a| a.name().to_string())
            .chain((1..=self.width()).map(|i| format!("f{}", i)))
            .collect()
    }
    /// Rows × (M_ini, fov, Z, logD, Xc, eta).
    pub fn features(&self) -> Array2<Param> {
        Array2::from_shape_fn((self.len(), Axis::ALL.len()), |(i, j)| {
            self.entries[i].features()[j]
        })
    }
    /// Rows × matched frequencies.
    pub fn frequencies(&self) -> Array2<Frequency> {
        Array2::from_shape_fn((self.len(), self.width()), |(i, j)| {
            self.entries[i].frequencies[j]
        })
    }

    /// Shuffles the rows and splits them into training, cross-validation
    /// and test sets. Rows left over by the percentages are discarded.
    pub fn partition(&self, split: Split, seed: u64) -> Partition {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut rows = self.entries.clone();
        rows.shuffle(&mut rng);
        let n = rows.len();
        let take = |pct: u8| n * pct as usize / 100;
        let mut rest = rows.into_iter();
        let mut part = |k: usize| {
            let entries = rest.by_ref().take(k).collect::<Vec<_>>();
            Sample::new(entries, k)
        };
        let training = part(take(split.training));
        let validation = part(take(split.validation));
        let test = part(take(split.test));
        Partition {
            training,
            validation,
            test,
        }
    }
}

/// Percentages of a learning set assigned to each partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    training: u8,
    validation: u8,
    test: u8,
}

impl Split {
    pub fn new(training: u8, validation: u8, test: u8) -> Result<Self> {
        match training as u16 + validation as u16 + test as u16 {
            total if total > 100 => Err(Error::configuration(format!(
                "split percentages sum to {} > 100",
                total
            ))),
            _ => Ok(Self {
                training,
                validation,
                test,
            }),
        }
    }
}

impl Default for Split {
    fn default() -> Self {
        Self {
            training: 60,
            validation: 20,
            test: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub training: Sample,
    pub validation: Sample,
    pub test: Sample,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(model: i32, eta: Param) -> Entry {
        let params = Params {
            track: Track::new(model as Param, 0.01, 0.014, 1.0),
            xc: 0.5,
        };
        let matched = Matched {
            frequencies: vec![1.0 + model as Frequency, 2.0],
            orders: vec![-2, -1],
            kinds: vec![ModeType::new(1, 0).unwrap(); 2],
        };
        Entry::new(
            Draw::new(ModelId::from(model), RotationId::from(1)),
            params,
            eta,
            matched,
        )
    }

    fn sample(n: i32) -> Sample {
        Sample::new((1..=n).map(|m| entry(m, 5.0)).collect(), n as usize + 2)
    }

    #[test]
    fn matrices_follow_row_order() {
        let sample = sample(3);
        let x = sample.features();
        let y = sample.frequencies();
        assert_eq!(x.dim(), (3, 6));
        assert_eq!(y.dim(), (3, 2));
        assert_eq!(x[[1, 0]], 2.0);
        assert_eq!(x[[2, 5]], 5.0);
        assert_eq!(y[[2, 0]], 4.0);
        assert_eq!(sample.rejected(), 2);
        assert_eq!(
            sample.columns(),
            vec!["M_ini", "fov", "Z", "logD", "Xc", "eta", "f1", "f2"]
        );
    }

    #[test]
    fn partition_sizes_and_disjointness() {
        let sample = sample(10);
        let parts = sample.partition(Split::new(60, 20, 20).unwrap(), 7);
        assert_eq!(parts.training.len(), 6);
        assert_eq!(parts.validation.len(), 2);
        assert_eq!(parts.test.len(), 2);
        let mut all = [parts.training.draws(), parts.validation.draws(), parts.test.draws()].concat();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 10);
    }

    #[test]
    fn partition_is_seeded() {
        let sample = sample(10);
        let a = sample.partition(Split::default(), 3);
        let b = sample.partition(Split::default(), 3);
        assert_eq!(a, b);
    }

    #[test]
    fn split_over_one_hundred_rejected() {
        assert!(Split::new(80, 20, 10).is_err());
        assert!(Split::new(50, 25, 25).is_ok());
    }

    #[test]
    fn empty_sample_has_empty_matrices() {
        let sample = Sample::default();
        assert_eq!(sample.features().dim(), (0, 6));
        assert_eq!(sample.frequencies().dim(), (0, 0));
    }
}
