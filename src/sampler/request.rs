use super::*;
use crate::error::Error;
use crate::error::Result;
use crate::grid::*;

/// How model and rotation ids are picked before shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Every model crossed with every rotation rate.
    #[default]
    Random,
    /// Only models inside the log_Teff / log_g ranges and rotation rates
    /// inside the eta range of [`Constraints`].
    Constrained,
}

/// Inclusive ranges for [`Policy::Constrained`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraints {
    pub log_teff: Option<Bounds>,
    pub log_g: Option<Bounds>,
    pub eta: Option<Bounds>,
}

impl Constraints {
    pub fn new(log_teff: Bounds, log_g: Bounds, eta: Bounds) -> Self {
        Self {
            log_teff: Some(log_teff),
            log_g: Some(log_g),
            eta: Some(eta),
        }
    }
    /// All three ranges, or the name of the first one missing.
    pub fn ranges(&self) -> Result<(Bounds, Bounds, Bounds)> {
        let missing = |name: &str| Error::configuration(format!("constrained sampling needs a {} range", name));
        Ok((
            self.log_teff.ok_or_else(|| missing("log_Teff"))?,
            self.log_g.ok_or_else(|| missing("log_g"))?,
            self.eta.ok_or_else(|| missing("eta"))?,
        ))
    }
}

/// Everything one call to
/// [`Sampler::build_learning_set`](super::Sampler::build_learning_set) needs.
#[derive(Debug, Clone)]
pub struct Request {
    pub policy: Policy,
    /// Upper bound on the number of draws before mode matching.
    pub max_size: usize,
    pub constraints: Option<Constraints>,
    pub filter: ModeFilter,
    /// Observed modes each row must line up with, in output column order.
    pub observed: Vec<ObservedMode>,
    pub rule: MatchRule,
    /// Fixes the shuffle; `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Request {
    pub fn new(policy: Policy, max_size: usize, filter: ModeFilter, observed: Vec<ObservedMode>) -> Self {
        Self {
            policy,
            max_size,
            constraints: None,
            filter,
            observed,
            rule: MatchRule::default(),
            seed: None,
        }
    }
    pub fn constrained(self, constraints: Constraints) -> Self {
        Self {
            constraints: Some(constraints),
            ..self
        }
    }
    pub fn seeded(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
    pub fn rule(self, rule: MatchRule) -> Self {
        Self { rule, ..self }
    }

    /// Fails fast, before any store round trip.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::configuration("max_size must be greater than zero"));
        }
        if self.observed.is_empty() {
            return Err(Error::configuration("at least one observed mode is required"));
        }
        if self.policy == Policy::Constrained {
            self.constraints
                .ok_or_else(|| Error::configuration("constrained sampling needs constraint ranges"))?
                .ranges()?;
        }
        Ok(())
    }
}
