use crate::Frequency;
use crate::grid::*;
use serde::Deserialize;
use serde::Serialize;

/// How a draw's theoretical modes are lined up with the observed modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchRule {
    /// Exactly one theoretical mode per observed mode, with no gap in radial
    /// order within any mode type. Both sides are paired in frequency order.
    #[default]
    Contiguous,
    /// Same count and radial-order requirements, but each observed mode, in
    /// turn, takes the closest compatible theoretical mode not already taken.
    Nearest,
}

/// Why a draw's modes could not be lined up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    TooFew { expected: usize, found: usize },
    TooMany { expected: usize, found: usize },
    Gap { kind: ModeType, after: i16, next: i16 },
    TypeMismatch { observed: usize, kind: ModeType },
    OrderMismatch { observed: usize, n: i16 },
    NoCandidate { observed: usize },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFew { expected, found } => write!(f, "too few modes ({} < {})", found, expected),
            Self::TooMany { expected, found } => write!(f, "too many modes ({} > {})", found, expected),
            Self::Gap { kind, after, next } => write!(f, "radial order gap {} -> {} in {}", after, next, kind),
            Self::TypeMismatch { observed, kind } => write!(f, "observed mode {} cannot be {}", observed, kind),
            Self::OrderMismatch { observed, n } => write!(f, "observed mode {} cannot have radial order {}", observed, n),
            Self::NoCandidate { observed } => write!(f, "no compatible mode left for observed mode {}", observed),
        }
    }
}

/// Theoretical modes aligned one-to-one with the observed list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matched {
    pub frequencies: Vec<Frequency>,
    pub orders: Vec<i16>,
    pub kinds: Vec<ModeType>,
}

impl Matched {
    fn from_pairs(pairs: Vec<Mode>) -> Self {
        Self {
            frequencies: pairs.iter().map(|m| m.freq).collect(),
            orders: pairs.iter().map(|m| m.n).collect(),
            kinds: pairs.iter().map(|m| m.kind).collect(),
        }
    }
}

impl MatchRule {
    /// Aligns `modes` (ordered by type, then radial order) with `observed`.
    /// The result is in observed order.
    pub fn apply(&self, modes: &[Mode], observed: &[ObservedMode]) -> Result<Matched, Rejection> {
        match self {
            Self::Contiguous => contiguous(modes, observed),
            Self::Nearest => nearest(modes, observed),
        }
    }
}

/// Exact count, and consecutive radial orders within each mode type.
fn shape(modes: &[Mode], expected: usize) -> Result<(), Rejection> {
    let found = modes.len();
    if found < expected {
        return Err(Rejection::TooFew { expected, found });
    }
    if found > expected {
        return Err(Rejection::TooMany { expected, found });
    }
    match modes
        .windows(2)
        .find(|w| w[0].kind == w[1].kind && w[1].n != w[0].n + 1)
    {
        Some(w) => Err(Rejection::Gap {
            kind: w[0].kind,
            after: w[0].n,
            next: w[1].n,
        }),
        None => Ok(()),
    }
}

fn compatible(slot: usize, observed: &ObservedMode, mode: &Mode) -> Result<(), Rejection> {
    if !observed.accepts_type(mode.kind) {
        return Err(Rejection::TypeMismatch {
            observed: slot,
            kind: mode.kind,
        });
    }
    if !observed.accepts_order(mode.n) {
        return Err(Rejection::OrderMismatch {
            observed: slot,
            n: mode.n,
        });
    }
    Ok(())
}

fn contiguous(modes: &[Mode], observed: &[ObservedMode]) -> Result<Matched, Rejection> {
    let expected = observed.len();
    shape(modes, expected)?;
    let mut theory = modes.to_vec();
    theory.sort_by(|a, b| a.freq.total_cmp(&b.freq));
    let mut order = (0..expected).collect::<Vec<_>>();
    order.sort_by(|a, b| observed[*a].per_day().total_cmp(&observed[*b].per_day()));
    let mut pairs = vec![None; expected];
    for (slot, mode) in order.into_iter().zip(theory) {
        compatible(slot, &observed[slot], &mode)?;
        pairs[slot] = Some(mode);
    }
    Ok(Matched::from_pairs(pairs.into_iter().flatten().collect()))
}

fn nearest(modes: &[Mode], observed: &[ObservedMode]) -> Result<Matched, Rejection> {
    shape(modes, observed.len())?;
    let mut taken = vec![false; modes.len()];
    let mut pairs = Vec::with_capacity(observed.len());
    for (slot, obs) in observed.iter().enumerate() {
        let target = obs.per_day();
        let (j, mode) = modes
            .iter()
            .enumerate()
            .filter(|(j, m)| !taken[*j] && obs.accepts(m))
            .min_by(|(_, a), (_, b)| (a.freq - target).abs().total_cmp(&(b.freq - target).abs()))
            .ok_or(Rejection::NoCandidate { observed: slot })?;
        taken[j] = true;
        pairs.push(*mode);
    }
    Ok(Matched::from_pairs(pairs))
}
