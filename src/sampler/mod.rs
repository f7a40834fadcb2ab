//! Learning-set sampling.
//!
//! A learning set is drawn in four steps:
//!
//! 1. pick model ids and rotation ids (all of them, or those inside
//!    log_Teff / log_g / eta ranges), shuffle each, pair them up and
//!    truncate to the requested size;
//! 2. resolve each draw's eta through a [`RotationLookup`](crate::RotationLookup)
//!    and its track parameters through one batched query;
//! 3. fetch each draw's theoretical modes through a prepared statement and
//!    match them against the observed modes, dropping draws that do not line up;
//! 4. assemble the survivors, in draw order, into a [`Sample`].
mod draw;
mod filter;
mod matching;
mod request;
mod sample;
mod sampler;

pub use draw::*;
pub use filter::*;
pub use matching::*;
pub use request::*;
pub use sample::*;
pub use sampler::*;
