//! Learning-set sampling and mesh-grid interpolation over a precomputed
//! grid of stellar evolution tracks and their pulsation frequencies.
//!
//! The grid lives in PostgreSQL (tracks → models → modes, with a shared
//! table of rotation rates). This crate draws reproducible subsets of
//! (model, rotation) pairs from it, matches each draw's theoretical modes
//! against an observed star, and builds N-dimensional meshes on which
//! synthetic frequencies can be interpolated.
//!
//! - [`sampler`]: learning-set draws, resolution, mode matching
//! - [`interpolation`]: mesh construction, anchor neighbourhoods, evaluation
//! - [`query`]: parametrized SQL generation
//! - [`database`]: the [`Source`] read interface and its PostgreSQL backing
pub mod database;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod query;
pub mod sampler;

pub use database::*;
pub use error::*;
pub use grid::*;
pub use interpolation::*;
pub use query::*;
pub use sampler::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Physical grid attributes as stored (`REAL` columns).
pub type Param = f32;
/// Pulsation frequencies, in cycles per day unless stated otherwise.
pub type Frequency = f32;
/// Mesh coordinates and interpolation arithmetic.
pub type Coordinate = f64;

// ============================================================================
// TABLE NAMES
// ============================================================================
/// Evolution tracks, unique on (M_ini, fov, Z, logD).
#[rustfmt::skip]
pub const TRACKS:         &str = "tracks";
/// Evolutionary snapshots along a track.
#[rustfmt::skip]
pub const MODELS:         &str = "models";
/// Discrete rotation rates (percent of critical).
#[rustfmt::skip]
pub const ROTATION_RATES: &str = "rotation_rates";
/// Theoretical modes per (model, rotation rate).
#[rustfmt::skip]
pub const MODES:          &str = "modes";
/// Models joined to their owning track, for box queries across both.
#[rustfmt::skip]
pub const MODELS_TRACKS:  &str = const_format::concatcp!(
    MODELS, " m JOIN ", TRACKS, " t ON m.id_track = t.id"
);

// ============================================================================
// SAMPLING PARAMETERS
// ============================================================================
/// Decimal places used to key rotation rates by their eta value.
pub const ETA_DECIMALS: usize = 2;
/// Default inclusive log_Teff range for constrained sampling.
pub const DEFAULT_LOG_TEFF: (f64, f64) = (3.5, 5.0);
/// Default inclusive log_g range for constrained sampling.
pub const DEFAULT_LOG_G: (f64, f64) = (0.0, 5.0);
/// Default inclusive eta range for constrained sampling.
pub const DEFAULT_ETA: (f64, f64) = (0.0, 51.0);

// ============================================================================
// MESH PARAMETERS
// ============================================================================
/// Refuse to materialise meshes holding more coordinates than this,
/// counting one `Coordinate` per included axis per point (1 GiB).
pub const MESH_COORDINATE_LIMIT: usize = 1 << 27;
/// Exponent for inverse-distance weighting when none is given.
pub const IDW_POWER: Coordinate = 2.0;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
