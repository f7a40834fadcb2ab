//! Grid Sampling Binary
//!
//! Draws learning sets, builds meshes and interpolates around anchors
//! against the grid named by `DB_URL`. Results are printed as JSON.

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use seismogrid::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Draw a learning set of matched grid rows", alias = "s")]
    Sample {
        #[command(flatten)]
        modes: Modes,
        /// Restrict draws to the log_Teff, log_g and eta ranges
        #[arg(long)]
        constrained: bool,
        /// Upper bound on the number of rows
        #[arg(long, default_value_t = 1000)]
        size: usize,
        /// Shuffle seed; drawn from the OS when absent
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = bounds)]
        teff: Option<Bounds>,
        #[arg(long, value_parser = bounds)]
        logg: Option<Bounds>,
        #[arg(long, value_parser = bounds)]
        eta: Option<Bounds>,
        /// Training, cross-validation and test percentages, e.g. 60:20:20
        #[arg(long, value_parser = split)]
        split: Option<Split>,
    },
    #[command(about = "Build a mesh, or estimate its size", alias = "m")]
    Mesh {
        /// Axis declaration NAME:LO:HI:STEPS, or NAME:off
        #[arg(long = "axis", required = true, value_parser = axis_spec)]
        axes: Vec<(Axis, AxisSpec)>,
        /// Only report the point count
        #[arg(long)]
        dry_run: bool,
    },
    #[command(about = "Interpolate frequencies around an anchor model", alias = "a")]
    Anchor {
        #[command(flatten)]
        modes: Modes,
        /// Anchor coordinate NAME=VALUE, one per axis
        #[arg(long = "at", required = true, value_parser = assignment::<Param>)]
        anchor: Vec<(Axis, Param)>,
        /// Neighbour count NAME=COUNT
        #[arg(long = "take", required = true, value_parser = assignment::<usize>)]
        neighbors: Vec<(Axis, usize)>,
        /// Mesh axis declaration NAME:LO:HI:STEPS, or NAME:off
        #[arg(long = "axis", required = true, value_parser = axis_spec)]
        axes: Vec<(Axis, AxisSpec)>,
        /// Use nearest-neighbour instead of inverse-distance weighting
        #[arg(long)]
        nearest: bool,
        #[arg(long, default_value_t = IDW_POWER)]
        power: f64,
    },
}

/// Observed modes and the theoretical modes eligible to match them.
#[derive(Args)]
struct Modes {
    /// Observed frequencies
    #[arg(long = "freq", required = true, num_args = 1..)]
    freqs: Vec<f32>,
    /// Unit of the observed frequencies: cd, Hz or uHz
    #[arg(long, default_value = "cd", value_parser = unit)]
    unit: Unit,
    /// Eligible mode types L:M
    #[arg(long = "mode", required = true, value_parser = mode_type)]
    types: Vec<ModeType>,
    /// Frequency window LO:HI in cycles per day
    #[arg(long, value_parser = bounds)]
    window: Bounds,
    /// Greedy nearest matching instead of contiguous radial orders
    #[arg(long)]
    nearest_match: bool,
}

impl Modes {
    fn filter(&self) -> Result<ModeFilter> {
        ModeFilter::new(self.types.clone(), self.window)
    }
    fn observed(&self) -> Vec<ObservedMode> {
        self.freqs
            .iter()
            .map(|f| ObservedMode::new(*f, self.unit))
            .collect()
    }
    fn rule(&self) -> MatchRule {
        match self.nearest_match {
            true => MatchRule::Nearest,
            false => MatchRule::Contiguous,
        }
    }
}

fn bounds(s: &str) -> std::result::Result<Bounds, String> {
    let (lo, hi) = s.split_once(':').ok_or("expected LO:HI")?;
    let lo = lo.parse::<f64>().map_err(|e| e.to_string())?;
    let hi = hi.parse::<f64>().map_err(|e| e.to_string())?;
    Bounds::new(lo, hi).map_err(|e| e.to_string())
}

fn split(s: &str) -> std::result::Result<Split, String> {
    let parts = s
        .split(':')
        .map(|p| p.parse::<u8>().map_err(|e| e.to_string()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [training, validation, test] => {
            Split::new(*training, *validation, *test).map_err(|e| e.to_string())
        }
        _ => Err("expected TRAIN:CV:TEST".to_string()),
    }
}

fn unit(s: &str) -> std::result::Result<Unit, String> {
    Unit::try_from(s).map_err(|e| e.to_string())
}

fn mode_type(s: &str) -> std::result::Result<ModeType, String> {
    let (l, m) = s.split_once(':').ok_or("expected L:M")?;
    let l = l.parse::<u8>().map_err(|e| e.to_string())?;
    let m = m.parse::<i8>().map_err(|e| e.to_string())?;
    ModeType::new(l, m).map_err(|e| e.to_string())
}

fn assignment<T>(s: &str) -> std::result::Result<(Axis, T), String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let (name, value) = s.split_once('=').ok_or("expected NAME=VALUE")?;
    let axis = Axis::try_from(name).map_err(|e| e.to_string())?;
    let value = value.parse::<T>().map_err(|e| e.to_string())?;
    Ok((axis, value))
}

fn axis_spec(s: &str) -> std::result::Result<(Axis, AxisSpec), String> {
    let parts = s.split(':').collect::<Vec<_>>();
    let axis = parts
        .first()
        .ok_or("expected NAME:LO:HI:STEPS")
        .and_then(|n| Axis::try_from(*n).map_err(|_| "unknown axis"))?;
    match parts[1..] {
        ["off"] => Ok((axis, AxisSpec::excluded())),
        [lo, hi, steps] => {
            let range = bounds(&format!("{}:{}", lo, hi))?;
            let steps = steps.parse::<usize>().map_err(|e| e.to_string())?;
            AxisSpec::new(range, steps)
                .map(|spec| (axis, spec))
                .map_err(|e| e.to_string())
        }
        _ => Err("expected NAME:LO:HI:STEPS or NAME:off".to_string()),
    }
}

fn declare(axes: Vec<(Axis, AxisSpec)>) -> Result<InterpolationSpec> {
    axes.into_iter()
        .try_fold(InterpolationSpec::new(), |spec, (axis, s)| spec.declare(axis, s))
}

fn per_axis<T: Default + Copy>(pairs: &[(Axis, T)]) -> PerAxis<T> {
    let mut values = PerAxis::<T>::default();
    for (axis, value) in pairs {
        *values.get_mut(*axis) = *value;
    }
    values
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    match Cli::parse().command {
        Command::Sample {
            modes,
            constrained,
            size,
            seed,
            teff,
            logg,
            eta,
            split,
        } => {
            let policy = match constrained {
                true => Policy::Constrained,
                false => Policy::Random,
            };
            let constraints = Constraints::new(
                teff.map_or_else(|| Bounds::try_from(DEFAULT_LOG_TEFF), Ok)?,
                logg.map_or_else(|| Bounds::try_from(DEFAULT_LOG_G), Ok)?,
                eta.map_or_else(|| Bounds::try_from(DEFAULT_ETA), Ok)?,
            );
            let mut request = Request::new(policy, size, modes.filter()?, modes.observed())
                .constrained(constraints)
                .rule(modes.rule());
            request.seed = seed;
            let ref client = db().await?;
            let sample = Sampler::new(client).build_learning_set(&request).await?;
            match split {
                None => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "columns": sample.columns(),
                        "sample": sample,
                    }))?
                ),
                Some(split) => {
                    let parts = sample.partition(split, seed.unwrap_or_default());
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "training": parts.training,
                            "validation": parts.validation,
                            "test": parts.test,
                        }))?
                    );
                }
            }
        }
        Command::Mesh { axes, dry_run } => {
            let spec = declare(axes)?;
            let mut builder = MeshBuilder::default();
            let points = builder.check(&spec)?;
            let json = match dry_run {
                true => serde_json::json!({ "points": points }),
                false => {
                    let mesh = builder.prepare(&spec)?;
                    serde_json::json!({
                        "axes": mesh.axes().iter().map(Axis::name).collect::<Vec<_>>(),
                        "shape": mesh.grid().shape(),
                        "coords": mesh.coords(),
                    })
                }
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::Anchor {
            modes,
            anchor,
            neighbors,
            axes,
            nearest,
            power,
        } => {
            let collection = Collection::Anchor {
                anchor: per_axis(&anchor),
                neighbors: per_axis(&neighbors),
            };
            let method = match nearest {
                true => Method::Nearest,
                false => Method::InverseDistance { power },
            };
            let ref client = db().await?;
            let result = Interpolator::new(client, declare(axes)?, modes.filter()?, modes.observed())
                .rule(modes.rule())
                .method(method)
                .interpolate(&collection)
                .await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "axes": result.axes.iter().map(Axis::name).collect::<Vec<_>>(),
                    "coords": result.coords,
                    "frequencies": result
                        .frequencies
                        .outer_iter()
                        .map(|row| row.to_vec())
                        .collect::<Vec<_>>(),
                    "inputs": result.inputs.len(),
                }))?
            );
        }
    }
    Ok(())
}
