use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use downmix::perturb::perturb;
use downmix::raster::Raster;
use gamma_split::{
    AxisPreference, DitherPattern, FilterMode, Inverter, PairSolver, PickPolicy, SrgbPairAverage,
    Strategy,
};

#[derive(Parser)]
#[command(name = "downmix")]
#[command(
    about = "Mix two images so one shows at native size and the other after naive downscaling"
)]
struct Cli {
    /// Image shown by gamma-aware viewers and correct downscaling
    #[arg(long)]
    srgb: PathBuf,

    /// Image revealed by naive (sRGB-space) downscaling
    #[arg(long)]
    linear: PathBuf,

    /// Output PNG (16-bit RGBA)
    #[arg(long, short)]
    out: PathBuf,

    /// Filter strength (0 = no effect, 255 = full excursion)
    #[arg(long, default_value_t = 255)]
    strength: u8,

    /// How the hidden image steers the naively downscaled appearance
    #[arg(long, value_enum, default_value_t = Mode::DarkenLinear)]
    mode: Mode,

    /// Pair-solving strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::Table)]
    strategy: StrategyKind,

    /// Axis the inverse-table gap filling favors
    #[arg(long, value_enum, default_value_t = Prefer::Auto)]
    prefer: Prefer,

    /// Tie-break terms for the inverse table (comma separated)
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [Pick::Closest])]
    pick: Vec<Pick>,

    /// Break remaining table ties at random instead of failing
    #[arg(long)]
    random_tiebreak: bool,

    /// Random per-pixel dithering instead of the checkerboard pattern
    #[arg(long)]
    random_dither: bool,

    /// RNG seed for reproducible random modes
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Darken where the hidden image is dark
    DarkenLinear,
    /// Lighten where the hidden image is bright
    LightenSrgb,
    /// The hidden value is the goal color, excursion capped by strength
    MixLinear,
    /// Strength-weighted blend anchored at the visible value
    MixSrgb,
}

impl From<Mode> for FilterMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::DarkenLinear => FilterMode::DarkenTowardLinear,
            Mode::LightenSrgb => FilterMode::LightenTowardSrgb,
            Mode::MixLinear => FilterMode::MixTowardLinear,
            Mode::MixSrgb => FilterMode::MixTowardSrgb,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// Precompute the inverse lookup table (covers all modes)
    Table,
    /// Bisect per pixel (darken-only, no table build)
    Bisect,
}

#[derive(Clone, Copy, ValueEnum)]
enum Prefer {
    /// Pick the axis that keeps the mode's pinned average exact
    Auto,
    U,
    V,
    /// Alternate, starting with U
    Uv,
    /// Alternate, starting with V
    Vu,
}

#[derive(Clone, Copy, ValueEnum)]
enum Pick {
    Closest,
    Farthest,
    Darkest,
    Lightest,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "downmix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let visible = Raster::load(&cli.srgb)
        .with_context(|| format!("failed to load --srgb {}", cli.srgb.display()))?;
    let hidden = Raster::load(&cli.linear)
        .with_context(|| format!("failed to load --linear {}", cli.linear.display()))?;
    tracing::info!(
        width = visible.width,
        height = visible.height,
        "loaded input images"
    );

    let mode = FilterMode::from(cli.mode);
    let strategy = match cli.strategy {
        StrategyKind::Bisect => Strategy::Bisect,
        StrategyKind::Table => {
            let mut pick = PickPolicy::default();
            for term in &cli.pick {
                match term {
                    Pick::Closest => pick.closest = true,
                    Pick::Farthest => pick.farthest = true,
                    Pick::Darkest => pick.darkest = true,
                    Pick::Lightest => pick.lightest = true,
                }
            }
            pick.random = cli.random_tiebreak;

            let preference = match cli.prefer {
                Prefer::U => AxisPreference::UFirst,
                Prefer::V => AxisPreference::VFirst,
                Prefer::Uv => AxisPreference::AlternateFromU,
                Prefer::Vu => AxisPreference::AlternateFromV,
                Prefer::Auto => {
                    if mode.pins_correct_average() {
                        AxisPreference::UFirst
                    } else {
                        AxisPreference::VFirst
                    }
                }
            };

            let started = Instant::now();
            let table = Inverter::new(pick)
                .preference(preference)
                .invert(&SrgbPairAverage, &mut rng)
                .context("failed to build the inverse lookup table")?;
            tracing::info!(elapsed = ?started.elapsed(), "built inverse lookup table");
            Strategy::Table(table)
        }
    };

    let pattern = if cli.random_dither {
        DitherPattern::Random
    } else {
        DitherPattern::Checkerboard
    };
    let solver = PairSolver::new(strategy)
        .mode(mode)
        .strength(cli.strength)
        .pattern(pattern);

    let started = Instant::now();
    let output = perturb(&visible, &hidden, &solver, &mut rng)?;
    tracing::info!(elapsed = ?started.elapsed(), "perturbed pixels");

    output
        .save(&cli.out)
        .with_context(|| format!("failed to write --out {}", cli.out.display()))?;
    tracing::info!(path = %cli.out.display(), "wrote output image");
    Ok(())
}
