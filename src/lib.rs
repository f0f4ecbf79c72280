#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod config;
pub mod format;
pub mod geom;
pub mod output;
pub mod parse;
pub mod sampler;

use rand::Rng;
use thiserror::Error;

use classify::{ConfigGroup, group_by_label};
use geom::{Bounds, BoundsError};
use output::OutputError;
use parse::robtarget::{self, ParseError, SeedPoint};
use sampler::{GeneratedPoint, PointSampler, SampleFailure, SamplerOptions, find_violation};

/// Ingebouwde Align-referentiepunten (IRB2600) als standaard seed-data.
pub const ALIGN_TARGETS: &str = include_str!("../data/align_targets.mod");

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Resultaat van één generatierun.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub seeds: Vec<SeedPoint>,
    pub bounds: Bounds,
    /// Alle geaccepteerde punten in generatievolgorde.
    pub points: Vec<GeneratedPoint>,
    pub groups: Vec<ConfigGroup>,
    pub failures: Vec<SampleFailure>,
}

/// Parseert `seed_text`, bepaalt het bereik, genereert punten en groepeert ze.
///
/// Seed-tekst zonder records faalt met [`BoundsError::Empty`].
pub fn generate<R: Rng>(
    seed_text: &str,
    options: SamplerOptions,
    rng: &mut R,
) -> Result<Generation, Error> {
    let seeds = robtarget::parse_str(seed_text)?;
    let bounds = Bounds::from_poses(seeds.iter().map(|seed| &seed.pose))?;

    let report = PointSampler::new(&seeds, bounds, options, rng).run();
    if let Some((idx, rejection)) = find_violation(&report.points, &options.limits) {
        log::error!("punt {} overschrijdt de {rejection}-grens", idx + 1);
    }
    let groups = group_by_label(&report.points);

    Ok(Generation {
        seeds,
        bounds,
        points: report.points,
        groups,
        failures: report.failures,
    })
}

/// Installeert `env_logger`; `RUST_LOG` gaat voor de standaardfilter.
pub fn init_logger() {
    let default_filter = if cfg!(feature = "debug_logs") {
        "debug"
    } else {
        "info"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
