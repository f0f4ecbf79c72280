//! Rejection sampling van kalibratiepunten binnen het seed-bereik.
//!
//! Per doelindex worden tot `max_attempts` kandidaten getrokken. Een kandidaat
//! valt af wanneer een van de assen binnen de deadzone ligt, wanneer hij
//! buiten de werkstraal valt of wanneer hij te dicht bij een eerder
//! geaccepteerd punt ligt.

use std::fmt;

use rand::Rng;

use crate::format::render_extra;
use crate::geom::{Bounds, distance, lerp, norm};
use crate::parse::robtarget::SeedPoint;

/// Maximaal aantal pogingen per punt.
pub const MAX_ATTEMPTS: usize = 1000;

/// Standaard aantal te genereren punten.
pub const DEFAULT_NUM_POINTS: usize = 200;

/// Geometrische grenzen voor geaccepteerde posities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingLimits {
    /// Iedere as moet in absolute waarde groter zijn dan deze drempel.
    pub deadzone: f64,
    pub max_radius: f64,
    pub min_distance: f64,
}

impl SamplingLimits {
    /// Eerste grens die `position` overschrijdt, in de volgorde deadzone,
    /// straal, afstand tot `earlier`. Gelijk aan de deadzone valt af, gelijk
    /// aan de straal mag.
    #[must_use]
    pub fn rejection<'a, I>(&self, position: [f64; 3], earlier: I) -> Option<Rejection>
    where
        I: IntoIterator<Item = &'a [f64; 3]>,
    {
        if position.iter().any(|v| v.abs() <= self.deadzone) {
            return Some(Rejection::Deadzone);
        }
        if norm(position) > self.max_radius {
            return Some(Rejection::Radius);
        }
        if earlier
            .into_iter()
            .any(|other| distance(position, *other) < self.min_distance)
        {
            return Some(Rejection::Separation);
        }
        None
    }
}

impl Default for SamplingLimits {
    /// IRB2600-20/1.65 waarden.
    fn default() -> Self {
        Self {
            deadzone: 469.0,
            max_radius: 1653.0,
            min_distance: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerOptions {
    pub limits: SamplingLimits,
    pub num_points: usize,
    pub max_attempts: usize,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            limits: SamplingLimits::default(),
            num_points: DEFAULT_NUM_POINTS,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl SamplerOptions {
    #[must_use]
    pub fn with_limits(limits: SamplingLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }
}

/// Een gegenereerd kalibratiepunt.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPoint {
    pub position: [f64; 3],
    pub orientation: [f64; 4],
    /// Overgenomen van het gekozen seedpunt.
    pub config: [i32; 4],
    /// Extra-velden van hetzelfde seedpunt, al gerenderd.
    pub extra: Vec<String>,
}

/// Reden waarom een kandidaat werd afgewezen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Deadzone,
    Radius,
    Separation,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::Deadzone => "deadzone",
            Rejection::Radius => "max radius",
            Rejection::Separation => "min distance",
        };
        f.write_str(text)
    }
}

/// Telling van afwijzingen per reden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub deadzone: usize,
    pub radius: usize,
    pub separation: usize,
}

impl RejectionCounts {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Deadzone => self.deadzone += 1,
            Rejection::Radius => self.radius += 1,
            Rejection::Separation => self.separation += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.deadzone + self.radius + self.separation
    }

    /// De reden met de meeste afwijzingen.
    #[must_use]
    pub fn dominant(&self) -> Option<Rejection> {
        [
            (Rejection::Deadzone, self.deadzone),
            (Rejection::Radius, self.radius),
            (Rejection::Separation, self.separation),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(rejection, _)| rejection)
    }
}

/// Een index waarvoor binnen het pogingenbudget geen punt gevonden werd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFailure {
    /// 1-gebaseerde doelindex.
    pub index: usize,
    pub attempts: usize,
    pub rejections: RejectionCounts,
}

impl fmt::Display for SampleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not place point {} within {} attempts",
            self.index, self.attempts
        )?;
        match self.rejections.dominant() {
            Some(reason) => write!(f, " (mostly rejected by {reason})"),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleReport {
    pub points: Vec<GeneratedPoint>,
    pub failures: Vec<SampleFailure>,
}

/// Trekt punten binnen `bounds` met een geïnjecteerde randombron.
pub struct PointSampler<'a, R: Rng> {
    seeds: &'a [SeedPoint],
    bounds: Bounds,
    options: SamplerOptions,
    rng: &'a mut R,
    existing: Vec<[f64; 3]>,
}

impl<'a, R: Rng> PointSampler<'a, R> {
    pub fn new(
        seeds: &'a [SeedPoint],
        bounds: Bounds,
        options: SamplerOptions,
        rng: &'a mut R,
    ) -> Self {
        Self {
            seeds,
            bounds,
            options,
            rng,
            existing: Vec::with_capacity(options.num_points),
        }
    }

    /// Genereert tot `num_points` punten. Zonder seedpunten is het resultaat leeg.
    pub fn run(mut self) -> SampleReport {
        let mut report = SampleReport {
            points: Vec::with_capacity(self.options.num_points),
            failures: Vec::new(),
        };
        if self.seeds.is_empty() {
            log::warn!("geen seedpunten; er worden geen punten gegenereerd");
            return report;
        }

        for index in 1..=self.options.num_points {
            match self.sample_one() {
                Ok(point) => {
                    self.existing.push(point.position);
                    report.points.push(point);
                }
                Err(rejections) => {
                    let failure = SampleFailure {
                        index,
                        attempts: rejections.total(),
                        rejections,
                    };
                    log::warn!("{failure}");
                    report.failures.push(failure);
                }
            }
        }

        log::info!(
            "{} van {} punten gegenereerd",
            report.points.len(),
            self.options.num_points
        );
        report
    }

    fn sample_one(&mut self) -> Result<GeneratedPoint, RejectionCounts> {
        let mut rejections = RejectionCounts::default();
        for _ in 0..self.options.max_attempts {
            let position = [self.draw(0), self.draw(1), self.draw(2)];
            if let Some(rejection) = self.check(position) {
                rejections.record(rejection);
                continue;
            }

            let orientation = [self.draw(3), self.draw(4), self.draw(5), self.draw(6)];
            let pick = self.rng.random_range(0..self.seeds.len());
            let source = &self.seeds[pick];
            return Ok(GeneratedPoint {
                position,
                orientation,
                config: source.config,
                extra: source.extra.iter().map(render_extra).collect(),
            });
        }
        Err(rejections)
    }

    fn draw(&mut self, axis: usize) -> f64 {
        let (min, max) = self.bounds.axis(axis);
        lerp(min, max, self.rng.random())
    }

    fn check(&self, position: [f64; 3]) -> Option<Rejection> {
        self.options.limits.rejection(position, &self.existing)
    }
}

/// Controleert de geometrische invarianten van een reeks gegenereerde punten.
/// Geeft de eerste overtreding terug.
#[must_use]
pub fn find_violation(points: &[GeneratedPoint], limits: &SamplingLimits) -> Option<(usize, Rejection)> {
    points.iter().enumerate().find_map(|(idx, point)| {
        let earlier = points[..idx].iter().map(|p| &p.position);
        limits.rejection(point.position, earlier).map(|r| (idx, r))
    })
}
