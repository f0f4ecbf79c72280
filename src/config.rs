//! Interactief uitvragen van de bemonsteringsgrenzen.

use std::io::{self, BufRead, Write};

use crate::sampler::SamplingLimits;

const PROMPTS: [&str; 3] = [
    "Deadzone (e.g. 106: |x|, |y| and |z| must all exceed 106): ",
    "Robot working radius (e.g. 1853: sqrt(x^2 + y^2 + z^2) may not exceed it): ",
    "Minimum distance between points (e.g. 100): ",
];

/// Uitkomst van [`prompt_limits`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitsInput {
    pub limits: SamplingLimits,
    /// `true` wanneer de standaardwaarden gebruikt zijn.
    pub defaulted: bool,
}

/// Vraagt de grenzen een voor een op. De eerste ongeldige of ontbrekende
/// waarde breekt het uitvragen af; dan gelden voor alle drie de
/// standaardwaarden en wordt een melding getoond.
pub fn prompt_limits<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<LimitsInput> {
    let mut values = [0.0; 3];
    for (slot, prompt) in values.iter_mut().zip(PROMPTS) {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        match line.trim().parse::<f64>() {
            Ok(value) if read > 0 => *slot = value,
            _ => return fallback(output),
        }
    }

    let [deadzone, max_radius, min_distance] = values;
    Ok(LimitsInput {
        limits: SamplingLimits {
            deadzone,
            max_radius,
            min_distance,
        },
        defaulted: false,
    })
}

fn fallback<W: Write>(output: &mut W) -> io::Result<LimitsInput> {
    let limits = SamplingLimits::default();
    writeln!(
        output,
        "Invalid input, using defaults (IRB2600-20/1.65): deadzone={}, max radius={}, min distance={}",
        limits.deadzone, limits.max_radius, limits.min_distance
    )?;
    log::debug!("standaardgrenzen gebruikt: {limits:?}");
    Ok(LimitsInput {
        limits,
        defaulted: true,
    })
}
