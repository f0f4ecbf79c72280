//! Weergave van gegenereerde punten als `robtarget`-records.

use std::fmt::Write as _;

use crate::parse::robtarget::ExtraValue;
use crate::sampler::GeneratedPoint;

/// Standaard naamvoorvoegsel voor gegenereerde records.
pub const DEFAULT_PREFIX: &str = "Calib";

const POSITION_DIGITS: usize = 5;
const ORIENTATION_DECIMALS: usize = 6;
const EXTRA_DECIMALS: usize = 4;

/// Rendert één punt als `CONST robtarget <name>:=[[..],[..],[..],[..]];`.
#[must_use]
pub fn format_record(point: &GeneratedPoint, name: &str) -> String {
    let mut line = String::with_capacity(160);
    let _ = write!(line, "CONST robtarget {name}:=[[");
    join_into(
        &mut line,
        point
            .position
            .iter()
            .map(|v| format_significant(*v, POSITION_DIGITS)),
    );
    line.push_str("],[");
    join_into(
        &mut line,
        point
            .orientation
            .iter()
            .map(|v| format!("{v:.ORIENTATION_DECIMALS$}")),
    );
    line.push_str("],[");
    join_into(&mut line, point.config.iter().map(ToString::to_string));
    line.push_str("],[");
    join_into(&mut line, point.extra.iter().cloned());
    line.push_str("]];");
    line
}

/// Rendert alle punten met oplopende namen `<prefix>_1`, `<prefix>_2`, ...
#[must_use]
pub fn format_points(points: &[GeneratedPoint], prefix: &str) -> Vec<String> {
    points
        .iter()
        .enumerate()
        .map(|(idx, point)| format_record(point, &format!("{prefix}_{}", idx + 1)))
        .collect()
}

/// Rendert een extra-veld zoals het in de uitvoer komt.
///
/// Kommagetallen met `|v| >= 1e4` of `|v| <= 1e-4` gaan in wetenschappelijke
/// notatie met vier decimalen (`9.0000E+09`).
#[must_use]
pub fn render_extra(value: &ExtraValue) -> String {
    match *value {
        ExtraValue::Integer(v) => v.to_string(),
        ExtraValue::Number(v) if v.abs() >= 1e4 || v.abs() <= 1e-4 => {
            format_scientific(v, EXTRA_DECIMALS)
        }
        ExtraValue::Number(v) => format!("{v:?}"),
    }
}

/// Wetenschappelijke notatie met `decimals` cijfers achter de komma, een
/// expliciet exponentteken en minstens twee exponentcijfers.
#[must_use]
pub fn format_scientific(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{value:.decimals$E}");
    match raw.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            format!("{mantissa}E{}", exponent_suffix(exponent))
        }
        None => raw,
    }
}

/// Getal met `digits` significante cijfers, volgens de `%g`-regels: vaste
/// notatie tenzij de exponent kleiner dan -4 of minstens `digits` is, en
/// zonder overbodige nullen.
#[must_use]
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    let digits = digits.max(1);
    let raw = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let limit = i32::try_from(digits).unwrap_or(i32::MAX);

    if exponent < -4 || exponent >= limit {
        format!(
            "{}e{}",
            trim_fraction(mantissa),
            exponent_suffix(exponent)
        )
    } else {
        let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{sign}{:02}", exponent.unsigned_abs())
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn join_into(out: &mut String, items: impl Iterator<Item = String>) {
    for (idx, item) in items.enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&item);
    }
}
