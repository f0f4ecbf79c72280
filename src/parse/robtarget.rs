//! Parser voor `robtarget`-records in RAPID-notatie.
//!
//! Een record ziet er uit als
//! `CONST robtarget Align_1:=[[x,y,z],[q1,q2,q3,q4],[c1,c2,c3,c4],[e1,...]];`.
//! Het `CONST robtarget`-voorvoegsel en de afsluitende `;` zijn optioneel.

use std::num::{ParseFloatError, ParseIntError};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:CONST\s+robtarget\s+)?([A-Za-z_]\w*)\s*:=\s*\[\s*\[([^\[\]]*)\]\s*,\s*\[([^\[\]]*)\]\s*,\s*\[([^\[\]]*)\]\s*,\s*\[([^\[\]]*)\]\s*\]")
        .expect("recordpatroon is geldig")
});

/// Aantal numerieke componenten in een pose: 3 positie + 4 oriëntatie.
pub const POSE_LEN: usize = 7;

/// Result type voor het parsen van seed-data.
pub type ParseResult<T> = Result<T, ParseError>;

/// Beschrijft fouten tijdens het parsen.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Een kommagetal in het record is ongeldig.
    #[error("record `{record}`: ongeldige numerieke waarde `{text}`: {source}")]
    Number {
        record: String,
        text: String,
        source: ParseFloatError,
    },
    /// Een configuratiewaarde is geen geheel getal.
    #[error("record `{record}`: ongeldige configuratiewaarde `{text}`: {source}")]
    Integer {
        record: String,
        text: String,
        source: ParseIntError,
    },
    /// Een veldgroep heeft het verkeerde aantal elementen.
    #[error("record `{record}`: {field} verwacht {expected} waarden, kreeg {actual}")]
    Arity {
        record: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Waarde uit de extra-veldgroep (externe assen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtraValue {
    Integer(i64),
    Number(f64),
}

/// Een referentiepunt uit de seed-data.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPoint {
    pub name: String,
    /// `[x, y, z, q1, q2, q3, q4]`
    pub pose: [f64; POSE_LEN],
    pub config: [i32; 4],
    pub extra: Vec<ExtraValue>,
}

impl SeedPoint {
    #[must_use]
    pub fn position(&self) -> [f64; 3] {
        [self.pose[0], self.pose[1], self.pose[2]]
    }

    #[must_use]
    pub fn orientation(&self) -> [f64; 4] {
        [self.pose[3], self.pose[4], self.pose[5], self.pose[6]]
    }
}

/// Leest alle records uit `input` in bronvolgorde.
///
/// Tekst zonder herkenbare records levert een lege lijst op; dat is geen fout.
pub fn parse_str(input: &str) -> ParseResult<Vec<SeedPoint>> {
    let mut points = Vec::new();
    for captures in RECORD.captures_iter(input) {
        let name = &captures[1];
        let position: [f64; 3] = parse_floats(name, "positie", &captures[2])?;
        let orientation: [f64; 4] = parse_floats(name, "oriëntatie", &captures[3])?;
        let config: [i32; 4] = parse_config(name, &captures[4])?;
        let extra = parse_extra(name, &captures[5])?;

        let mut pose = [0.0; POSE_LEN];
        pose[..3].copy_from_slice(&position);
        pose[3..].copy_from_slice(&orientation);

        points.push(SeedPoint {
            name: name.to_owned(),
            pose,
            config,
            extra,
        });
    }

    log::debug!("{} robtarget records gevonden", points.len());
    Ok(points)
}

fn split_fields(group: &str) -> impl Iterator<Item = &str> {
    group.split(',').map(str::trim)
}

fn parse_floats<const N: usize>(
    record: &str,
    field: &'static str,
    group: &str,
) -> ParseResult<[f64; N]> {
    let values = split_fields(group)
        .map(|text| parse_float(record, text))
        .collect::<ParseResult<Vec<_>>>()?;
    let actual = values.len();
    values.try_into().map_err(|_| ParseError::Arity {
        record: record.to_owned(),
        field,
        expected: N,
        actual,
    })
}

fn parse_float(record: &str, text: &str) -> ParseResult<f64> {
    text.parse::<f64>().map_err(|source| ParseError::Number {
        record: record.to_owned(),
        text: text.to_owned(),
        source,
    })
}

fn parse_config(record: &str, group: &str) -> ParseResult<[i32; 4]> {
    let values = split_fields(group)
        .map(|text| {
            text.parse::<i32>().map_err(|source| ParseError::Integer {
                record: record.to_owned(),
                text: text.to_owned(),
                source,
            })
        })
        .collect::<ParseResult<Vec<_>>>()?;
    let actual = values.len();
    values.try_into().map_err(|_| ParseError::Arity {
        record: record.to_owned(),
        field: "configuratie",
        expected: 4,
        actual,
    })
}

fn parse_extra(record: &str, group: &str) -> ParseResult<Vec<ExtraValue>> {
    split_fields(group)
        .map(|text| parse_extra_value(record, text))
        .collect()
}

fn parse_extra_value(record: &str, text: &str) -> ParseResult<ExtraValue> {
    if text.contains(['e', 'E', '.']) {
        return parse_float(record, text).map(ExtraValue::Number);
    }
    match text.parse::<i64>() {
        Ok(value) => Ok(ExtraValue::Integer(value)),
        // bv. "inf" of getallen buiten het i64-bereik
        Err(_) => parse_float(record, text).map(ExtraValue::Number),
    }
}
