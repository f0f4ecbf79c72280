//! Groepering van punten op basis van de asconfiguratie.

use crate::sampler::GeneratedPoint;

const POSITIVE: &str = "P";
const NEGATIVE: &str = "N";

/// Label voor de tekens van as 4, 5 en 6 (`config[1..4]`), bv. `4N5P6P`.
/// Nul telt als positief.
#[must_use]
pub fn axis_config_label(config: &[i32; 4]) -> String {
    let sign = |value: i32| if value >= 0 { POSITIVE } else { NEGATIVE };
    format!(
        "4{}5{}6{}",
        sign(config[1]),
        sign(config[2]),
        sign(config[3])
    )
}

/// Punten met hetzelfde asconfiguratielabel.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigGroup {
    pub label: String,
    pub points: Vec<GeneratedPoint>,
}

/// Groepeert punten per label. Groepen staan in volgorde van eerste
/// voorkomen; binnen een groep blijft de generatievolgorde behouden.
#[must_use]
pub fn group_by_label(points: &[GeneratedPoint]) -> Vec<ConfigGroup> {
    let mut groups: Vec<ConfigGroup> = Vec::new();
    for point in points {
        let label = axis_config_label(&point.config);
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.points.push(point.clone()),
            None => groups.push(ConfigGroup {
                label,
                points: vec![point.clone()],
            }),
        }
    }

    for group in &groups {
        log::debug!("groep {}: {} punten", group.label, group.points.len());
    }
    groups
}
