//! Positional classification of a ratio against its six moving averages.
//!
//! Grades trend strength by where the current value sits in the stack of
//! tracked averages: above all of them, below all of them, or pinned between
//! a named floor and ceiling.

use serde::Serialize;

/// Market-structure label for a ratio indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MaStatus {
    /// Above all six moving averages.
    StrongBullish,
    /// Below all six moving averages.
    StrongBearish,
    /// Between two adjacent averages in the sorted stack.
    Ranging {
        floor: &'static str,
        ceiling: &'static str,
    },
    /// Not classifiable: some average undefined (`support_count: None`), or
    /// exact ties prevented a floor/ceiling pair (`Some(count)`).
    Indeterminate { support_count: Option<usize> },
}

/// Classify `value` against six named averages.
///
/// `support_count` counts averages strictly below `value`. In the mixed case
/// the averages are sorted ascending; the floor is the last name below
/// `value` and the ceiling the first name at or above it.
pub fn classify(value: f64, averages: &[(&'static str, f64); 6]) -> MaStatus {
    let support_count = averages.iter().filter(|(_, avg)| *avg < value).count();
    if support_count == 6 {
        return MaStatus::StrongBullish;
    }
    if support_count == 0 {
        return MaStatus::StrongBearish;
    }

    let mut sorted = *averages;
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut floor = None;
    let mut ceiling = None;
    for (name, avg) in sorted {
        if avg < value {
            floor = Some(name);
        } else {
            ceiling = Some(name);
            break;
        }
    }

    match (floor, ceiling) {
        (Some(floor), Some(ceiling)) => MaStatus::Ranging { floor, ceiling },
        // Unreachable for finite inputs when 1 <= support_count <= 5.
        _ => MaStatus::Indeterminate {
            support_count: Some(support_count),
        },
    }
}
