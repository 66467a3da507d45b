use anyhow::{ensure, Result};
use geo::{Area, BooleanOps};
use serde::Serialize;

use super::{Boundaries, MergedGeometry};

/// How closely a boundary from one set matches its counterpart in another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryMatch {
    pub label: String,
    pub other_label: String,
    /// Intersection area over union area, in [0, 1].
    pub iou: f64,
    pub area: f64,
    pub other_area: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundaryComparison {
    pub matches: Vec<BoundaryMatch>,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
}

impl BoundaryComparison {
    /// Smallest overlap ratio among the matched boundaries.
    pub fn worst(&self) -> Option<&BoundaryMatch> {
        self.matches.iter().min_by(|a, b| a.iou.total_cmp(&b.iou))
    }
}

/// Pairs groups by id where both sides carry one, otherwise by label, and measures
/// how well each pair overlaps. Both sets must share a reference system.
pub fn compare_boundaries(left: &Boundaries, right: &Boundaries) -> Result<BoundaryComparison> {
    ensure!(left.epsg() == right.epsg(),
        "[geometry::compare] Reference systems differ: EPSG:{} vs EPSG:{}", left.epsg(), right.epsg());

    let counterpart = |group: &MergedGeometry| -> Option<&MergedGeometry> {
        group.group_id.as_deref()
            .and_then(|id| right.get_by_id(id))
            .or_else(|| right.get(&group.group_label))
    };

    let mut comparison = BoundaryComparison::default();
    let mut matched = vec![false; right.len()];

    for group in left.groups() {
        let Some(other) = counterpart(group) else {
            comparison.only_left.push(group.group_label.clone());
            continue
        };
        if let Some(index) = right.groups().iter().position(|g| std::ptr::eq(g, other)) {
            matched[index] = true;
        }

        let union = group.shape.union(&other.shape).unsigned_area();
        let intersection = group.shape.intersection(&other.shape).unsigned_area();
        comparison.matches.push(BoundaryMatch {
            label: group.group_label.clone(),
            other_label: other.group_label.clone(),
            iou: if union > 0.0 { intersection / union } else { 0.0 },
            area: group.shape.unsigned_area(),
            other_area: other.shape.unsigned_area(),
        });
    }

    comparison.only_right = right.groups().iter().zip(matched)
        .filter(|(_, matched)| !matched)
        .map(|(group, _)| group.group_label.clone())
        .collect();

    Ok(comparison)
}
