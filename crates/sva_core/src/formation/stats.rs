//! # Team Shape Statistics
//!
//! Per-team numbers derived from player centres in one frame.

use serde::{Deserialize, Serialize};

use crate::entity::TacticalZone;
use crate::formation::hull::{convex_hull, polygon_area};
use crate::geometry::{centroid, distance, Point};

/// Minimum players for a formation label.
pub const MIN_FORMATION_PLAYERS: usize = 3;

/// Player counts over the 3x3 field grid: `counts[third][channel]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSignature {
    pub counts: [[u32; 3]; 3],
}

impl FormationSignature {
    pub fn from_zones(zones: impl IntoIterator<Item = TacticalZone>) -> Self {
        let mut counts = [[0u32; 3]; 3];
        for zone in zones {
            let (row, col) = zone.grid_index();
            counts[row][col] += 1;
        }
        Self { counts }
    }

    /// Players per longitudinal third: defense, midfield, attack.
    pub fn thirds(&self) -> [u32; 3] {
        self.counts.map(|row| row.iter().sum())
    }

    pub fn total(&self) -> u32 {
        self.thirds().iter().sum()
    }

    /// `"d-m-a"`, e.g. `"4-4-2"`.
    pub fn label(&self) -> String {
        let [d, m, a] = self.thirds();
        format!("{}-{}-{}", d, m, a)
    }
}

/// Shape of one team in one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamFormationStats {
    pub player_count: usize,
    /// Mean player position
    pub centroid: Option<Point>,
    /// Mean pairwise distance in px; lower is tighter
    pub compactness: f32,
    /// Fraction of player pairs within the connection distance
    pub connectivity: f32,
    /// Lateral spread (y extent) in px
    pub width: f32,
    /// Longitudinal spread (x extent) in px
    pub depth: f32,
    /// Convex hull area in px², zero when no hull exists
    pub hull_area: f32,
    pub signature: FormationSignature,
    /// Formation label, present with at least three players
    pub formation: Option<String>,
}

impl TeamFormationStats {
    pub fn compute(
        positions: &[Point],
        connection_distance: f32,
        field_width: f32,
        field_height: f32,
    ) -> Self {
        let n = positions.len();

        let mut total = 0.0f32;
        let mut pairs = 0u32;
        let mut connected = 0u32;
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                let d = distance(a, b);
                total += d;
                pairs += 1;
                if d <= connection_distance {
                    connected += 1;
                }
            }
        }
        let (compactness, connectivity) = if pairs > 0 {
            (total / pairs as f32, connected as f32 / pairs as f32)
        } else {
            (0.0, 0.0)
        };

        let (width, depth) = spread(positions);
        let hull_area = convex_hull(positions)
            .map(|hull| polygon_area(&hull))
            .unwrap_or(0.0);

        let signature = FormationSignature::from_zones(
            positions
                .iter()
                .map(|p| TacticalZone::locate(*p, field_width, field_height)),
        );
        let formation = (n >= MIN_FORMATION_PLAYERS).then(|| signature.label());

        Self {
            player_count: n,
            centroid: centroid(positions),
            compactness,
            connectivity,
            width,
            depth,
            hull_area,
            signature,
            formation,
        }
    }
}

/// `(y extent, x extent)`, zero for an empty set.
fn spread(positions: &[Point]) -> (f32, f32) {
    if positions.is_empty() {
        return (0.0, 0.0);
    }
    let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
    for p in positions {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_y - min_y, max_x - min_x)
}
