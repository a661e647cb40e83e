//! # Formation Geometry Engine
//!
//! Turns the current player positions and the ball trail into drawable
//! primitives: connection lines, formation polygons, trail segments and
//! markers, plus per-team shape statistics.
//!
//! Geometry failures never propagate. A team whose hull cannot be built
//! simply has no polygon this frame.

mod connections;
mod hull;
mod stats;

pub use connections::nearest_neighbor_edges;
pub use hull::{convex_hull, polygon_area};
pub use stats::{FormationSignature, TeamFormationStats, MIN_FORMATION_PLAYERS};

use serde::{Deserialize, Serialize};

use crate::config::{FormationConfig, TrailConfig};
use crate::entity::{BallTrail, Player, TeamSide, TrackId};
use crate::geometry::{CoordinateTransform, Point, Rgb, Rgba};

/// Segment between two teammates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionLine {
    pub team: TeamSide,
    pub from: TrackId,
    pub to: TrackId,
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
    pub width: f32,
}

/// Hull of one team's positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationPolygon {
    pub team: TeamSide,
    pub vertices: Vec<Point>,
    pub fill: Rgba,
    pub outline: Rgba,
    pub outline_width: f32,
}

/// One piece of the ball-trail polyline, in current-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailSegment {
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailMarker {
    pub center: Point,
    pub radius: f32,
    pub fill: Rgba,
    pub outline: Rgba,
}

/// Everything the engine derives for one team in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGeometry {
    pub team: TeamSide,
    pub lines: Vec<ConnectionLine>,
    pub polygon: Option<FormationPolygon>,
    pub stats: TeamFormationStats,
}

/// Lines, polygon and statistics for `team` from this frame's players.
pub fn analyze_team(
    team: TeamSide,
    color: Rgb,
    players: &[Player],
    config: &FormationConfig,
) -> TeamGeometry {
    let members: Vec<&Player> = players.iter().filter(|p| p.team == Some(team)).collect();
    let positions: Vec<Point> = members.iter().map(|p| p.center()).collect();

    let lines = nearest_neighbor_edges(&positions, config.max_connections, config.max_connection_distance)
        .into_iter()
        .map(|(i, j)| ConnectionLine {
            team,
            from: members[i].track_id(),
            to: members[j].track_id(),
            start: positions[i],
            end: positions[j],
            color: color.with_alpha(config.line_alpha),
            width: config.line_width,
        })
        .collect();

    let polygon = match convex_hull(&positions) {
        Ok(vertices) => Some(FormationPolygon {
            team,
            vertices,
            fill: color.with_alpha(config.polygon_fill_alpha),
            outline: color.with_alpha(config.polygon_outline_alpha),
            outline_width: config.polygon_outline_width,
        }),
        Err(err) => {
            log::debug!("No formation polygon for {} team: {}", team, err);
            None
        }
    };

    let stats = TeamFormationStats::compute(
        &positions,
        config.max_connection_distance,
        config.field_width,
        config.field_height,
    );

    TeamGeometry {
        team,
        lines,
        polygon,
        stats,
    }
}

/// Fading polyline over the trail: segment `i` of `n` points has alpha
/// `255 * i / n` and width `max(1, max_width * i / n)`, newest last.
pub fn trail_segments(
    trail: &BallTrail,
    color: Rgb,
    transform: &dyn CoordinateTransform,
    config: &TrailConfig,
) -> Vec<TrailSegment> {
    let points: Vec<Point> = trail.points().map(|p| transform.abs_to_rel(*p)).collect();
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    (1..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            TrailSegment {
                start: points[i - 1],
                end: points[i],
                color: color.with_alpha((255.0 * t) as u8),
                width: (config.max_width * t).floor().max(1.0),
            }
        })
        .collect()
}

/// Markers on the newest `marker_count` trail points, growing towards the
/// newest one.
pub fn trail_markers(
    trail: &BallTrail,
    color: Rgb,
    transform: &dyn CoordinateTransform,
    config: &TrailConfig,
) -> Vec<TrailMarker> {
    if trail.len() < 2 || config.marker_count == 0 {
        return Vec::new();
    }
    let skip = trail.len().saturating_sub(config.marker_count);

    trail
        .points()
        .skip(skip)
        .enumerate()
        .map(|(i, p)| TrailMarker {
            center: transform.abs_to_rel(*p),
            radius: 2.0 + i as f32,
            fill: color.with_alpha((255 * (i + 1) / config.marker_count).min(255) as u8),
            outline: color.with_alpha(255),
        })
        .collect()
}
