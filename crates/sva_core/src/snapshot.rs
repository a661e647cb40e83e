//! # Frame Snapshot
//!
//! Immutable result of processing one frame. This is the only thing a
//! rendering adapter sees; it never reaches back into engine state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::TeamLabel;
use crate::config::LayerToggles;
use crate::entity::{format_clock, Player, TacticalZone, Team, TeamRoster, TeamSide, TrackId};
use crate::formation::{ConnectionLine, FormationPolygon, TeamFormationStats, TrailMarker, TrailSegment};
use crate::geometry::{BoundingBox, Rgb};
use crate::passes::{Pass, PassOutcome};
use crate::possession::{ClosestPlayer, PossessionState};

/// A player as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub track_id: TrackId,
    pub bbox: BoundingBox,
    pub confidence: f32,
    pub label: Option<TeamLabel>,
    pub team: Option<TeamSide>,
    /// Team colour; `None` for unclassified players
    pub color: Option<Rgb>,
    pub zone: TacticalZone,
}

impl PlayerView {
    pub fn from_player(player: &Player, field_width: f32, field_height: f32) -> Self {
        let det = &player.detection;
        Self {
            track_id: det.track_id,
            bbox: det.bbox,
            confidence: det.confidence,
            label: det.data.label.clone(),
            team: player.team,
            color: det.data.color,
            zone: player.tactical_zone(field_width, field_height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub bbox: Option<BoundingBox>,
    pub color: Rgb,
}

/// Per-team figures for counters and end-of-run reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub side: TeamSide,
    pub name: String,
    pub abbreviation: String,
    pub color: Rgb,
    pub board_color: Rgb,
    pub text_color: Rgb,
    pub possession_frames: u64,
    pub possession_ratio: f32,
    pub possession_percentage: u32,
    /// `MM:SS`
    pub possession_time: String,
    pub passes: usize,
}

impl TeamSummary {
    pub fn from_team(team: &Team, duration: u64, fps: f32) -> Self {
        Self {
            side: team.side,
            name: team.name.clone(),
            abbreviation: team.abbreviation.clone(),
            color: team.color,
            board_color: team.board_color,
            text_color: team.text_color,
            possession_frames: team.possession_frames,
            possession_ratio: team.possession_ratio(duration),
            possession_percentage: team.possession_percentage(duration),
            possession_time: team.possession_time(fps),
            passes: team.pass_count(),
        }
    }
}

/// Running match totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Frames processed
    pub duration: u64,
    pub fps: f32,
    pub home: TeamSummary,
    pub away: TeamSummary,
    pub total_passes: usize,
    pub possessing_team: Option<TeamSide>,
}

impl MatchSummary {
    pub fn new(roster: &TeamRoster, duration: u64, fps: f32, possessing_team: Option<TeamSide>) -> Self {
        Self {
            duration,
            fps,
            home: TeamSummary::from_team(&roster.home, duration, fps),
            away: TeamSummary::from_team(&roster.away, duration, fps),
            total_passes: roster.total_passes(),
            possessing_team,
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamSummary {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// Elapsed match time as `MM:SS`.
    pub fn duration_clock(&self) -> String {
        format_clock(self.duration, self.fps)
    }

    /// `"Inter Miami: 00:12 | Palmeiras: 00:30"`
    pub fn time_possessions(&self) -> String {
        format!(
            "{}: {} | {}: {}",
            self.home.name, self.home.possession_time, self.away.name, self.away.possession_time
        )
    }
}

impl fmt::Display for MatchSummary {
    /// `"MIA: 00:12 | PAL: 00:30"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {}: {}",
            self.home.abbreviation,
            self.home.possession_time,
            self.away.abbreviation,
            self.away.possession_time
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: TeamSide,
    pub stats: TeamFormationStats,
}

/// Everything computed for one frame.
///
/// Disabled layers leave their collections empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// 1-based index of the frame
    pub frame_index: u64,
    pub players: Vec<PlayerView>,
    pub ball: BallView,
    pub possession: PossessionState,
    pub possessing_team: Option<TeamSide>,
    pub closest_player: Option<ClosestPlayer>,
    pub lines: Vec<ConnectionLine>,
    pub polygons: Vec<FormationPolygon>,
    pub trail: Vec<TrailSegment>,
    pub trail_markers: Vec<TrailMarker>,
    pub team_stats: Vec<TeamStats>,
    /// All passes so far, endpoints in current-frame coordinates
    pub passes: Vec<Pass>,
    pub pass_outcome: PassOutcome,
    pub summary: MatchSummary,
    pub layers: LayerToggles,
}

impl FrameSnapshot {
    pub fn stats_for(&self, side: TeamSide) -> Option<&TeamFormationStats> {
        self.team_stats.iter().find(|s| s.team == side).map(|s| &s.stats)
    }

    pub fn player(&self, id: TrackId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.track_id == id)
    }
}
