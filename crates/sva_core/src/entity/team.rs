use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::TeamLabel;
use crate::config::{TeamConfig, TeamsConfig};
use crate::geometry::Rgb;
use crate::passes::Pass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub const ALL: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => f.write_str("home"),
            TeamSide::Away => f.write_str("away"),
        }
    }
}

/// One side of the match with its running tallies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub side: TeamSide,
    pub name: String,
    pub abbreviation: String,
    pub color: Rgb,
    pub board_color: Rgb,
    pub text_color: Rgb,
    /// Frames this team held confirmed possession
    pub possession_frames: u64,
    /// Passes in the order they were detected
    pub passes: Vec<Pass>,
}

impl Team {
    pub fn from_config(side: TeamSide, config: &TeamConfig) -> Self {
        Self {
            side,
            name: config.name.clone(),
            abbreviation: config.abbreviation.clone(),
            color: config.color,
            board_color: config.board_color,
            text_color: config.text_color,
            possession_frames: 0,
            passes: Vec::new(),
        }
    }

    /// Share of `duration` frames spent in possession, in `[0, 1]`.
    pub fn possession_ratio(&self, duration: u64) -> f32 {
        if duration == 0 {
            return 0.0;
        }
        self.possession_frames as f32 / duration as f32
    }

    pub fn possession_percentage(&self, duration: u64) -> u32 {
        (self.possession_ratio(duration) * 100.0).round() as u32
    }

    /// Possession time as `MM:SS`.
    pub fn possession_time(&self, fps: f32) -> String {
        format_clock(self.possession_frames, fps)
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }
}

/// `MM:SS` for a frame count at the given frame rate.
pub fn format_clock(frames: u64, fps: f32) -> String {
    let seconds = if fps > 0.0 {
        (frames as f64 / fps as f64) as u64
    } else {
        0
    };
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Home and away teams for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub home: Team,
    pub away: Team,
}

impl TeamRoster {
    pub fn from_config(config: &TeamsConfig) -> Self {
        Self {
            home: Team::from_config(TeamSide::Home, &config.home),
            away: Team::from_config(TeamSide::Away, &config.away),
        }
    }

    pub fn get(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// Side whose name equals the label; referee and unknown labels match none.
    pub fn side_for_label(&self, label: &TeamLabel) -> Option<TeamSide> {
        TeamSide::ALL
            .into_iter()
            .find(|&side| self.get(side).name == label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        [&self.home, &self.away].into_iter()
    }

    pub fn total_possession_frames(&self) -> u64 {
        self.home.possession_frames + self.away.possession_frames
    }

    pub fn total_passes(&self) -> usize {
        self.home.pass_count() + self.away.pass_count()
    }
}

impl Default for TeamRoster {
    fn default() -> Self {
        Self::from_config(&TeamsConfig::default())
    }
}
