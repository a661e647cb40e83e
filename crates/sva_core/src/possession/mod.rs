//! # Possession State Machine
//!
//! Decides, once per frame, which player is on the ball and which team holds
//! confirmed possession.
//!
//! A team only takes possession after its player has been the closest one
//! within `ball_distance_threshold` for `counter_threshold` consecutive
//! qualifying frames. Single-frame misclassifications or a briefly hidden
//! ball therefore never flip the recorded possession.
//!
//! ```text
//!            qualifying frame (team T)
//! NoPossession ─────────────────────▶ Provisional(T, n)
//!                                        │ n == threshold
//!                                        ▼
//!            challenger U accumulating  Confirmed(T)
//! Confirmed(T) ─────────────────────▶ Provisional(U, n) ── n == threshold ──▶ Confirmed(U)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::PossessionConfig;
use crate::entity::{Ball, Player, TeamRoster, TeamSide, TrackId};
use crate::geometry::Point;

/// Externally visible possession state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PossessionState {
    NoPossession,
    /// `team` is accumulating frames but has not been confirmed yet
    Provisional { team: TeamSide, counter: u32 },
    Confirmed { team: TeamSide },
}

/// The player nearest the ball this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosestPlayer {
    pub track_id: TrackId,
    pub team: Option<TeamSide>,
    /// Foot-to-ball distance in frame pixels
    pub distance: f32,
    /// Ball centre in absolute coordinates
    pub ball_abs: Point,
}

/// Result of one [`PossessionTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PossessionUpdate {
    pub closest: Option<ClosestPlayer>,
    pub possessing_team: Option<TeamSide>,
    pub state: PossessionState,
    /// Possession was confirmed for a new team on this frame
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct PossessionTracker {
    config: PossessionConfig,
    possessing: Option<TeamSide>,
    accumulating: Option<TeamSide>,
    counter: u32,
    closest: Option<ClosestPlayer>,
    duration: u64,
}

impl PossessionTracker {
    pub fn new(config: PossessionConfig) -> Self {
        Self {
            config,
            possessing: None,
            accumulating: None,
            counter: 0,
            closest: None,
            duration: 0,
        }
    }

    /// Advance one frame.
    ///
    /// Always counts the frame towards the match duration and, when a team
    /// holds confirmed possession after the update, towards that team's
    /// possession frames.
    pub fn update(&mut self, players: &[Player], ball: &Ball, roster: &mut TeamRoster) -> PossessionUpdate {
        let previous = self.possessing;

        self.closest = match find_closest(players, ball) {
            Some(closest) if closest.distance <= self.config.ball_distance_threshold => Some(closest),
            Some(closest) => {
                log::trace!(
                    "Closest player {} is {:.1}px from the ball, over {:.1}px",
                    closest.track_id,
                    closest.distance,
                    self.config.ball_distance_threshold
                );
                None
            }
            None => None,
        };

        match self.closest {
            Some(closest) => self.accumulate(closest.team),
            None => {
                if self.config.reset_on_interruption {
                    self.counter = 0;
                }
            }
        }

        self.duration += 1;
        if let Some(side) = self.possessing {
            roster.get_mut(side).possession_frames += 1;
        }

        let changed = self.possessing != previous;
        if changed {
            log::info!(
                "Possession confirmed for {:?} at frame {}",
                self.possessing,
                self.duration
            );
        }

        PossessionUpdate {
            closest: self.closest,
            possessing_team: self.possessing,
            state: self.state(),
            changed,
        }
    }

    fn accumulate(&mut self, team: Option<TeamSide>) {
        if team != self.accumulating {
            self.counter = 0;
            self.accumulating = team;
        }
        self.counter = self.counter.saturating_add(1);

        if self.counter >= self.config.counter_threshold && self.accumulating.is_some() {
            self.possessing = self.accumulating;
        }
    }

    pub fn state(&self) -> PossessionState {
        match (self.accumulating, self.possessing) {
            (Some(team), possessing) if possessing != Some(team) && self.counter > 0 => {
                PossessionState::Provisional {
                    team,
                    counter: self.counter,
                }
            }
            (_, Some(team)) => PossessionState::Confirmed { team },
            _ => PossessionState::NoPossession,
        }
    }

    pub fn possessing_team(&self) -> Option<TeamSide> {
        self.possessing
    }

    pub fn closest_player(&self) -> Option<ClosestPlayer> {
        self.closest
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Frames processed so far.
    pub fn duration(&self) -> u64 {
        self.duration
    }
}

impl Default for PossessionTracker {
    fn default() -> Self {
        Self::new(PossessionConfig::default())
    }
}

/// Player with the smallest foot-to-ball distance, `None` when the ball is
/// missing or no player has a team.
fn find_closest(players: &[Player], ball: &Ball) -> Option<ClosestPlayer> {
    let ball_abs = ball.center_abs()?;
    if !players.iter().any(|p| p.team.is_some()) {
        return None;
    }

    players
        .iter()
        .filter_map(|p| p.distance_to_ball(ball).map(|d| (p, d)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(player, distance)| ClosestPlayer {
            track_id: player.track_id(),
            team: player.team,
            distance,
            ball_abs,
        })
}
