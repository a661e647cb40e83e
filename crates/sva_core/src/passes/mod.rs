//! # Pass Detector
//!
//! Watches which player controls the ball frame by frame and turns
//! confirmed changes of control into pass events.
//!
//! ## Algorithm
//! 1. A player controls the ball when it is the frame's closest player and
//!    has a team
//! 2. A new controller must hold on for `same_team_frames` (teammate of the
//!    holder) or `cross_team_frames` (opponent) consecutive frames
//! 3. Teammate handoff with ball travel >= `min_pass_distance`: pass
//! 4. Opponent takes over: turnover, the sequence is discarded
//! 5. Frames without a controller keep the holder (ball in flight) and
//!    reset the candidate

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PassConfig;
use crate::entity::{Ball, TeamRoster, TeamSide, TrackId};
use crate::geometry::{distance, Point};
use crate::possession::ClosestPlayer;

/// A completed pass between two teammates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    /// Ball position (absolute) when the passer last controlled it
    pub start: Point,
    /// Ball position (absolute) when the receiver was confirmed
    pub end: Point,
    pub team: TeamSide,
    pub passer: TrackId,
    pub receiver: TrackId,
    /// Frame the pass was confirmed on
    pub frame: u64,
}

impl Pass {
    pub fn length(&self) -> f32 {
        distance(&self.start, &self.end)
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pass {} -> {} ({:.0}px)",
            self.team,
            self.passer,
            self.receiver,
            self.length()
        )
    }
}

/// What [`PassDetector::process_pass`] concluded for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassOutcome {
    /// No change of holder
    Idle,
    /// First confirmed holder of the run
    Acquired { holder: TrackId, team: TeamSide },
    Pass(Pass),
    /// Teammate took over without the ball travelling far enough
    Handoff { from: TrackId, to: TrackId },
    Turnover { from: TeamSide, to: TeamSide },
}

#[derive(Debug, Clone, Copy)]
struct Control {
    track_id: TrackId,
    team: TeamSide,
    ball: Point,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    control: Control,
    frames: u32,
}

#[derive(Debug, Clone)]
pub struct PassDetector {
    config: PassConfig,
    frame: u64,
    current: Option<Control>,
    holder: Option<Control>,
    candidate: Option<Candidate>,
}

impl PassDetector {
    pub fn new(config: PassConfig) -> Self {
        Self {
            config,
            frame: 0,
            current: None,
            holder: None,
            candidate: None,
        }
    }

    /// Record this frame's closest player and ball.
    pub fn update(&mut self, closest: Option<ClosestPlayer>, ball: &Ball) {
        self.frame += 1;
        self.current = match (closest, ball.center_abs()) {
            (Some(ClosestPlayer { track_id, team: Some(team), .. }), Some(ball)) => Some(Control {
                track_id,
                team,
                ball,
            }),
            _ => None,
        };
    }

    /// Resolve the frame recorded by [`update`](Self::update); passes are
    /// appended to the passing team in `roster`.
    pub fn process_pass(&mut self, roster: &mut TeamRoster) -> PassOutcome {
        let Some(control) = self.current.take() else {
            self.candidate = None;
            return PassOutcome::Idle;
        };

        if let Some(holder) = self.holder.as_mut() {
            if holder.track_id == control.track_id {
                holder.ball = control.ball;
                self.candidate = None;
                return PassOutcome::Idle;
            }
        }

        let frames = match self.candidate {
            Some(c) if c.control.track_id == control.track_id => c.frames + 1,
            _ => 1,
        };
        self.candidate = Some(Candidate { control, frames });

        let required = match self.holder {
            Some(holder) if holder.team != control.team => self.config.cross_team_frames,
            _ => self.config.same_team_frames,
        };
        if frames < required {
            return PassOutcome::Idle;
        }

        self.candidate = None;
        let previous = self.holder.replace(control);
        let outcome = match previous {
            None => PassOutcome::Acquired {
                holder: control.track_id,
                team: control.team,
            },
            Some(prev) if prev.team != control.team => PassOutcome::Turnover {
                from: prev.team,
                to: control.team,
            },
            Some(prev) if distance(&prev.ball, &control.ball) >= self.config.min_pass_distance => {
                let pass = Pass {
                    start: prev.ball,
                    end: control.ball,
                    team: control.team,
                    passer: prev.track_id,
                    receiver: control.track_id,
                    frame: self.frame,
                };
                roster.get_mut(pass.team).passes.push(pass);
                PassOutcome::Pass(pass)
            }
            Some(prev) => PassOutcome::Handoff {
                from: prev.track_id,
                to: control.track_id,
            },
        };

        match &outcome {
            PassOutcome::Pass(pass) => log::info!("Pass detected at frame {}: {}", self.frame, pass),
            PassOutcome::Turnover { from, to } => {
                log::debug!("Turnover at frame {}: {} -> {}", self.frame, from, to)
            }
            _ => {}
        }
        outcome
    }

    /// Confirmed ball holder, if any.
    pub fn holder(&self) -> Option<(TrackId, TeamSide)> {
        self.holder.map(|h| (h.track_id, h.team))
    }
}

impl Default for PassDetector {
    fn default() -> Self {
        Self::new(PassConfig::default())
    }
}
