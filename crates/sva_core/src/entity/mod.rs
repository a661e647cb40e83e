//! # Entity Model
//!
//! Value objects rebuilt from tracker output every frame.
//!
//! - [`Detection`]: a tracked box with its mutable annotation bag
//! - [`Player`]: a detection plus its team, with foot points for ball checks
//! - [`Ball`]: at most one detection plus the persistent [`BallTrail`]
//! - [`Team`] / [`TeamRoster`]: the two sides and their running tallies

mod ball;
mod detection;
mod player;
mod team;
mod trail;

pub use ball::Ball;
pub use detection::{Detection, DetectionData, TrackId};
pub use player::{Channel, FieldThird, Player, TacticalZone};
pub use team::{format_clock, Team, TeamRoster, TeamSide};
pub use trail::BallTrail;
