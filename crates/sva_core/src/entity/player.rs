use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{Ball, Detection, TeamRoster, TeamSide, TrackId};
use crate::geometry::{distance, Point};

/// Longitudinal third of the field, along x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldThird {
    Defense,
    Midfield,
    Attack,
}

/// Lateral third of the field, along y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Left,
    Center,
    Right,
}

/// One cell of the 3x3 field grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TacticalZone {
    pub third: FieldThird,
    pub channel: Channel,
}

impl TacticalZone {
    /// Zone of a point on a `field_width` x `field_height` frame.
    ///
    /// Points outside the field clamp to the nearest edge zone.
    pub fn locate(point: Point, field_width: f32, field_height: f32) -> Self {
        let third = match band(point.x, field_width) {
            0 => FieldThird::Defense,
            1 => FieldThird::Midfield,
            _ => FieldThird::Attack,
        };
        let channel = match band(point.y, field_height) {
            0 => Channel::Left,
            1 => Channel::Center,
            _ => Channel::Right,
        };
        Self { third, channel }
    }

    /// `(row, col)` into a 3x3 grid: row is the third, col the channel.
    pub fn grid_index(&self) -> (usize, usize) {
        let row = match self.third {
            FieldThird::Defense => 0,
            FieldThird::Midfield => 1,
            FieldThird::Attack => 2,
        };
        let col = match self.channel {
            Channel::Left => 0,
            Channel::Center => 1,
            Channel::Right => 2,
        };
        (row, col)
    }
}

fn band(value: f32, extent: f32) -> usize {
    let third = extent / 3.0;
    if value < third {
        0
    } else if value < 2.0 * third {
        1
    } else {
        2
    }
}

impl fmt::Display for TacticalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let third = match self.third {
            FieldThird::Defense => "defense",
            FieldThird::Midfield => "midfield",
            FieldThird::Attack => "attack",
        };
        let channel = match self.channel {
            Channel::Left => "left",
            Channel::Center => "center",
            Channel::Right => "right",
        };
        write!(f, "{}_{}", third, channel)
    }
}

/// A detected person for the current frame, with its team if classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub detection: Detection,
    pub team: Option<TeamSide>,
}

impl Player {
    pub fn new(detection: Detection, team: Option<TeamSide>) -> Self {
        Self { detection, team }
    }

    /// Build players from smoothed detections, resolving labels to teams
    /// and stamping each classified detection with its team colour.
    pub fn from_detections(detections: Vec<Detection>, roster: &TeamRoster) -> Vec<Player> {
        detections
            .into_iter()
            .map(|mut detection| {
                let team = detection
                    .data
                    .label
                    .as_ref()
                    .and_then(|label| roster.side_for_label(label));
                detection.data.team = team;
                if let Some(side) = team {
                    detection.data.color = Some(roster.get(side).color);
                }
                Player::new(detection, team)
            })
            .collect()
    }

    pub fn track_id(&self) -> TrackId {
        self.detection.track_id
    }

    pub fn center(&self) -> Point {
        self.detection.bbox.center()
    }

    pub fn center_abs(&self) -> Point {
        self.detection.absolute().center()
    }

    /// Bottom-left corner of the box.
    pub fn left_foot(&self) -> Point {
        self.detection.bbox.bottom_left()
    }

    /// Bottom-right corner of the box.
    pub fn right_foot(&self) -> Point {
        self.detection.bbox.bottom_right
    }

    pub fn left_foot_abs(&self) -> Point {
        self.detection.absolute().bottom_left()
    }

    pub fn right_foot_abs(&self) -> Point {
        self.detection.absolute().bottom_right
    }

    /// Lesser of the two foot distances to the ball centre.
    pub fn distance_to_ball(&self, ball: &Ball) -> Option<f32> {
        let center = ball.center()?;
        Some(distance(&self.left_foot(), &center).min(distance(&self.right_foot(), &center)))
    }

    pub fn closest_foot_to_ball(&self, ball: &Ball) -> Option<Point> {
        let center = ball.center()?;
        let (left, right) = (self.left_foot(), self.right_foot());
        if distance(&left, &center) < distance(&right, &center) {
            Some(left)
        } else {
            Some(right)
        }
    }

    pub fn closest_foot_to_ball_abs(&self, ball: &Ball) -> Option<Point> {
        let center = ball.center_abs()?;
        let (left, right) = (self.left_foot_abs(), self.right_foot_abs());
        if distance(&left, &center) < distance(&right, &center) {
            Some(left)
        } else {
            Some(right)
        }
    }

    pub fn distance_to_player(&self, other: &Player) -> f32 {
        distance(&self.center(), &other.center())
    }

    /// Up to `n` teammates ordered by centre distance; empty when unclassified.
    pub fn nearest_teammates<'a>(&self, players: &'a [Player], n: usize) -> Vec<&'a Player> {
        let Some(team) = self.team else {
            return Vec::new();
        };
        let mut mates: Vec<&Player> = players
            .iter()
            .filter(|p| p.team == Some(team) && p.track_id() != self.track_id())
            .collect();
        mates.sort_by(|a, b| self.distance_to_player(a).total_cmp(&self.distance_to_player(b)));
        mates.truncate(n);
        mates
    }

    pub fn tactical_zone(&self, field_width: f32, field_height: f32) -> TacticalZone {
        TacticalZone::locate(self.center(), field_width, field_height)
    }

    /// Whether any teammate shares this player's row or column within `tolerance` px.
    pub fn is_in_formation_line(&self, teammates: &[&Player], tolerance: f32) -> bool {
        if teammates.len() < 2 {
            return false;
        }
        let me = self.center();
        teammates.iter().any(|p| {
            let c = p.center();
            (c.y - me.y).abs() < tolerance || (c.x - me.x).abs() < tolerance
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TeamLabel;
    use crate::geometry::BoundingBox;

    fn player_at(id: u64, x: f32, y: f32, team: Option<TeamSide>) -> Player {
        let det = Detection::new(id, BoundingBox::from_corners(x - 5.0, y - 10.0, x + 5.0, y + 10.0), 0.9);
        Player::new(det, team)
    }

    #[test]
    fn test_feet_are_bottom_corners() {
        let p = player_at(1, 50.0, 50.0, None);
        assert_eq!(p.left_foot(), Point::new(45.0, 60.0));
        assert_eq!(p.right_foot(), Point::new(55.0, 60.0));
        assert_eq!(p.center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_distance_to_ball_uses_nearer_foot() {
        let p = player_at(1, 50.0, 50.0, Some(TeamSide::Home));
        let mut ball = Ball::default();
        ball.set_detection(Some(Detection::new(
            99,
            BoundingBox::from_corners(57.0, 58.0, 61.0, 62.0),
            0.9,
        )));
        // Ball centre (59, 60), right foot (55, 60)
        assert!((p.distance_to_ball(&ball).unwrap() - 4.0).abs() < 1e-4);
        assert_eq!(p.closest_foot_to_ball(&ball), Some(Point::new(55.0, 60.0)));

        ball.set_detection(None);
        assert!(p.distance_to_ball(&ball).is_none());
    }

    #[test]
    fn test_nearest_teammates() {
        let players = vec![
            player_at(1, 0.0, 0.0, Some(TeamSide::Home)),
            player_at(2, 100.0, 0.0, Some(TeamSide::Home)),
            player_at(3, 10.0, 0.0, Some(TeamSide::Home)),
            player_at(4, 5.0, 0.0, Some(TeamSide::Away)),
            player_at(5, 50.0, 0.0, Some(TeamSide::Home)),
        ];
        let mates = players[0].nearest_teammates(&players, 2);
        let ids: Vec<u64> = mates.iter().map(|p| p.track_id().0).collect();
        assert_eq!(ids, vec![3, 5]);

        let loner = player_at(9, 0.0, 0.0, None);
        assert!(loner.nearest_teammates(&players, 2).is_empty());
    }

    #[test]
    fn test_tactical_zone() {
        let p = player_at(1, 100.0, 900.0, None);
        let zone = p.tactical_zone(1920.0, 1080.0);
        assert_eq!(zone.third, FieldThird::Defense);
        assert_eq!(zone.channel, Channel::Right);
        assert_eq!(zone.to_string(), "defense_right");

        let zone = TacticalZone::locate(Point::new(1000.0, 500.0), 1920.0, 1080.0);
        assert_eq!(zone.grid_index(), (1, 1));
        let zone = TacticalZone::locate(Point::new(5000.0, -20.0), 1920.0, 1080.0);
        assert_eq!(zone.to_string(), "attack_left");
    }

    #[test]
    fn test_from_detections_resolves_teams() {
        let roster = TeamRoster::default();
        let mut home = Detection::new(1, BoundingBox::from_corners(0.0, 0.0, 10.0, 20.0), 0.8);
        home.data.label = Some(TeamLabel::new("Inter Miami"));
        let mut referee = Detection::new(2, BoundingBox::from_corners(0.0, 0.0, 10.0, 20.0), 0.8);
        referee.data.label = Some(TeamLabel::new("Referee"));

        let players = Player::from_detections(vec![home, referee], &roster);
        assert_eq!(players[0].team, Some(TeamSide::Home));
        assert_eq!(players[0].detection.data.color, Some(roster.home.color));
        assert_eq!(players[1].team, None);
        assert_eq!(players[1].detection.data.color, None);
    }
}
