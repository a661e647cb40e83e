//! # Score Boards
//!
//! Layout of the possession and passes counters: two team counters side by
//! side with a split bar underneath.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ [MIA| 00:12]  [PAL| 00:30]   │  counters
//! │ [███ 28% ███|█████ 71% █████]│  split bar
//! └──────────────────────────────┘
//! ```

use sva_core::geometry::{Point, Rgb, Rgba};
use sva_core::snapshot::{MatchSummary, TeamSummary};

use crate::display_list::{Corners, DrawCommand};

/// Board distance from the right frame edge.
pub const BOARD_RIGHT_OFFSET: f32 = 540.0;
pub const BOARD_TOP: f32 = 40.0;
pub const BOARD_WIDTH: f32 = 378.0;
pub const BOARD_HEIGHT: f32 = 252.0;
pub const BOARD_ALPHA: u8 = 210;

pub const COUNTER_OFFSET: (f32, f32) = (35.0, 130.0);
pub const COUNTER_WIDTH: f32 = 150.0;
pub const COUNTER_HEIGHT: f32 = 31.0;
pub const COUNTER_GAP: f32 = 10.0;
/// Share of a counter taken by the team abbreviation
pub const COUNTER_TEAM_RATIO: f32 = 0.417;
pub const COUNTER_RADIUS: f32 = 20.0;
pub const COUNTER_VALUE_BACKGROUND: Rgb = Rgb(239, 234, 229);

pub const BAR_OFFSET: (f32, f32) = (35.0, 195.0);
pub const BAR_WIDTH: f32 = 310.0;
pub const BAR_HEIGHT: f32 = 29.0;
pub const BAR_RADIUS: f32 = 15.0;
/// The narrower segment is widened by this much under the wider one
pub const BAR_OVERLAP: f32 = 20.0;
pub const BAR_MIN_RATIO: f32 = 0.07;
pub const BAR_MAX_RATIO: f32 = 0.93;
/// Home percentage is printed only above this ratio
pub const HOME_TEXT_MIN_RATIO: f32 = 0.15;
/// Away percentage is printed only below this ratio
pub const AWAY_TEXT_MAX_RATIO: f32 = 0.85;

pub const TEXT_SIZE: f32 = 18.0;

/// Geometry of a two-colour split bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitBar {
    /// Home ratio after clamping to `[BAR_MIN_RATIO, BAR_MAX_RATIO]`
    pub ratio: f32,
    pub home: (Point, Point),
    pub away: (Point, Point),
    pub home_text: Option<String>,
    pub away_text: Option<String>,
}

impl SplitBar {
    /// Lay out a bar at `origin` for the raw home/away shares.
    pub fn new(origin: Point, home_share: f32, away_share: f32) -> Self {
        let ratio = home_share.clamp(BAR_MIN_RATIO, BAR_MAX_RATIO);
        let split_x = (origin.x + ratio * BAR_WIDTH).floor();
        let bottom = origin.y + BAR_HEIGHT;

        Self {
            ratio,
            home: (origin, Point::new(split_x, bottom)),
            away: (Point::new(split_x, origin.y), Point::new(origin.x + BAR_WIDTH, bottom)),
            home_text: (ratio > HOME_TEXT_MIN_RATIO).then(|| percent(home_share)),
            away_text: (ratio < AWAY_TEXT_MAX_RATIO).then(|| percent(away_share)),
        }
    }

    pub fn commands(&self, home: &TeamSummary, away: &TeamSummary) -> Vec<DrawCommand> {
        let mut home_rect = self.home;
        let mut away_rect = self.away;
        let home_fill = home.board_color.with_alpha(255);
        let away_fill = away.board_color.with_alpha(255);

        let mut cmds = Vec::with_capacity(4);
        if self.ratio < HOME_TEXT_MIN_RATIO {
            home_rect.1.x += BAR_OVERLAP;
            cmds.push(DrawCommand::filled_rect(home_rect.0, home_rect.1, home_fill, BAR_RADIUS, Corners::Left));
            cmds.push(DrawCommand::filled_rect(away_rect.0, away_rect.1, away_fill, BAR_RADIUS, Corners::Right));
        } else {
            away_rect.0.x -= BAR_OVERLAP;
            cmds.push(DrawCommand::filled_rect(away_rect.0, away_rect.1, away_fill, BAR_RADIUS, Corners::Right));
            cmds.push(DrawCommand::filled_rect(home_rect.0, home_rect.1, home_fill, BAR_RADIUS, Corners::Left));
        }

        if let Some(text) = &self.home_text {
            cmds.push(DrawCommand::centered_text(
                self.home.0,
                self.home.1,
                text.clone(),
                home.text_color.with_alpha(255),
                TEXT_SIZE,
            ));
        }
        if let Some(text) = &self.away_text {
            cmds.push(DrawCommand::centered_text(
                self.away.0,
                self.away.1,
                text.clone(),
                away.text_color.with_alpha(255),
                TEXT_SIZE,
            ));
        }
        cmds
    }
}

/// Whole percent, truncated.
fn percent(share: f32) -> String {
    format!("{}%", (share * 100.0) as u32)
}

/// Abbreviation box plus value box.
fn counter(origin: Point, team: &TeamSummary, value: &str) -> Vec<DrawCommand> {
    let team_width = COUNTER_WIDTH * COUNTER_TEAM_RATIO;
    let team_end = Point::new(origin.x + team_width, origin.y + COUNTER_HEIGHT);
    let value_start = Point::new(origin.x + team_width, origin.y);
    let value_end = Point::new(origin.x + COUNTER_WIDTH, origin.y + COUNTER_HEIGHT);

    vec![
        DrawCommand::filled_rect(origin, team_end, team.board_color.with_alpha(255), COUNTER_RADIUS, Corners::Left),
        DrawCommand::filled_rect(
            value_start,
            value_end,
            COUNTER_VALUE_BACKGROUND.with_alpha(255),
            COUNTER_RADIUS,
            Corners::Right,
        ),
        DrawCommand::centered_text(origin, team_end, team.abbreviation.clone(), team.text_color.with_alpha(255), TEXT_SIZE),
        DrawCommand::centered_text(value_start, value_end, value, Rgb::BLACK.with_alpha(255), TEXT_SIZE),
    ]
}

fn board(
    origin: Point,
    summary: &MatchSummary,
    home_value: &str,
    away_value: &str,
    bar: SplitBar,
) -> Vec<DrawCommand> {
    let mut cmds = vec![DrawCommand::filled_rect(
        origin,
        Point::new(origin.x + BOARD_WIDTH, origin.y + BOARD_HEIGHT),
        Rgba(24, 24, 24, BOARD_ALPHA),
        COUNTER_RADIUS,
        Corners::All,
    )];

    let home_origin = Point::new(origin.x + COUNTER_OFFSET.0, origin.y + COUNTER_OFFSET.1);
    let away_origin = Point::new(home_origin.x + COUNTER_WIDTH + COUNTER_GAP, home_origin.y);
    cmds.extend(counter(home_origin, &summary.home, home_value));
    cmds.extend(counter(away_origin, &summary.away, away_value));
    cmds.extend(bar.commands(&summary.home, &summary.away));
    cmds
}

/// Top-left corner of a board for a frame `frame_width` wide, `row` boards down.
pub fn board_origin(frame_width: f32, row: usize) -> Point {
    Point::new(
        frame_width - BOARD_RIGHT_OFFSET,
        BOARD_TOP + row as f32 * (BOARD_HEIGHT + COUNTER_GAP),
    )
}

/// Possession times and the possession split bar.
pub fn possession_board(summary: &MatchSummary, origin: Point) -> Vec<DrawCommand> {
    let bar = SplitBar::new(
        Point::new(origin.x + BAR_OFFSET.0, origin.y + BAR_OFFSET.1),
        summary.home.possession_ratio,
        summary.away.possession_ratio,
    );
    board(
        origin,
        summary,
        &summary.home.possession_time,
        &summary.away.possession_time,
        bar,
    )
}

/// Pass counts and the pass-share split bar.
pub fn passes_board(summary: &MatchSummary, origin: Point) -> Vec<DrawCommand> {
    let total = summary.home.passes + summary.away.passes;
    let (home_share, away_share) = if total == 0 {
        (0.0, 0.0)
    } else {
        (
            summary.home.passes as f32 / total as f32,
            summary.away.passes as f32 / total as f32,
        )
    };
    let bar = SplitBar::new(
        Point::new(origin.x + BAR_OFFSET.0, origin.y + BAR_OFFSET.1),
        home_share,
        away_share,
    );
    board(
        origin,
        summary,
        &summary.home.passes.to_string(),
        &summary.away.passes.to_string(),
        bar,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sva_core::entity::TeamRoster;

    #[test]
    fn test_bar_clamps_and_hides_narrow_text() {
        let bar = SplitBar::new(Point::new(0.0, 0.0), 0.02, 0.98);
        assert!((bar.ratio - BAR_MIN_RATIO).abs() < 1e-6);
        assert!(bar.home_text.is_none());
        assert_eq!(bar.away_text.as_deref(), Some("98%"));

        let bar = SplitBar::new(Point::new(0.0, 0.0), 0.9, 0.1);
        assert_eq!(bar.home_text.as_deref(), Some("90%"));
        assert!(bar.away_text.is_none());

        let bar = SplitBar::new(Point::new(10.0, 0.0), 0.5, 0.5);
        assert_eq!(bar.home.1.x, 165.0);
        assert_eq!(bar.away.0.x, 165.0);
        assert_eq!(bar.away.1.x, 320.0);
    }

    #[test]
    fn test_wider_segment_painted_last() {
        let mut roster = TeamRoster::default();
        roster.home.possession_frames = 10;
        roster.away.possession_frames = 90;
        let summary = MatchSummary::new(&roster, 100, 30.0, None);
        let bar = SplitBar::new(Point::new(0.0, 0.0), 0.1, 0.9);
        let cmds = bar.commands(&summary.home, &summary.away);

        // Home is narrow: widened under the away segment, painted first
        match &cmds[0] {
            DrawCommand::Rect { bottom_right, corners, .. } => {
                assert_eq!(*corners, Corners::Left);
                assert_eq!(bottom_right.x, 31.0 + BAR_OVERLAP);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_possession_board_texts() {
        let mut roster = TeamRoster::default();
        roster.home.possession_frames = 360;
        roster.away.possession_frames = 900;
        let summary = MatchSummary::new(&roster, 1260, 30.0, None);

        let cmds = possession_board(&summary, board_origin(1920.0, 0));
        let texts: Vec<String> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["MIA", "00:12", "PAL", "00:30", "28%", "71%"]);
    }

    #[test]
    fn test_passes_board_without_passes() {
        let summary = MatchSummary::new(&TeamRoster::default(), 10, 30.0, None);
        let cmds = passes_board(&summary, board_origin(1280.0, 1));
        let texts: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["MIA", "0", "PAL", "0", "0%"]);
    }
}
