//! # Display List Renderer
//!
//! Draws a [`FrameSnapshot`] as an ordered list of [`DrawCommand`]s.
//!
//! Paint order, bottom to top:
//! 1. Ball trail segments and markers
//! 2. Formation polygons, then connection lines
//! 3. Player boxes and the ball
//! 4. Closest-player pointer
//! 5. Pass arrows
//! 6. Boards, info panel and per-team tactical text

use serde::{Deserialize, Serialize};
use sva_core::entity::TeamSide;
use sva_core::geometry::{distance, Point, Rgb, Rgba};
use sva_core::snapshot::{FrameSnapshot, PlayerView};
use sva_core::RenderAdapter;

use crate::board;
use crate::display_list::{Corners, DisplayList, DrawCommand};

const PLAYER_RADIUS: f32 = 5.0;
const PLAYER_OUTLINE_WIDTH: f32 = 3.0;
const LABEL_SIZE: f32 = 14.0;

const POINTER_TIP_OFFSET: f32 = 8.0;
const POINTER_BASE_OFFSET: f32 = 25.0;
const POINTER_HALF_WIDTH: f32 = 10.0;

const ARROW_WIDTH: f32 = 2.0;
const ARROW_ALPHA: u8 = 200;
const ARROW_HEAD_LENGTH: f32 = 12.0;
const ARROW_HEAD_HALF_WIDTH: f32 = 6.0;

const PANEL_WIDTH: f32 = 300.0;
const PANEL_HEIGHT: f32 = 200.0;
const PANEL_MARGIN: f32 = 20.0;
const PANEL_PADDING: f32 = 10.0;
const PANEL_LINE_STEP: f32 = 15.0;
const PANEL_FILL: Rgba = Rgba(0, 0, 0, 180);
const PANEL_OUTLINE: Rgba = Rgba(255, 255, 255, 200);

const TACTICAL_HOME_X: f32 = 50.0;
/// Away column distance from the right frame edge
const TACTICAL_AWAY_OFFSET: f32 = 300.0;
const TACTICAL_TOP: f32 = 50.0;
const TACTICAL_LINE_STEP: f32 = 20.0;

/// Optional decorations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Track id above each player box
    pub show_ids: bool,
    pub show_confidence: bool,
    /// Line from the closest player's foot to the ball
    pub debug: bool,
}

/// [`RenderAdapter`] producing a [`DisplayList`] for a fixed frame size.
#[derive(Debug, Clone)]
pub struct DisplayListRenderer {
    frame_width: u32,
    frame_height: u32,
    style: OverlayStyle,
    frames_rendered: u64,
}

impl DisplayListRenderer {
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self::with_style(frame_width, frame_height, OverlayStyle::default())
    }

    pub fn with_style(frame_width: u32, frame_height: u32, style: OverlayStyle) -> Self {
        Self {
            frame_width,
            frame_height,
            style,
            frames_rendered: 0,
        }
    }

    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn width(&self) -> f32 {
        self.frame_width as f32
    }

    fn height(&self) -> f32 {
        self.frame_height as f32
    }

    fn draw_trail(&self, snapshot: &FrameSnapshot, list: &mut DisplayList) {
        for seg in &snapshot.trail {
            list.push(DrawCommand::Line {
                start: seg.start,
                end: seg.end,
                color: seg.color,
                width: seg.width,
            });
        }
        for marker in &snapshot.trail_markers {
            list.push(DrawCommand::Ellipse {
                center: marker.center,
                radius: marker.radius,
                fill: Some(marker.fill),
                outline: Some(marker.outline),
                outline_width: 1.0,
            });
        }
    }

    fn draw_formation(&self, snapshot: &FrameSnapshot, list: &mut DisplayList) {
        for poly in &snapshot.polygons {
            list.push(DrawCommand::Polygon {
                vertices: poly.vertices.clone(),
                fill: Some(poly.fill),
                outline: Some(poly.outline),
                outline_width: poly.outline_width,
            });
        }
        for line in &snapshot.lines {
            list.push(DrawCommand::Line {
                start: line.start,
                end: line.end,
                color: line.color,
                width: line.width,
            });
        }
    }

    fn draw_player(&self, player: &PlayerView, list: &mut DisplayList) {
        let color = player_color(player).with_alpha(255);
        list.push(DrawCommand::Rect {
            top_left: player.bbox.top_left,
            bottom_right: player.bbox.bottom_right,
            fill: None,
            outline: Some(color),
            outline_width: PLAYER_OUTLINE_WIDTH,
            corner_radius: PLAYER_RADIUS,
            corners: Corners::All,
        });

        let mut label = Vec::new();
        if self.style.show_ids {
            label.push(player.track_id.to_string());
        }
        if self.style.show_confidence {
            label.push(format!("{:.2}", player.confidence));
        }
        if !label.is_empty() {
            let origin = Point::new(player.bbox.top_left.x, player.bbox.top_left.y - LABEL_SIZE - 2.0);
            list.push(DrawCommand::text(origin, label.join(" "), color, LABEL_SIZE));
        }
    }

    fn draw_ball(&self, snapshot: &FrameSnapshot, list: &mut DisplayList) {
        let Some(bbox) = snapshot.ball.bbox else {
            return;
        };
        list.push(DrawCommand::Ellipse {
            center: bbox.center(),
            radius: bbox.width().max(bbox.height()) / 2.0,
            fill: None,
            outline: Some(snapshot.ball.color.with_alpha(255)),
            outline_width: 2.0,
        });
    }

    fn draw_closest(&self, snapshot: &FrameSnapshot, list: &mut DisplayList) {
        let Some(closest) = &snapshot.closest_player else {
            return;
        };
        let Some(player) = snapshot.player(closest.track_id) else {
            return;
        };

        let cx = player.bbox.center().x;
        let top = player.bbox.top_left.y;
        list.push(DrawCommand::Polygon {
            vertices: vec![
                Point::new(cx, top - POINTER_TIP_OFFSET),
                Point::new(cx - POINTER_HALF_WIDTH, top - POINTER_BASE_OFFSET),
                Point::new(cx + POINTER_HALF_WIDTH, top - POINTER_BASE_OFFSET),
            ],
            fill: Some(player_color(player).with_alpha(255)),
            outline: Some(Rgb::BLACK.with_alpha(255)),
            outline_width: 1.0,
        });

        if self.style.debug {
            if let Some(ball) = snapshot.ball.bbox {
                let target = ball.center();
                let left = player.bbox.bottom_left();
                let right = player.bbox.bottom_right;
                let foot = if distance(&left, &target) <= distance(&right, &target) {
                    left
                } else {
                    right
                };
                list.push(DrawCommand::Line {
                    start: foot,
                    end: target,
                    color: Rgb::BLACK.with_alpha(255),
                    width: 2.0,
                });
            }
        }
    }

    fn draw_passes(&self, snapshot: &FrameSnapshot, list: &mut DisplayList) {
        for pass in &snapshot.passes {
            let color = snapshot.summary.team(pass.team).color.with_alpha(ARROW_ALPHA);
            list.extend(arrow(pass.start, pass.end, color));
        }
    }

    fn draw_info_panel(&self, snapshot: &FrameSnapshot, list: &mut DisplayList) {
        let summary = &snapshot.summary;
        let x = self.width() - PANEL_WIDTH - PANEL_MARGIN;
        let y = self.height() - PANEL_HEIGHT - PANEL_MARGIN;

        list.push(DrawCommand::Rect {
            top_left: Point::new(x, y),
            bottom_right: Point::new(x + PANEL_WIDTH, y + PANEL_HEIGHT),
            fill: Some(PANEL_FILL),
            outline: Some(PANEL_OUTLINE),
            outline_width: 2.0,
            corner_radius: 0.0,
            corners: Corners::None,
        });

        let possessing = summary
            .possessing_team
            .map(|side| summary.team(side).name.clone())
            .unwrap_or_else(|| "N/A".to_string());
        let lines = [
            format!("Duration: {}", summary.duration_clock()),
            format!(
                "Possession {}: {:.1}%",
                summary.home.abbreviation,
                summary.home.possession_ratio * 100.0
            ),
            format!(
                "Possession {}: {:.1}%",
                summary.away.abbreviation,
                summary.away.possession_ratio * 100.0
            ),
            format!("Passes {}: {}", summary.home.abbreviation, summary.home.passes),
            format!("Passes {}: {}", summary.away.abbreviation, summary.away.passes),
            format!("In possession: {}", possessing),
        ];
        for (i, text) in lines.into_iter().enumerate() {
            let origin = Point::new(x + PANEL_PADDING, y + PANEL_PADDING + i as f32 * PANEL_LINE_STEP);
            list.push(DrawCommand::text(origin, text, Rgb::WHITE.with_alpha(255), LABEL_SIZE));
        }
    }

    fn draw_tactical_text(&self, snapshot: &FrameSnapshot, list: &mut DisplayList) {
        for side in TeamSide::ALL {
            let Some(stats) = snapshot.stats_for(side) else {
                continue;
            };
            let team = snapshot.summary.team(side);
            let x = match side {
                TeamSide::Home => TACTICAL_HOME_X,
                TeamSide::Away => self.width() - TACTICAL_AWAY_OFFSET,
            };

            let center = stats
                .centroid
                .map(|c| format!("Center: ({:.0}, {:.0})", c.x, c.y))
                .unwrap_or_else(|| "Center: n/a".to_string());
            let lines = [
                team.name.clone(),
                format!("Formation: {}", stats.formation.as_deref().unwrap_or("n/a")),
                format!("Players: {}", stats.player_count),
                format!("Compactness: {:.1}px", stats.compactness),
                center,
            ];
            for (i, text) in lines.into_iter().enumerate() {
                // Team name in team colour, figures in white
                let color = if i == 0 { team.color } else { Rgb::WHITE };
                let origin = Point::new(x, TACTICAL_TOP + i as f32 * TACTICAL_LINE_STEP);
                list.push(DrawCommand::text(origin, text, color.with_alpha(255), LABEL_SIZE));
            }
        }
    }
}

impl RenderAdapter for DisplayListRenderer {
    type Output = DisplayList;

    fn render(&mut self, snapshot: &FrameSnapshot) -> DisplayList {
        let mut list = DisplayList::new(self.frame_width, self.frame_height);
        let layers = snapshot.layers;

        self.draw_trail(snapshot, &mut list);
        self.draw_formation(snapshot, &mut list);
        for player in &snapshot.players {
            self.draw_player(player, &mut list);
        }
        self.draw_ball(snapshot, &mut list);
        if layers.possession {
            self.draw_closest(snapshot, &mut list);
        }
        if layers.passes {
            self.draw_passes(snapshot, &mut list);
        }

        let mut row = 0;
        if layers.possession {
            list.extend(board::possession_board(&snapshot.summary, board::board_origin(self.width(), row)));
            row += 1;
        }
        if layers.passes {
            list.extend(board::passes_board(&snapshot.summary, board::board_origin(self.width(), row)));
        }
        if layers.tactical_info {
            self.draw_info_panel(snapshot, &mut list);
            self.draw_tactical_text(snapshot, &mut list);
        }

        self.frames_rendered += 1;
        log::trace!(
            "frame {} rendered: {} commands",
            snapshot.frame_index,
            list.len()
        );
        list
    }
}

/// Unclassified players are outlined in white.
fn player_color(player: &PlayerView) -> Rgb {
    player.color.unwrap_or(Rgb::WHITE)
}

/// Shaft plus filled head; nothing for a zero-length pass.
fn arrow(start: Point, end: Point, color: Rgba) -> Vec<DrawCommand> {
    let delta = end - start;
    let length = delta.norm();
    if length <= f32::EPSILON {
        return Vec::new();
    }
    let dir = delta / length;
    let normal = nalgebra::Vector2::new(-dir.y, dir.x);
    let base = end - dir * ARROW_HEAD_LENGTH.min(length);

    vec![
        DrawCommand::Line {
            start,
            end: base,
            color,
            width: ARROW_WIDTH,
        },
        DrawCommand::Polygon {
            vertices: vec![
                end,
                base + normal * ARROW_HEAD_HALF_WIDTH,
                base - normal * ARROW_HEAD_HALF_WIDTH,
            ],
            fill: Some(color),
            outline: None,
            outline_width: 0.0,
        },
    ]
}
