//! Backend-neutral drawing primitives.

use serde::{Deserialize, Serialize};
use sva_core::geometry::{Point, Rgba};

/// Which corners of a rectangle are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corners {
    None,
    All,
    Left,
    Right,
}

/// How a text origin is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    TopLeft,
    /// Origin is the centre of the text box
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        start: Point,
        end: Point,
        color: Rgba,
        width: f32,
    },
    Polygon {
        vertices: Vec<Point>,
        fill: Option<Rgba>,
        outline: Option<Rgba>,
        outline_width: f32,
    },
    Ellipse {
        center: Point,
        radius: f32,
        fill: Option<Rgba>,
        outline: Option<Rgba>,
        outline_width: f32,
    },
    Rect {
        top_left: Point,
        bottom_right: Point,
        fill: Option<Rgba>,
        outline: Option<Rgba>,
        outline_width: f32,
        corner_radius: f32,
        corners: Corners,
    },
    Text {
        origin: Point,
        text: String,
        color: Rgba,
        size: f32,
        anchor: TextAnchor,
    },
}

impl DrawCommand {
    pub fn text(origin: Point, text: impl Into<String>, color: Rgba, size: f32) -> Self {
        DrawCommand::Text {
            origin,
            text: text.into(),
            color,
            size,
            anchor: TextAnchor::TopLeft,
        }
    }

    /// Text centred inside the box `top_left`..`bottom_right`.
    pub fn centered_text(top_left: Point, bottom_right: Point, text: impl Into<String>, color: Rgba, size: f32) -> Self {
        DrawCommand::Text {
            origin: Point::new(
                (top_left.x + bottom_right.x) / 2.0,
                (top_left.y + bottom_right.y) / 2.0,
            ),
            text: text.into(),
            color,
            size,
            anchor: TextAnchor::Center,
        }
    }

    pub fn filled_rect(top_left: Point, bottom_right: Point, fill: Rgba, corner_radius: f32, corners: Corners) -> Self {
        DrawCommand::Rect {
            top_left,
            bottom_right,
            fill: Some(fill),
            outline: None,
            outline_width: 0.0,
            corner_radius,
            corners,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Line { .. } => "line",
            DrawCommand::Polygon { .. } => "polygon",
            DrawCommand::Ellipse { .. } => "ellipse",
            DrawCommand::Rect { .. } => "rect",
            DrawCommand::Text { .. } => "text",
        }
    }
}

/// Ordered drawing instructions for one frame; later commands paint over
/// earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Number of commands of the given kind (`"line"`, `"text"`, ...).
    pub fn count(&self, kind: &str) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }

    /// Text runs in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> sva_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
