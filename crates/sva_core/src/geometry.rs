//! # Frame Geometry
//!
//! Pixel-space primitives shared by every stage: points, boxes, colours and
//! the camera-motion transform supplied by the tracker.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A position in frame pixels (x to the right, y downwards).
pub type Point = Point2<f32>;

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f32 {
    nalgebra::distance(a, b)
}

/// Arithmetic mean of a set of points, `None` when empty.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Axis-aligned box given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoundingBox {
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Build from raw corner coordinates `(x1, y1, x2, y2)`.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    pub fn width(&self) -> f32 {
        (self.bottom_right.x - self.top_left.x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.bottom_right.y - self.top_left.y).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn is_degenerate(&self) -> bool {
        self.area() <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x, self.bottom_right.y)
    }

    /// Map both corners through a point transform.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self::new(f(self.top_left), f(self.bottom_right))
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Attach an alpha channel.
    pub fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba(self.0, self.1, self.2, alpha)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub fn rgb(self) -> Rgb {
        Rgb(self.0, self.1, self.2)
    }

    pub fn alpha(self) -> u8 {
        self.3
    }
}

/// Camera-motion compensation between frame-relative and absolute
/// (pitch-anchored) coordinates.
///
/// Implemented by the external tracker; the engine only consumes it.
pub trait CoordinateTransform {
    fn rel_to_abs(&self, point: Point) -> Point;
    fn abs_to_rel(&self, point: Point) -> Point;
}

/// Transform for a static camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl CoordinateTransform for IdentityTransform {
    fn rel_to_abs(&self, point: Point) -> Point {
        point
    }

    fn abs_to_rel(&self, point: Point) -> Point {
        point
    }
}

/// Pure translation, the common case for a panning broadcast camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationTransform {
    /// Offset added to relative points to obtain absolute points.
    pub offset: nalgebra::Vector2<f32>,
}

impl TranslationTransform {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self {
            offset: nalgebra::Vector2::new(dx, dy),
        }
    }
}

impl CoordinateTransform for TranslationTransform {
    fn rel_to_abs(&self, point: Point) -> Point {
        point + self.offset
    }

    fn abs_to_rel(&self, point: Point) -> Point {
        point - self.offset
    }
}
