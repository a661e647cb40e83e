//! Convex hull and polygon area.

use crate::error::GeometryError;
use crate::geometry::Point;

/// z-component of `(a - o) x (b - o)`.
fn cross(o: &Point, a: &Point, b: &Point) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull vertices in a closed loop order (monotone chain).
///
/// Collinear points on an edge are dropped. Fewer than three points, or
/// points that all lie on one line, are errors.
pub fn convex_hull(points: &[Point]) -> Result<Vec<Point>, GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::InsufficientPoints {
            found: points.len(),
        });
    }

    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in &sorted {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }

    // Last point of each chain is the first of the other
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Err(GeometryError::Collinear);
    }
    Ok(lower)
}

/// Absolute area of a simple polygon (shoelace formula).
pub fn polygon_area(vertices: &[Point]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let twice: f32 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_hull_keeps_all_points() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(hull.len(), 3);
        for p in &pts {
            assert!(hull.contains(p));
        }
        assert!((polygon_area(&hull) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_interior_points_dropped() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 0.0),
        ];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(5.0, 5.0)));
        assert!((polygon_area(&hull) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(
            convex_hull(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            Err(GeometryError::InsufficientPoints { found: 2 })
        );
        let line = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert_eq!(convex_hull(&line), Err(GeometryError::Collinear));
        let same = [Point::new(3.0, 3.0); 4];
        assert_eq!(convex_hull(&same), Err(GeometryError::Collinear));
    }
}
