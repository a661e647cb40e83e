//! Sparse nearest-teammate graph.

use crate::geometry::{distance, Point};

/// Edges from each point to at most `k` nearest others within `max_distance`.
///
/// Returned as `(from, to)` index pairs. An edge chosen by both endpoints is
/// kept once, attributed to the lower index, so no point originates more than
/// `k` edges.
pub fn nearest_neighbor_edges(points: &[Point], k: usize, max_distance: f32) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = Vec::with_capacity(points.len() * k);

    for (i, from) in points.iter().enumerate() {
        let mut nearby: Vec<(f32, usize)> = points
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, to)| (distance(from, to), j))
            .filter(|&(d, _)| d <= max_distance)
            .collect();
        nearby.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for &(_, j) in nearby.iter().take(k) {
            if j < i && edges.contains(&(j, i)) {
                continue;
            }
            edges.push((i, j));
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutual_edges_are_deduplicated() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)];
        let edges = nearest_neighbor_edges(&pts, 2, 100.0);
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_distance_cutoff_and_k() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(0.0, 6.0),
            Point::new(7.0, 7.0),
            Point::new(500.0, 500.0),
        ];
        let edges = nearest_neighbor_edges(&pts, 2, 50.0);
        assert!(edges.iter().all(|&(a, b)| a != 4 && b != 4));
        for i in 0..pts.len() {
            assert!(edges.iter().filter(|&&(from, _)| from == i).count() <= 2);
        }
        assert!(nearest_neighbor_edges(&pts[..1], 2, 50.0).is_empty());
    }
}
