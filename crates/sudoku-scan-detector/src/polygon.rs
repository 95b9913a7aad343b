//! Polygon approximation and the square-like candidate test (§4.1 step 4).

use sudoku_scan_core::Point2D;

/// Ramer-Douglas-Peucker polygon simplification with tolerance `epsilon`.
pub fn simplify_douglas_peucker(points: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    simplify_range(points, 0, points.len() - 1, epsilon, &mut keep);

    points
        .iter()
        .zip(keep.iter())
        .filter(|(_, &k)| k)
        .map(|(&p, _)| p)
        .collect()
}

fn simplify_range(points: &[Point2D], start: usize, end: usize, epsilon: f64, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;
    for i in (start + 1)..end {
        let d = perpendicular_distance(points[i], points[start], points[end]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        keep[max_idx] = true;
        simplify_range(points, start, max_idx, epsilon, keep);
        simplify_range(points, max_idx, end, epsilon, keep);
    }
}

fn perpendicular_distance(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-9 {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}

/// Closed-polygon perimeter (sum of edge lengths, wrapping last to first).
pub fn perimeter(points: &[Point2D]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
        })
        .sum()
}

/// Shoelace area of a simple polygon.
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    (area / 2.0).abs()
}

/// `true` if the four-vertex polygon is convex (consistent cross-product
/// sign turning at every vertex).
pub fn is_convex_quad(points: &[Point2D; 4]) -> bool {
    let cross = |o: Point2D, a: Point2D, b: Point2D| -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };
    let mut sign = 0.0;
    for i in 0..4 {
        let o = points[i];
        let a = points[(i + 1) % 4];
        let b = points[(i + 2) % 4];
        let c = cross(o, a, b);
        if c.abs() < 1e-9 {
            continue;
        }
        if sign == 0.0 {
            sign = c.signum();
        } else if c.signum() != sign {
            return false;
        }
    }
    true
}

/// The §4.1 step 4 "square-like" test: bounded aspect ratio between two
/// adjacent sides, diagonals not wildly skewed relative to area, and both
/// diagonals long enough to rule out degenerate slivers.
pub fn is_square_like(points: &[Point2D; 4], area: f64, perimeter: f64) -> bool {
    let side = |i: usize, j: usize| -> f64 {
        ((points[j].x - points[i].x).powi(2) + (points[j].y - points[i].y).powi(2)).sqrt()
    };
    let d3 = side(0, 1);
    let d4 = side(1, 2);
    let d1 = side(0, 2);
    let d2 = side(1, 3);

    if d3 < 1e-9 || d4 < 1e-9 {
        return false;
    }

    let aspect_ok = d3.max(d4) <= 4.0 * d3.min(d4);
    let skew_ok = d3 * d4 < 1.5 * area;
    let diagonal_floor = 0.15 * perimeter;
    let diagonals_ok = d1 >= diagonal_floor && d2 >= diagonal_floor;

    aspect_ok && skew_ok && diagonals_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> [Point2D; 4] {
        [
            Point2D::new(0.0, 0.0),
            Point2D::new(side, 0.0),
            Point2D::new(side, side),
            Point2D::new(0.0, side),
        ]
    }

    #[test]
    fn unit_square_is_convex_and_square_like() {
        let sq = square(100.0);
        assert!(is_convex_quad(&sq));
        let area = polygon_area(&sq);
        let per = perimeter(&sq);
        assert!(is_square_like(&sq, area, per));
    }

    #[test]
    fn extreme_sliver_fails_square_like() {
        let sliver = [
            Point2D::new(0.0, 0.0),
            Point2D::new(1000.0, 0.0),
            Point2D::new(1000.0, 1.0),
            Point2D::new(0.0, 1.0),
        ];
        let area = polygon_area(&sliver);
        let per = perimeter(&sliver);
        assert!(!is_square_like(&sliver, area, per));
    }

    #[test]
    fn douglas_peucker_collapses_near_straight_points() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.01),
            Point2D::new(2.0, 0.0),
            Point2D::new(10.0, 0.0),
        ];
        let simplified = simplify_douglas_peucker(&points, 0.5);
        assert_eq!(simplified.len(), 2);
    }
}
