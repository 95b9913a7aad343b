//! Two-level contour hierarchy extraction (§4.1 step 4).

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;

/// An outer contour paired with the indices of its immediate children.
pub struct OuterContour {
    pub points: Vec<Point<i32>>,
    pub child_count: usize,
}

/// Find outer contours that enclose at least one child contour. A Sudoku
/// grid's outline always has inner cell-boundary contours, so contours
/// with no children are filtered out before the (more expensive) polygon
/// approximation step runs on them.
pub fn outer_contours_with_children(binary: &GrayImage) -> Vec<OuterContour> {
    let contours: Vec<Contour<i32>> = find_contours(binary);

    let mut child_counts = vec![0usize; contours.len()];
    for contour in &contours {
        if let Some(parent) = contour.parent {
            child_counts[parent] += 1;
        }
    }

    contours
        .into_iter()
        .enumerate()
        .filter(|(_, c)| c.border_type == BorderType::Outer)
        .filter(|(i, _)| child_counts[*i] > 0)
        .map(|(i, c)| OuterContour {
            points: c.points,
            child_count: child_counts[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn nested_squares_produce_one_outer_contour_with_a_child() {
        let mut image = GrayImage::new(40, 40);
        for y in 5..35 {
            for x in 5..35 {
                image.put_pixel(x, y, Luma([255]));
            }
        }
        for y in 15..25 {
            for x in 15..25 {
                image.put_pixel(x, y, Luma([0]));
            }
        }
        let outers = outer_contours_with_children(&image);
        assert_eq!(outers.len(), 1);
        assert_eq!(outers[0].child_count, 1);
    }

    #[test]
    fn solid_square_with_no_hole_has_no_qualifying_outer_contour() {
        let mut image = GrayImage::new(20, 20);
        for y in 5..15 {
            for x in 5..15 {
                image.put_pixel(x, y, Luma([255]));
            }
        }
        let outers = outer_contours_with_children(&image);
        assert!(outers.is_empty());
    }
}
