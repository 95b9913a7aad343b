//! Point, quadrilateral, and resize geometry shared by every pipeline stage.

use nalgebra::Point2;

use crate::CoreError;

/// A single point in image-pixel (or normalized) coordinates.
pub type Point2D = Point2<f64>;

/// Four corners of a quadrilateral in the canonical order: top-left,
/// top-right, bottom-left, bottom-right.
///
/// Coordinates are in source-image pixel space. See [`NormalizedQuadrilateral`]
/// for the `[0, 1]`-normalized variant used across the FFI boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrilateral {
    pub tl: Point2D,
    pub tr: Point2D,
    pub bl: Point2D,
    pub br: Point2D,
}

impl Quadrilateral {
    /// Build a quadrilateral from four corners already in canonical order,
    /// validating the invariants from the data model.
    pub fn new(tl: Point2D, tr: Point2D, bl: Point2D, br: Point2D) -> Result<Self, CoreError> {
        let quad = Self { tl, tr, bl, br };
        quad.validate()?;
        Ok(quad)
    }

    /// The full-image rectangle, used as the detector's last-resort fallback.
    pub fn full_image(width: f64, height: f64) -> Self {
        Self {
            tl: Point2D::new(0.0, 0.0),
            tr: Point2D::new(width, 0.0),
            bl: Point2D::new(0.0, height),
            br: Point2D::new(width, height),
        }
    }

    /// The four corners as an array in canonical order.
    pub fn corners(&self) -> [Point2D; 4] {
        [self.tl, self.tr, self.bl, self.br]
    }

    /// Shoelace area of the quadrilateral, treating `[tl, tr, br, bl]` as a
    /// simple polygon walked in order.
    pub fn area(&self) -> f64 {
        polygon_area(&[self.tl, self.tr, self.br, self.bl])
    }

    /// Check the ordering invariants from the data model (§3): distinct
    /// corners, monotonic edges, and positive area.
    pub fn validate(&self) -> Result<(), CoreError> {
        let pts = [self.tl, self.tr, self.bl, self.br];
        for i in 0..4 {
            for j in (i + 1)..4 {
                if pts[i] == pts[j] {
                    return Err(CoreError::DegenerateQuadrilateral {
                        reason: "corners must be distinct",
                    });
                }
            }
        }
        if self.tl.x > self.tr.x
            || self.tl.y > self.bl.y
            || self.bl.x > self.br.x
            || self.tr.y > self.br.y
        {
            return Err(CoreError::DegenerateQuadrilateral {
                reason: "corners violate TL/TR/BL/BR ordering",
            });
        }
        if self.area() <= 0.0 {
            return Err(CoreError::DegenerateQuadrilateral {
                reason: "quadrilateral has non-positive area",
            });
        }
        Ok(())
    }

    /// Map pixel coordinates to `[0, 1]` fractions of `(width, height)`.
    pub fn normalize(&self, width: f64, height: f64) -> NormalizedQuadrilateral {
        let to_unit = |p: Point2D| Point2D::new(p.x / width, p.y / height);
        NormalizedQuadrilateral {
            tl: to_unit(self.tl),
            tr: to_unit(self.tr),
            bl: to_unit(self.bl),
            br: to_unit(self.br),
        }
    }
}

/// The same four corners as [`Quadrilateral`], each coordinate a fraction
/// of source width/height. This is the format crossing the FFI boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedQuadrilateral {
    pub tl: Point2D,
    pub tr: Point2D,
    pub bl: Point2D,
    pub br: Point2D,
}

impl NormalizedQuadrilateral {
    /// The unit square, used when the detector has nothing to report.
    pub const UNIT_SQUARE: Self = Self {
        tl: Point2D::new(0.0, 0.0),
        tr: Point2D::new(1.0, 0.0),
        bl: Point2D::new(0.0, 1.0),
        br: Point2D::new(1.0, 1.0),
    };

    /// Scale back up to pixel coordinates for a `width x height` image.
    pub fn to_pixels(&self, width: f64, height: f64) -> Quadrilateral {
        let to_px = |p: Point2D| Point2D::new(p.x * width, p.y * height);
        Quadrilateral {
            tl: to_px(self.tl),
            tr: to_px(self.tr),
            bl: to_px(self.bl),
            br: to_px(self.br),
        }
    }

    /// True if every coordinate lies in `[0, 1]`.
    pub fn is_in_unit_square(&self) -> bool {
        [self.tl, self.tr, self.bl, self.br]
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y))
    }
}

fn polygon_area(pts: &[Point2D; 4]) -> f64 {
    let mut area = 0.0;
    for i in 0..4 {
        let j = (i + 1) % 4;
        area += pts[i].x * pts[j].y - pts[j].x * pts[i].y;
    }
    (area / 2.0).abs()
}

/// Sort four arbitrary corners of a convex quadrilateral into the canonical
/// top-left / top-right / bottom-left / bottom-right order (§4.5).
///
/// Sorting by ascending `x + y` separates the top-left (smallest sum) from
/// the bottom-right (largest sum); sorting the remaining middle pair by
/// ascending `y - x` separates top-right from bottom-left. The result is
/// invariant to the input permutation.
pub fn order_corners(points: [Point2D; 4]) -> [Point2D; 4] {
    let mut by_sum = points;
    by_sum.sort_by(|a, b| (a.x + a.y).partial_cmp(&(b.x + b.y)).unwrap());

    let tl = by_sum[0];
    let br = by_sum[3];
    let mut middle = [by_sum[1], by_sum[2]];
    middle.sort_by(|a, b| (a.y - a.x).partial_cmp(&(b.y - b.x)).unwrap());
    let tr = middle[0];
    let bl = middle[1];

    [tl, tr, bl, br]
}

/// Build a canonically-ordered [`Quadrilateral`] from four arbitrary corners.
pub fn canonical_quadrilateral(points: [Point2D; 4]) -> Result<Quadrilateral, CoreError> {
    let [tl, tr, bl, br] = order_corners(points);
    Quadrilateral::new(tl, tr, bl, br)
}

/// Interpolation kind chosen by [`resize_dims`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    /// Used when upscaling: preserves straight edges without introducing
    /// block artifacts.
    Linear,
    /// Used when downscaling: averages source pixels, avoiding moire/aliasing.
    Area,
}

/// Compute the aspect-preserving destination size so that the shorter side
/// equals `target_min_side`, and the interpolation kind to use (§4.6).
pub fn resize_dims(src_w: u32, src_h: u32, target_min_side: u32) -> (u32, u32, Interpolation) {
    let short_side = src_w.min(src_h).max(1);
    let scale = target_min_side as f64 / short_side as f64;
    let dst_w = ((src_w as f64) * scale).round().max(1.0) as u32;
    let dst_h = ((src_h as f64) * scale).round().max(1.0) as u32;
    let interpolation = if short_side < target_min_side {
        Interpolation::Linear
    } else {
        Interpolation::Area
    };
    (dst_w, dst_h, interpolation)
}
