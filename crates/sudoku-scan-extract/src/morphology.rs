//! Grid-line removal via asymmetric morphological opening (§4.2 step 3).
//!
//! `imageproc::morphology` only exposes symmetric, `Norm`-based structuring
//! elements, not the 1xN / Nx1 rectangles this step needs, so opening along
//! each axis is implemented directly as a run-length pass.

use image::{GrayImage, Luma};

fn invert(image: &GrayImage) -> GrayImage {
    let mut out = image.clone();
    for p in out.pixels_mut() {
        p.0[0] = 255 - p.0[0];
    }
    out
}

/// Binary morphological opening with a `1 x width` horizontal structuring
/// element: a foreground pixel survives only if it belongs to a run of at
/// least `width` consecutive foreground pixels in its row.
fn open_horizontal(image: &GrayImage, width: u32) -> GrayImage {
    let (w, h) = image.dimensions();
    let width = width.max(1) as usize;
    let mut out = GrayImage::new(w, h);

    for y in 0..h {
        let mut x = 0usize;
        let row_len = w as usize;
        while x < row_len {
            if image.get_pixel(x as u32, y).0[0] == 255 {
                let start = x;
                while x < row_len && image.get_pixel(x as u32, y).0[0] == 255 {
                    x += 1;
                }
                if x - start >= width {
                    for xi in start..x {
                        out.put_pixel(xi as u32, y, Luma([255]));
                    }
                }
            } else {
                x += 1;
            }
        }
    }
    out
}

/// Binary morphological opening with a `height x 1` vertical structuring
/// element: a foreground pixel survives only if it belongs to a run of at
/// least `height` consecutive foreground pixels in its column.
fn open_vertical(image: &GrayImage, height: u32) -> GrayImage {
    let (w, h) = image.dimensions();
    let height = height.max(1) as usize;
    let mut out = GrayImage::new(w, h);

    for x in 0..w {
        let mut y = 0usize;
        let col_len = h as usize;
        while y < col_len {
            if image.get_pixel(x, y as u32).0[0] == 255 {
                let start = y;
                while y < col_len && image.get_pixel(x, y as u32).0[0] == 255 {
                    y += 1;
                }
                if y - start >= height {
                    for yi in start..y {
                        out.put_pixel(x, yi as u32, Luma([255]));
                    }
                }
            } else {
                y += 1;
            }
        }
    }
    out
}

fn union(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let mut out = a.clone();
    for (p, q) in out.pixels_mut().zip(b.pixels()) {
        p.0[0] = p.0[0].max(q.0[0]);
    }
    out
}

/// Dilate a binary image with a 5x5 cross structuring element: a pixel
/// becomes foreground if any pixel within `+/-2` along its row or column is
/// foreground in the source.
fn dilate_cross5(image: &GrayImage) -> GrayImage {
    let (w, h) = image.dimensions();
    let mut out = GrayImage::new(w, h);
    let get = |x: i64, y: i64| -> u8 {
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            0
        } else {
            image.get_pixel(x as u32, y as u32).0[0]
        }
    };

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let mut hit = get(x, y) == 255;
            for d in 1..=2i64 {
                hit = hit || get(x - d, y) == 255 || get(x + d, y) == 255;
                hit = hit || get(x, y - d) == 255 || get(x, y + d) == 255;
            }
            out.put_pixel(x as u32, y as u32, Luma([if hit { 255 } else { 0 }]));
        }
    }
    out
}

/// Erase grid-line pixels from a binarized image (digits dark=0,
/// background white=255), leaving only digit glyphs as dark regions.
pub fn remove_grid_lines(binary: &GrayImage, cell_size: f64, horizontal_fraction: f64, vertical_fraction: f64) -> GrayImage {
    let inverted = invert(binary);
    let horiz_width = (horizontal_fraction * cell_size).round().max(1.0) as u32;
    let vert_height = (vertical_fraction * cell_size).round().max(1.0) as u32;

    let horiz_mask = open_horizontal(&inverted, horiz_width);
    let vert_mask = open_vertical(&inverted, vert_height);
    let lines = union(&horiz_mask, &vert_mask);
    let dilated = dilate_cross5(&lines);

    union(binary, &dilated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_horizontal_line_survives_opening_short_blob_does_not() {
        let mut binary = GrayImage::from_pixel(100, 100, Luma([255]));
        for x in 0..100 {
            binary.put_pixel(x, 50, Luma([0])); // horizontal grid line, dark
        }
        for y in 20..24 {
            for x in 20..24 {
                binary.put_pixel(x, y, Luma([0])); // small digit blob
            }
        }
        let cleaned = remove_grid_lines(&binary, 50.0, 0.8, 0.9);
        // The long line is erased (becomes background/white).
        assert_eq!(cleaned.get_pixel(50, 50).0[0], 255);
        // The small blob survives as foreground (still dark).
        assert_eq!(cleaned.get_pixel(22, 22).0[0], 0);
    }
}
