//! Stable `extern "C"` surface over the Sudoku grid scanning pipeline (§6).
//!
//! Every fallible internal operation is resolved here into one of the §7
//! wire-level policies: a well-formed default result, or process
//! termination on a fatal precondition violation. Internally the façade
//! still returns `Result` (§7A); this crate is the only place that policy
//! is enforced.

use std::ffi::{c_char, CStr};
use std::os::raw::c_void;
use std::sync::OnceLock;

use sudoku_scan::{NormalizedQuadrilateral, Scanner};

/// A single 2-D point, wire-compatible with a C `struct Offset`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Four normalized corners, wire-compatible with a C `struct BoundingBox`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    pub top_left: Offset,
    pub top_right: Offset,
    pub bottom_left: Offset,
    pub bottom_right: Offset,
}

impl From<NormalizedQuadrilateral> for BoundingBox {
    fn from(quad: NormalizedQuadrilateral) -> Self {
        Self {
            top_left: Offset { x: quad.tl.x, y: quad.tl.y },
            top_right: Offset { x: quad.tr.x, y: quad.tr.y },
            bottom_left: Offset { x: quad.bl.x, y: quad.bl.y },
            bottom_right: Offset { x: quad.br.x, y: quad.br.y },
        }
    }
}

impl From<BoundingBox> for NormalizedQuadrilateral {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            tl: sudoku_scan::Point2D::new(bbox.top_left.x, bbox.top_left.y),
            tr: sudoku_scan::Point2D::new(bbox.top_right.x, bbox.top_right.y),
            bl: sudoku_scan::Point2D::new(bbox.bottom_left.x, bbox.bottom_left.y),
            br: sudoku_scan::Point2D::new(bbox.bottom_right.x, bbox.bottom_right.y),
        }
    }
}

static SCANNER: OnceLock<Scanner> = OnceLock::new();

fn scanner() -> &'static Scanner {
    SCANNER.get_or_init(Scanner::with_defaults)
}

/// Allocate `size` bytes with the C allocator. `free_pointer` mirrors this
/// with `libc::free`, so every pointer this library hands out (whichever
/// operation produced it) is released the same, size-agnostic way.
unsafe fn c_alloc(size: usize) -> *mut u8 {
    libc::malloc(size) as *mut u8
}

unsafe fn path_from_c_str(path: *const c_char) -> Option<String> {
    if path.is_null() {
        return None;
    }
    CStr::from_ptr(path).to_str().ok().map(str::to_owned)
}

/// Set the path to the classifier model. Must be called before the first
/// `extract_grid`/`extract_grid_from_roi` call.
#[no_mangle]
pub unsafe extern "C" fn set_model(path: *const c_char) {
    let Some(path) = path_from_c_str(path) else {
        log::error!("set_model: path argument was null or not valid UTF-8");
        return;
    };
    sudoku_scan::set_model(path);
}

/// Detect the grid in the image at `path`, returning a heap-allocated
/// `BoundingBox*` the caller must release via `free_pointer`. An unreadable
/// or empty image yields the unit-square bounding box (§7).
#[no_mangle]
pub unsafe extern "C" fn detect_grid(path: *const c_char) -> *mut BoundingBox {
    let quad = match path_from_c_str(path) {
        Some(path) => match scanner().detect_grid(&path) {
            Ok(quad) => quad,
            Err(err) => {
                log::error!("detect_grid({path}): {err}");
                NormalizedQuadrilateral::UNIT_SQUARE
            }
        },
        None => {
            log::error!("detect_grid: path argument was null or not valid UTF-8");
            NormalizedQuadrilateral::UNIT_SQUARE
        }
    };

    let ptr = c_alloc(std::mem::size_of::<BoundingBox>()) as *mut BoundingBox;
    if !ptr.is_null() {
        ptr.write(quad.into());
    }
    ptr
}

/// Extract the 81-cell digit grid for the normalized bounding box `bbox`
/// within the image at `path`, returning a heap-allocated pointer to 81
/// bytes the caller must release via `free_pointer`.
///
/// A malformed bounding box (fails the §3 ordering invariants) is a fatal
/// precondition violation (§7): this function aborts the process rather
/// than returning.
#[no_mangle]
pub unsafe extern "C" fn extract_grid(path: *const c_char, bbox: *const BoundingBox) -> *mut u8 {
    if bbox.is_null() {
        log::error!("extract_grid: bbox argument was null");
        std::process::abort();
    }
    let normalized: NormalizedQuadrilateral = (*bbox).into();

    let Some(path) = path_from_c_str(path) else {
        log::error!("extract_grid: path argument was null or not valid UTF-8");
        return write_grid(sudoku_scan::Grid::blank());
    };

    match scanner().extract_grid(&path, normalized) {
        Ok(grid) => write_grid(grid),
        Err(err) => {
            // §7: a malformed quadrilateral, or a classifier backend that
            // fails to initialize even on CPU, are both fatal preconditions
            // once the image itself loaded successfully.
            log::error!("extract_grid({path}): {err}, aborting");
            std::process::abort();
        }
    }
}

/// Crop a `roi_side x roi_side` square centered horizontally and offset
/// `roi_offset_y` pixels vertically from the image center, detect the grid
/// within that crop, and extract its digit grid, returning a
/// heap-allocated pointer to 81 bytes the caller must release via
/// `free_pointer`.
#[no_mangle]
pub unsafe extern "C" fn extract_grid_from_roi(
    path: *const c_char,
    roi_side: u32,
    roi_offset_y: i64,
) -> *mut u8 {
    let Some(path) = path_from_c_str(path) else {
        log::error!("extract_grid_from_roi: path argument was null or not valid UTF-8");
        return write_grid(sudoku_scan::Grid::blank());
    };

    match scanner().extract_grid_from_roi(&path, roi_side, roi_offset_y) {
        Ok(grid) => write_grid(grid),
        Err(err) => {
            log::error!("extract_grid_from_roi({path}): {err}, aborting");
            std::process::abort();
        }
    }
}

unsafe fn write_grid(grid: sudoku_scan::Grid) -> *mut u8 {
    let bytes = grid.to_row_major();
    let ptr = c_alloc(bytes.len());
    if !ptr.is_null() {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr, bytes.len());
    }
    ptr
}

/// Release a pointer previously returned by `detect_grid`, `extract_grid`,
/// or `extract_grid_from_roi`.
#[no_mangle]
pub unsafe extern "C" fn free_pointer(ptr: *mut c_void) {
    if !ptr.is_null() {
        libc::free(ptr);
    }
}
