//! Regenerates the C header for the `sudoku-scan-ffi` ABI. Tooling around
//! the stable ABI, not part of its runtime behavior (§6).

use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&crate_dir).join("include/sudoku_scan.h"));

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create header output directory");
    }

    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .generate()
        .expect("failed to generate FFI header")
        .write_to_file(&out_path);

    println!("wrote {}", out_path.display());
}
