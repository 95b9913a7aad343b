//! Scans a Sudoku grid from an image path given on the command line.

use std::env;
use std::process::ExitCode;

use sudoku_scan::Scanner;

fn main() -> ExitCode {
    sudoku_scan_core::logger::init_with_level(log::LevelFilter::Info).ok();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: scan_path <image-path> [model-path]");
        return ExitCode::FAILURE;
    };
    if let Some(model_path) = args.next() {
        sudoku_scan::set_model(model_path);
    }

    let scanner = Scanner::with_defaults();
    match scanner.detect_grid(&path) {
        Ok(quad) => {
            println!("detected quadrilateral (normalized): {quad:?}");
        }
        Err(err) => {
            eprintln!("detect_grid failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    match scanner.extract_grid(&path, sudoku_scan::NormalizedQuadrilateral::UNIT_SQUARE) {
        Ok(grid) => {
            for row in 0..9 {
                let line: String = (0..9)
                    .map(|col| grid.get(col, row).unwrap().value().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{line}");
            }
        }
        Err(err) => {
            eprintln!("extract_grid failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
