//! Tunable constants for the detector pipeline (§4.1, §9A).

/// One (block_size, C) setting tried during the threshold sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdSetting {
    pub block_size: u32,
    pub c: i32,
}

/// Detector tuning parameters, constructible independently of any global
/// state for testing.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorParams {
    /// Working resolution: the shorter side is normalized to this many
    /// pixels before detection runs (§4.1 step 1).
    pub working_resolution: u32,
    /// Threshold settings tried in order, biased toward large blocks first.
    pub threshold_sweep: Vec<ThresholdSetting>,
    /// Douglas-Peucker tolerance as a fraction of contour perimeter.
    pub polygon_epsilon_fraction: f64,
    /// Minimum candidate area as a fraction of `working_resolution^2`.
    pub min_area_fraction: f64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            working_resolution: 480,
            threshold_sweep: vec![
                ThresholdSetting { block_size: 69, c: 20 },
                ThresholdSetting { block_size: 45, c: 15 },
                ThresholdSetting { block_size: 23, c: 10 },
                ThresholdSetting { block_size: 13, c: 10 },
                ThresholdSetting { block_size: 9, c: 5 },
            ],
            polygon_epsilon_fraction: 0.02,
            min_area_fraction: 1.0 / 10.0,
        }
    }
}
