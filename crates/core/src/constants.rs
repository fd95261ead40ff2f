/// Lower bound (inclusive) of the random GDP multiplier.
pub const GDP_MULTIPLIER_MIN: f64 = 1000.0;

/// Upper bound (exclusive) of the random GDP multiplier.
pub const GDP_MULTIPLIER_MAX: f64 = 2000.0;

/// Number of countries listed on the summary image.
pub const SUMMARY_TOP_N: usize = 5;

/// Summary image dimensions in pixels.
pub const SUMMARY_WIDTH: u32 = 800;
pub const SUMMARY_HEIGHT: u32 = 600;

/// File name of the rendered summary inside the cache directory.
pub const SUMMARY_FILE_NAME: &str = "summary.png";
