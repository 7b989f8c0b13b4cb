//! Published tuning parameters of the tractrix model, O'Brien et al. (2021).

/// Subsolar standoff function, (offset, slope, exponent).
pub const STANDOFF_PARAMS: [f64; 3] = [14.56, -0.0354, 5.697];

/// Asymptotic tail half-width function, (offset, slope, exponent).
pub const WIDTH_PARAMS: [f64; 3] = [32.31, -0.265, 11.80];

/// Number of points generated in each surface when the caller does not say.
pub const DEFAULT_NUM_POINTS: usize = 1000;
