use crate::error::TractrixError;
use ndarray::{Array1, ArrayView1, Zip};

type Result<T> = std::result::Result<T, TractrixError>;

/// Sine rectifier of the IMF in nT, `|B| * sin^2(clock angle / 2)`, from its GSE components in nT.
pub fn sine_rectifier(bx: f64, by: f64, bz: f64) -> f64 {
    let magnitude = (bx * bx + by * by + bz * bz).sqrt();
    let clock_angle = by.atan2(bz);
    magnitude * (clock_angle / 2.0).sin().powi(2)
}

/// Sine rectifier for each row of IMF components.
///
/// # Errors
/// Will return `Err` if the three component arrays are not all the same length.
pub fn sine_rectifier_batch(
    bx: ArrayView1<f64>,
    by: ArrayView1<f64>,
    bz: ArrayView1<f64>,
) -> Result<Array1<f64>> {
    for found in [by.len(), bz.len()] {
        if found != bx.len() {
            Err(TractrixError::LengthMismatch {
                expected: bx.len(),
                found,
            })?
        }
    }
    Ok(Zip::from(&bx)
        .and(&by)
        .and(&bz)
        .map_collect(|&x, &y, &z| sine_rectifier(x, y, z)))
}
