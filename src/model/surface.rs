//! Tractrix magnetopause surfaces.
//!
//! A surface is `n` points in GSE X and Y tracing the modeled magnetopause in 2D, from the
//! subsolar point (`y = 0`, `x = s`) out towards the asymptotic tail half-width `w`.
use crate::error::TractrixError;
use crate::model::params::TractrixParams;
use ndarray::{s, Array1, Array2, ArrayView1};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

type Result<T> = std::result::Result<T, TractrixError>;

/// A single surface, `x` and `y` in Earth radii.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

/// One surface per row of solar wind conditions, each array shaped `[rows, n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceBatch {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl SurfaceBatch {
    pub fn num_surfaces(&self) -> usize {
        self.x.nrows()
    }

    /// Copies out the surface for one set of solar wind conditions.
    pub fn surface(&self, row: usize) -> Option<Surface> {
        if row >= self.num_surfaces() {
            return None;
        }
        Some(Surface {
            x: self.x.row(row).to_owned(),
            y: self.y.row(row).to_owned(),
        })
    }
}

/// Standoff distance `s` and asymptotic half-width `w` for one set of conditions.
/// A negative `w` is not physical and comes back as NaN.
pub fn standoff_and_width(sin_rec: f64, p_dyn: f64, params: &TractrixParams) -> (f64, f64) {
    let standoff = params.standoff.evaluate(sin_rec, p_dyn);
    let width = params.width.evaluate(sin_rec, p_dyn);
    if width < 0.0 {
        (standoff, f64::NAN)
    } else {
        (standoff, width)
    }
}

/// Calculates the surface for a single standoff distance and half-width.
fn surface_points(standoff: f64, width: f64, n: usize) -> Surface {
    // The grid includes w, but the last point is dropped so |w - y| never vanishes
    let y_full = Array1::linspace(0.0, width, n + 1);
    let y = y_full.slice(s![..n]).to_owned();

    let x = y.mapv(|y| {
        let distance = width - y;
        let root = (width * width - distance * distance).abs().sqrt();
        standoff - width * ((width + root) / distance.abs()).ln() + root
    });
    Surface { x, y }
}

/// Resolves how many rows two inputs describe, allowing either one to hold a single value
/// that applies to every row.
fn batch_rows(sin_rec: &ArrayView1<f64>, p_dyn: &ArrayView1<f64>) -> Result<usize> {
    match (sin_rec.len(), p_dyn.len()) {
        (0, _) | (_, 0) => Err(TractrixError::EmptyBatch),
        (a, b) if a == b => Ok(a),
        (1, b) => Ok(b),
        (a, 1) => Ok(a),
        (a, b) => Err(TractrixError::LengthMismatch {
            expected: a,
            found: b,
        }),
    }
}

fn broadcast_value(values: &ArrayView1<f64>, row: usize) -> f64 {
    if values.len() == 1 {
        values[0]
    } else {
        values[row]
    }
}

fn check_inputs(sin_rec: &ArrayView1<f64>, p_dyn: &ArrayView1<f64>, n: usize) -> Result<usize> {
    if n == 0 {
        Err(TractrixError::InvalidPointCount)?
    }
    batch_rows(sin_rec, p_dyn)
}

fn assemble(surfaces: Vec<Surface>, n: usize) -> Result<SurfaceBatch> {
    let rows = surfaces.len();
    let mut x = Vec::with_capacity(rows * n);
    let mut y = Vec::with_capacity(rows * n);
    let mut masked = 0;
    for surface in surfaces {
        if surface.x.iter().all(|v| v.is_nan()) {
            masked += 1;
        }
        x.extend(surface.x.iter().copied());
        y.extend(surface.y.iter().copied());
    }
    debug!(rows, n, masked, "assembled tractrix surfaces");
    Ok(SurfaceBatch {
        x: Array2::from_shape_vec((rows, n), x)?,
        y: Array2::from_shape_vec((rows, n), y)?,
    })
}

/// Calculates `n` points on the tractrix surface for each row of solar wind conditions.
///
/// `sin_rec` is the IMF sine rectifier in nT and `p_dyn` the solar wind dynamic pressure in nPa.
/// Either may hold a single value that applies to every row. Rows where the half-width comes
/// out negative are all NaN.
///
/// # Errors
/// Will return `Err` if `n` is zero, either input is empty, or the inputs have different
/// lengths that cannot be broadcast.
pub fn tractrix_batch(
    sin_rec: ArrayView1<f64>,
    p_dyn: ArrayView1<f64>,
    n: usize,
    params: &TractrixParams,
) -> Result<SurfaceBatch> {
    let rows = check_inputs(&sin_rec, &p_dyn, n)?;

    let mut surfaces = vec![];
    for row in 0..rows {
        let (standoff, width) = standoff_and_width(
            broadcast_value(&sin_rec, row),
            broadcast_value(&p_dyn, row),
            params,
        );
        surfaces.push(surface_points(standoff, width, n));
    }
    assemble(surfaces, n)
}

/// Calculates `n` points on the tractrix surface for each row of solar wind conditions in
/// parallel. Gives the same result as [`tractrix_batch`].
///
/// # Errors
/// Will return `Err` if `n` is zero, either input is empty, or the inputs have different
/// lengths that cannot be broadcast.
pub fn par_tractrix_batch(
    sin_rec: ArrayView1<f64>,
    p_dyn: ArrayView1<f64>,
    n: usize,
    params: &TractrixParams,
) -> Result<SurfaceBatch> {
    let rows = check_inputs(&sin_rec, &p_dyn, n)?;

    let surfaces: Vec<Surface> = (0..rows)
        .into_par_iter()
        .map(|row| {
            let (standoff, width) = standoff_and_width(
                broadcast_value(&sin_rec, row),
                broadcast_value(&p_dyn, row),
                params,
            );
            surface_points(standoff, width, n)
        })
        .collect();
    assemble(surfaces, n)
}

/// Calculates `n` points on the tractrix surface for one set of solar wind conditions.
///
/// # Errors
/// Will return `Err` if `n` is zero.
pub fn tractrix(sin_rec: f64, p_dyn: f64, n: usize, params: &TractrixParams) -> Result<Surface> {
    let sin_rec = [sin_rec];
    let p_dyn = [p_dyn];
    let batch = tractrix_batch(
        ArrayView1::from(&sin_rec),
        ArrayView1::from(&p_dyn),
        n,
        params,
    )?;
    let mut rows = batch.x.outer_iter().zip(batch.y.outer_iter());
    let (x, y) = rows.next().ok_or(TractrixError::EmptyBatch)?;
    Ok(Surface {
        x: x.to_owned(),
        y: y.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn four_point_surface() {
        let surface =
            tractrix(0.0, 1.0, 4, &TractrixParams::default()).expect("Could not compute surface");
        assert_eq!(surface.x.len(), 4);
        assert_eq!(surface.y.len(), 4);
        assert_eq!(surface.x[0], 14.56);
        assert_relative_eq!(
            surface.y,
            array![0.0, 8.0775, 16.155, 24.2325],
            epsilon = 1e-12
        );
    }

    #[test]
    fn standoff_and_width_at_unit_pressure() {
        let (s, w) = standoff_and_width(0.0, 1.0, &TractrixParams::default());
        assert_eq!(s, 14.56);
        assert_eq!(w, 32.31);
    }

    #[test]
    fn negative_width_is_masked() {
        let (s, w) = standoff_and_width(200.0, 1.0, &TractrixParams::default());
        assert!(s.is_finite());
        assert!(w.is_nan());

        let surface = surface_points(s, w, 10);
        assert!(surface.x.iter().all(|v| v.is_nan()));
        assert!(surface.y.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn single_point_surface_is_subsolar() {
        let surface = surface_points(10.0, 20.0, 1);
        assert_eq!(surface.y, array![0.0]);
        assert_eq!(surface.x, array![10.0]);
    }

    #[test]
    fn batch_rows_broadcasting() {
        let one = array![1.0];
        let three = array![1.0, 2.0, 3.0];
        let two = array![1.0, 2.0];
        let empty: Array1<f64> = array![];
        assert_eq!(batch_rows(&one.view(), &three.view()).ok(), Some(3));
        assert_eq!(batch_rows(&three.view(), &one.view()).ok(), Some(3));
        assert_eq!(batch_rows(&three.view(), &three.view()).ok(), Some(3));
        assert!(matches!(
            batch_rows(&three.view(), &two.view()),
            Err(TractrixError::LengthMismatch {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            batch_rows(&empty.view(), &one.view()),
            Err(TractrixError::EmptyBatch)
        ));
    }

    #[test]
    fn zero_points_rejected() {
        let res = tractrix(0.0, 1.0, 0, &TractrixParams::default());
        assert!(matches!(res, Err(TractrixError::InvalidPointCount)));
    }

    #[test]
    fn batch_accessor() {
        let sin_rec = array![0.0, 1.0];
        let p_dyn = array![1.0];
        let batch = tractrix_batch(sin_rec.view(), p_dyn.view(), 5, &TractrixParams::default())
            .expect("Could not compute surfaces");
        assert_eq!(batch.num_surfaces(), 2);
        assert!(batch.surface(1).is_some());
        assert!(batch.surface(2).is_none());
    }
}
