//! Solar wind inputs that may be a single value or one value per row.
//!
//! Two scalars give a single surface (or a single rectifier value). Any array, even one of
//! length 1, gives a batch.
use crate::error::TractrixError;
use crate::model::params::TractrixParams;
use crate::model::rectifier::{sine_rectifier, sine_rectifier_batch};
use crate::model::surface::{par_tractrix_batch, Surface, SurfaceBatch};
use ndarray::Array1;

type Result<T> = std::result::Result<T, TractrixError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Scalar(f64),
    Values(Array1<f64>),
}

impl Input {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Input::Scalar(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Input::Scalar(_) => 1,
            Input::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The values as an array, a scalar becoming a single element.
    pub fn to_array(&self) -> Array1<f64> {
        match self {
            Input::Scalar(v) => Array1::from_elem(1, *v),
            Input::Values(values) => values.clone(),
        }
    }

    /// The values as an array of `len` elements, repeating a scalar. Arrays are returned as
    /// they are, so a length mismatch is left for the caller to report.
    pub fn broadcast(&self, len: usize) -> Array1<f64> {
        match self {
            Input::Scalar(v) => Array1::from_elem(len, *v),
            Input::Values(values) => values.clone(),
        }
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Scalar(value)
    }
}

impl From<Array1<f64>> for Input {
    fn from(values: Array1<f64>) -> Self {
        Input::Values(values)
    }
}

impl From<Vec<f64>> for Input {
    fn from(values: Vec<f64>) -> Self {
        Input::Values(Array1::from_vec(values))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOutput {
    Single(Surface),
    Batch(SurfaceBatch),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RectifierOutput {
    Scalar(f64),
    Values(Array1<f64>),
}

/// Calculates tractrix surfaces, one per row when either input is an array.
///
/// # Errors
/// Will return `Err` if `n` is zero, an input is empty, or the inputs cannot be broadcast.
pub fn surfaces_from_inputs(
    sin_rec: &Input,
    p_dyn: &Input,
    n: usize,
    params: &TractrixParams,
) -> Result<SurfaceOutput> {
    let sin_rec_values = sin_rec.to_array();
    let p_dyn_values = p_dyn.to_array();
    let batch = par_tractrix_batch(sin_rec_values.view(), p_dyn_values.view(), n, params)?;
    if sin_rec.is_scalar() && p_dyn.is_scalar() {
        let surface = batch.surface(0).ok_or(TractrixError::EmptyBatch)?;
        Ok(SurfaceOutput::Single(surface))
    } else {
        Ok(SurfaceOutput::Batch(batch))
    }
}

/// Calculates the sine rectifier, elementwise when any component is an array.
///
/// # Errors
/// Will return `Err` if the array components have different lengths.
pub fn rectifier_from_inputs(bx: &Input, by: &Input, bz: &Input) -> Result<RectifierOutput> {
    if let (Input::Scalar(x), Input::Scalar(y), Input::Scalar(z)) = (bx, by, bz) {
        return Ok(RectifierOutput::Scalar(sine_rectifier(*x, *y, *z)));
    }
    let len = [bx, by, bz]
        .iter()
        .filter(|v| !v.is_scalar())
        .map(|v| v.len())
        .max()
        .unwrap_or(1);
    let rec = sine_rectifier_batch(
        bx.broadcast(len).view(),
        by.broadcast(len).view(),
        bz.broadcast(len).view(),
    )?;
    Ok(RectifierOutput::Values(rec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn two_scalars_give_one_surface() {
        let out = surfaces_from_inputs(
            &Input::Scalar(1.0),
            &Input::Scalar(2.0),
            7,
            &TractrixParams::default(),
        )
        .expect("Could not compute surface");
        match out {
            SurfaceOutput::Single(surface) => {
                assert_eq!(surface.x.len(), 7);
                assert_eq!(surface.y.len(), 7);
            }
            SurfaceOutput::Batch(_) => panic!("Expected a single surface"),
        }
    }

    #[test]
    fn one_element_array_gives_a_batch() {
        let sin_rec = Input::from(array![1.0]);
        let out = surfaces_from_inputs(
            &sin_rec,
            &Input::Scalar(2.0),
            7,
            &TractrixParams::default(),
        )
        .expect("Could not compute surfaces");
        match out {
            SurfaceOutput::Batch(batch) => {
                assert_eq!(batch.x.dim(), (1, 7));
                assert_eq!(batch.y.dim(), (1, 7));
            }
            SurfaceOutput::Single(_) => panic!("Expected a batch of surfaces"),
        }
    }

    #[test]
    fn scalar_pressure_spans_rectifier_rows() {
        let sin_rec = Input::from(vec![0.0, 3.0, 200.0]);
        let out = surfaces_from_inputs(
            &sin_rec,
            &Input::Scalar(1.5),
            12,
            &TractrixParams::default(),
        )
        .expect("Could not compute surfaces");
        match out {
            SurfaceOutput::Batch(batch) => {
                assert_eq!(batch.x.dim(), (3, 12));
                assert!(batch.x.row(2).iter().all(|x| x.is_nan()));
            }
            SurfaceOutput::Single(_) => panic!("Expected a batch of surfaces"),
        }
    }

    #[test]
    fn mismatched_inputs_rejected() {
        let res = surfaces_from_inputs(
            &Input::from(vec![0.0, 1.0]),
            &Input::from(vec![1.0, 2.0, 3.0]),
            5,
            &TractrixParams::default(),
        );
        assert!(matches!(res, Err(TractrixError::LengthMismatch { .. })));
    }

    #[test]
    fn scalar_components_give_scalar_rectifier() {
        let out = rectifier_from_inputs(
            &Input::Scalar(0.0),
            &Input::Scalar(0.0),
            &Input::Scalar(-4.0),
        )
        .expect("Could not compute sine rectifier");
        assert_eq!(out, RectifierOutput::Scalar(4.0));
    }

    #[test]
    fn one_element_components_give_array_rectifier() {
        let out = rectifier_from_inputs(
            &Input::from(array![1.0]),
            &Input::from(array![0.0]),
            &Input::from(array![1.0]),
        )
        .expect("Could not compute sine rectifier");
        assert_eq!(out, RectifierOutput::Values(array![0.0]));
    }

    #[test]
    fn scalar_components_broadcast_against_arrays() {
        let out = rectifier_from_inputs(
            &Input::Scalar(0.0),
            &Input::from(vec![0.0, 0.0, 0.0]),
            &Input::Scalar(-2.0),
        )
        .expect("Could not compute sine rectifier");
        match out {
            RectifierOutput::Values(rec) => {
                assert_eq!(rec.len(), 3);
                assert!(rec.iter().all(|&r| (r - 2.0).abs() < 1e-12));
            }
            RectifierOutput::Scalar(_) => panic!("Expected an array"),
        }
    }

    #[test]
    fn broadcast_and_to_array() {
        assert_eq!(Input::Scalar(2.0).broadcast(3), array![2.0, 2.0, 2.0]);
        assert_eq!(Input::Scalar(2.0).to_array(), array![2.0]);
        assert_eq!(Input::from(vec![1.0, 2.0]).broadcast(5), array![1.0, 2.0]);
        assert_eq!(Input::from(vec![1.0, 2.0]).len(), 2);
    }
}
