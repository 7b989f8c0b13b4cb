//! The tractrix magnetopause model of O'Brien et al. (2021).
//!
//! Predicts the 2D magnetopause surface in GSE X and Y from the IMF sine rectifier and the solar
//! wind dynamic pressure.
pub mod cli;
pub mod error;
pub mod inputs;
pub mod model;

pub use crate::error::TractrixError;
pub use crate::inputs::{Input, RectifierOutput, SurfaceOutput};
pub use crate::model::params::{PowerLaw, TractrixParams};
pub use crate::model::rectifier::{sine_rectifier, sine_rectifier_batch};
pub use crate::model::surface::{
    par_tractrix_batch, standoff_and_width, tractrix, tractrix_batch, Surface, SurfaceBatch,
};

#[cfg(feature = "python")]
mod bindings {
    use crate::cli::{self, Cli};
    use crate::inputs::{
        rectifier_from_inputs, surfaces_from_inputs, Input, RectifierOutput, SurfaceOutput,
    };
    use crate::model::constants::DEFAULT_NUM_POINTS;
    use crate::model::params::TractrixParams;
    use clap::Parser;
    use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
    use pyo3::prelude::*;
    use pyo3::types::PyFloat;

    /// A numpy array, a list of floats, or a float.
    ///
    /// Arrays are tried first since a one-element ndarray also converts to a float.
    #[derive(FromPyObject)]
    enum Values<'py> {
        Array(PyReadonlyArray1<'py, f64>),
        List(Vec<f64>),
        Scalar(f64),
    }

    impl From<Values<'_>> for Input {
        fn from(values: Values<'_>) -> Self {
            match values {
                Values::Array(arr) => Input::Values(arr.as_array().to_owned()),
                Values::List(v) => Input::from(v),
                Values::Scalar(v) => Input::Scalar(v),
            }
        }
    }

    /// Calculates n points in GSE X and Y on the magnetopause for each set of solar wind
    /// conditions. Surfaces where the tail width comes out negative are all NaN.
    #[pyfunction]
    #[pyo3(name = "tractrix")]
    #[pyo3(signature = (sin_rec, p_dyn, n = DEFAULT_NUM_POINTS, s_param = None, w_param = None))]
    fn tractrix_py<'py>(
        py: Python<'py>,
        sin_rec: Values<'py>,
        p_dyn: Values<'py>,
        n: usize,
        s_param: Option<Vec<f64>>,
        w_param: Option<Vec<f64>>,
    ) -> PyResult<(Bound<'py, PyAny>, Bound<'py, PyAny>)> {
        let params = TractrixParams::with_overrides(s_param.as_deref(), w_param.as_deref())?;
        let sin_rec = Input::from(sin_rec);
        let p_dyn = Input::from(p_dyn);

        let surfaces = py.allow_threads(|| surfaces_from_inputs(&sin_rec, &p_dyn, n, &params))?;

        match surfaces {
            SurfaceOutput::Single(surface) => Ok((
                PyArray1::from_owned_array_bound(py, surface.x).into_any(),
                PyArray1::from_owned_array_bound(py, surface.y).into_any(),
            )),
            SurfaceOutput::Batch(batch) => Ok((
                PyArray2::from_owned_array_bound(py, batch.x).into_any(),
                PyArray2::from_owned_array_bound(py, batch.y).into_any(),
            )),
        }
    }

    /// Calculates the sine rectifier of the IMF in nT from its GSE components in nT.
    #[pyfunction]
    #[pyo3(name = "sine_rectifier")]
    #[pyo3(text_signature = "(bx, by, bz, /)")]
    fn sine_rectifier_py<'py>(
        py: Python<'py>,
        bx: Values<'py>,
        by: Values<'py>,
        bz: Values<'py>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let rec = rectifier_from_inputs(&bx.into(), &by.into(), &bz.into())?;
        match rec {
            RectifierOutput::Scalar(v) => Ok(PyFloat::new_bound(py, v).into_any()),
            RectifierOutput::Values(rec) => {
                Ok(PyArray1::from_owned_array_bound(py, rec).into_any())
            }
        }
    }

    /// Writes tractrix surfaces or sine rectifiers from the command line.
    #[pyfunction]
    #[pyo3(name = "tractrix_cli")]
    fn tractrix_cli(py: Python) -> PyResult<()> {
        let argv = py
            .import_bound("sys")?
            .getattr("argv")?
            .extract::<Vec<String>>()?;
        let args = Cli::parse_from(argv);
        cli::init_logging(args.verbose);
        cli::run(args)?;
        Ok(())
    }

    /// Tractrix magnetopause model.
    #[pymodule]
    fn tractrix(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(tractrix_py, m)?)?;
        m.add_function(wrap_pyfunction!(sine_rectifier_py, m)?)?;
        m.add_function(wrap_pyfunction!(tractrix_cli, m)?)?;

        Ok(())
    }
}
