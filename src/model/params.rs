use crate::error::TractrixError;
use crate::model::constants::{STANDOFF_PARAMS, WIDTH_PARAMS};

type Result<T> = std::result::Result<T, TractrixError>;

/// An affine function of the sine rectifier scaled by a power of the dynamic pressure,
/// `(offset + slope * sin_rec) * p_dyn^(-1 / exponent)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub offset: f64,
    pub slope: f64,
    pub exponent: f64,
}

impl PowerLaw {
    pub const fn new(coefficients: [f64; 3]) -> PowerLaw {
        PowerLaw {
            offset: coefficients[0],
            slope: coefficients[1],
            exponent: coefficients[2],
        }
    }

    /// Builds the function from a parameter triple.
    ///
    /// # Errors
    /// Will return `Err` if `coefficients` does not hold exactly three values.
    pub fn from_slice(coefficients: &[f64]) -> Result<PowerLaw> {
        let triple: [f64; 3] = coefficients.try_into().map_err(|_| {
            TractrixError::InvalidParameters(format!(
                "Expected 3 tuning parameters, found {}",
                coefficients.len()
            ))
        })?;
        Ok(PowerLaw::new(triple))
    }

    /// Evaluates the function. Non-positive pressure is not guarded against.
    pub fn evaluate(&self, sin_rec: f64, p_dyn: f64) -> f64 {
        (self.offset + self.slope * sin_rec) * p_dyn.powf(-1.0 / self.exponent)
    }

    pub fn coefficients(&self) -> [f64; 3] {
        [self.offset, self.slope, self.exponent]
    }
}

/// The two functions that shape a tractrix surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TractrixParams {
    /// Subsolar standoff distance `s`
    pub standoff: PowerLaw,
    /// Asymptotic tail half-width `w`
    pub width: PowerLaw,
}

impl TractrixParams {
    pub fn new(standoff: PowerLaw, width: PowerLaw) -> TractrixParams {
        TractrixParams { standoff, width }
    }

    /// Builds parameters from optional overrides, keeping the published values for anything
    /// left out.
    ///
    /// # Errors
    /// Will return `Err` if an override is not a triple.
    pub fn with_overrides(
        standoff: Option<&[f64]>,
        width: Option<&[f64]>,
    ) -> Result<TractrixParams> {
        let defaults = TractrixParams::default();
        Ok(TractrixParams {
            standoff: standoff
                .map(PowerLaw::from_slice)
                .transpose()?
                .unwrap_or(defaults.standoff),
            width: width
                .map(PowerLaw::from_slice)
                .transpose()?
                .unwrap_or(defaults.width),
        })
    }
}

impl Default for TractrixParams {
    fn default() -> Self {
        TractrixParams {
            standoff: PowerLaw::new(STANDOFF_PARAMS),
            width: PowerLaw::new(WIDTH_PARAMS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_published_values() {
        let params = TractrixParams::default();
        assert_eq!(params.standoff.coefficients(), [14.56, -0.0354, 5.697]);
        assert_eq!(params.width.coefficients(), [32.31, -0.265, 11.80]);
    }

    #[test]
    fn unit_pressure_leaves_affine_part() {
        let law = PowerLaw::new([2.0, 0.5, 3.0]);
        assert_eq!(law.evaluate(4.0, 1.0), 4.0);
    }

    #[test]
    fn pressure_scaling() {
        let law = PowerLaw::new([1.0, 0.0, 2.0]);
        assert_relative_eq!(law.evaluate(0.0, 4.0), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn wrong_length_slice() {
        assert!(matches!(
            PowerLaw::from_slice(&[1.0, 2.0]),
            Err(TractrixError::InvalidParameters(_))
        ));
        assert!(PowerLaw::from_slice(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn overrides_replace_only_what_is_given() {
        let params = TractrixParams::with_overrides(None, Some(&[30.0, -0.2, 10.0]))
            .expect("Valid override rejected");
        assert_eq!(params.standoff, TractrixParams::default().standoff);
        assert_eq!(params.width.coefficients(), [30.0, -0.2, 10.0]);
    }
}
