// === COBB-DOUGLAS UTILITY ===

use crate::error::DomainError;
use crate::types::{Bundle, Exponent, check_exponent};

/// `x1^e * x2^(1-e)`. Zero whenever either good is zero.
pub fn utility(bundle: Bundle, exponent: Exponent) -> Result<f64, DomainError> {
    check_exponent(exponent)?;
    bundle.validate()?;
    Ok(bundle.x1.powf(exponent) * bundle.x2.powf(1.0 - exponent))
}

/// Points on the indifference curve `u(x1, x2) = level`.
///
/// Solves for `x2 = (level / x1^e)^(1/(1-e))` at each `x1`. Non-positive `x1`
/// values are skipped since the curve is asymptotic to both axes.
pub fn indifference_curve(
    exponent: Exponent,
    level: f64,
    x1_points: &[f64],
) -> Result<Vec<Bundle>, DomainError> {
    check_exponent(exponent)?;
    if level.is_nan() || level < 0.0 {
        return Err(DomainError::NegativeUtility { level });
    }

    Ok(x1_points
        .iter()
        .copied()
        .filter(|&x1| x1 > 0.0)
        .map(|x1| {
            let x2 = (level / x1.powf(exponent)).powf(1.0 / (1.0 - exponent));
            Bundle::new(x1, x2)
        })
        .collect())
}
