use nalgebra::DVector;

use crate::rocks_errors::RocksError;

/// Inverse-variance weighted mean and its propagated uncertainty.
///
/// With `wᵢ = 1 / σᵢ²`:
///
/// ```text
/// mean = Σ wᵢ·xᵢ / Σ wᵢ
/// σ    = 1 / √(Σ wᵢ)
/// ```
///
/// Arguments
/// -----------------
/// * `values`: the measurements `xᵢ`
/// * `uncertainties`: their 1-σ uncertainties `σᵢ`, same length as `values`
///
/// Return
/// ----------
/// * `(mean, σ)` on success
/// * [`RocksError::LengthMismatch`] if the slices differ in length
/// * [`RocksError::DivisionByZero`] if the input is empty, every uncertainty is zero or the
///   weights sum to infinity
/// * [`RocksError::InvalidUncertainty`] if a single uncertainty is zero, negative, not
///   finite, or so small that `1 / σ²` overflows
pub fn weighted_average(values: &[f64], uncertainties: &[f64]) -> Result<(f64, f64), RocksError> {
    if values.len() != uncertainties.len() {
        return Err(RocksError::LengthMismatch {
            values: values.len(),
            uncertainties: uncertainties.len(),
        });
    }
    if uncertainties.iter().all(|&sigma| sigma == 0.0) {
        return Err(RocksError::DivisionByZero);
    }
    if let Some((index, &value)) = uncertainties
        .iter()
        .enumerate()
        .find(|&(_, &sigma)| !(sigma.is_finite() && sigma > 0.0 && weight(sigma).is_finite()))
    {
        return Err(RocksError::InvalidUncertainty { index, value });
    }

    let values = DVector::from_column_slice(values);
    let weights = DVector::from_iterator(
        uncertainties.len(),
        uncertainties.iter().map(|&sigma| weight(sigma)),
    );

    let weight_sum = weights.sum();
    if !weight_sum.is_finite() {
        return Err(RocksError::DivisionByZero);
    }
    let mean = weights.dot(&values) / weight_sum;
    Ok((mean, 1.0 / weight_sum.sqrt()))
}

fn weight(sigma: f64) -> f64 {
    (sigma * sigma).recip()
}
