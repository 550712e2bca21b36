use crate::{DoclassError, Float, Result};

/// Computes **classification accuracy**: the fraction of predictions that
/// exactly equal the corresponding true label.
///
/// # Definition
///
/// For predictions `p` and labels `y` of length `n`:
///
/// ```text
/// accuracy = (1/n) Σ_i [p_i == y_i]
/// ```
///
/// # Returns
///
/// A value in `[0, 1]`.
///
/// # Errors
///
/// - [`DoclassError::EmptyTrainingData`] if both slices are empty.
/// - [`DoclassError::ShapeMismatch`] if the lengths differ.
///
/// # Examples
///
/// ```rust
/// use doclass_core::metrics::accuracy;
///
/// let predicted = ["spam", "ham", "spam", "ham"];
/// let actual = ["spam", "ham", "ham", "ham"];
///
/// assert!((accuracy(&predicted, &actual).unwrap() - 0.75).abs() < 1e-12);
/// ```
pub fn accuracy<P, A>(predicted: &[P], actual: &[A]) -> Result<Float>
where
    P: PartialEq<A>,
{
    if predicted.len() != actual.len() {
        return Err(DoclassError::ShapeMismatch {
            expected: format!("Expected {} predictions", actual.len()),
            got: format!("Got {}", predicted.len()),
        });
    }
    if actual.is_empty() {
        return Err(DoclassError::EmptyTrainingData);
    }

    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| *p == *a)
        .count();

    Ok(correct as Float / actual.len() as Float)
}
