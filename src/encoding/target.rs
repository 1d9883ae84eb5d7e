use ndarray::Array1;

use super::Alphabet;
use crate::Result;

/// Encodes the character that followed a window as the training target: a vector of width `K`
/// with a single `1.0` at the character's index.
pub fn one_hot(alphabet: &Alphabet, c: char) -> Result<Array1<f32>> {
    let mut target = Array1::zeros(alphabet.len());
    target[alphabet.encode(c)?] = 1.;
    Ok(target)
}
