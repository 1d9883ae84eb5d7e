use ndarray::ArrayView1;

use super::Alphabet;
use crate::{Result, TextErr};

/// Decodes a network output into the character of its most activated symbol.
///
/// The first index wins on ties. Fails with `TextErr::NonFiniteOutput` if any activation is NaN
/// or infinite, since a diverged network has no meaningful prediction.
pub fn best_char(alphabet: &Alphabet, output: ArrayView1<f32>) -> Result<char> {
    if output.len() != alphabet.len() {
        return Err(TextErr::DimensionMismatch {
            what: "output",
            got: output.len(),
            expected: alphabet.len(),
        });
    }

    if let Some(index) = output.iter().position(|y| !y.is_finite()) {
        return Err(TextErr::NonFiniteOutput { index });
    }

    let mut best = 0;
    for (i, &y) in output.iter().enumerate().skip(1) {
        if y > output[best] {
            best = i;
        }
    }

    alphabet.decode(best)
}
