use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{Alphabet, Window};
use crate::Result;

/// What the symbol counts of a window are divided by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Relative frequencies within the window, they add up to one.
    #[default]
    WindowLength,
    /// Counts divided by `K`.
    AlphabetSize,
}

/// Turns a window into the network's input: the frequency of each symbol within the window.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    alphabet: Alphabet,
    normalization: Normalization,
}

impl FeatureEncoder {
    pub fn new(alphabet: Alphabet, normalization: Normalization) -> Self {
        Self {
            alphabet,
            normalization,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the width of the encoded vectors, `K`.
    pub fn width(&self) -> usize {
        self.alphabet.len()
    }

    /// Counts how many characters of the window map to each symbol.
    pub fn histogram(&self, window: &Window) -> Result<Vec<usize>> {
        let mut counts = vec![0; self.alphabet.len()];

        for c in window.chars() {
            counts[self.alphabet.encode(c)?] += 1;
        }

        Ok(counts)
    }

    /// Divides each count by the configured divisor.
    ///
    /// # Arguments
    /// * `counts` - A histogram as returned by `histogram`.
    /// * `window_len` - The length of the window the histogram was taken over.
    pub fn normalize(&self, counts: &[usize], window_len: usize) -> Array1<f32> {
        let divisor = match self.normalization {
            Normalization::WindowLength => window_len,
            Normalization::AlphabetSize => counts.len(),
        };

        counts.iter().map(|&n| n as f32 / divisor as f32).collect()
    }

    /// Encodes a window as a normalized frequency vector of width `K`.
    pub fn encode(&self, window: &Window) -> Result<Array1<f32>> {
        let counts = self.histogram(window)?;
        Ok(self.normalize(&counts, window.len()))
    }
}
