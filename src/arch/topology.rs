use crate::{Result, TextErr};

/// The ordered layer sizes `[L0, L1, …, Ln]` of a network.
///
/// `L0` is the input width and `Ln` the output width. A topology has at least two layers and
/// every layer has at least one neuron.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    sizes: Vec<usize>,
}

impl Topology {
    /// Creates a new `Topology`.
    ///
    /// # Arguments
    /// * `sizes` - The amount of neurons of each layer, input first.
    ///
    /// # Returns
    /// The topology or `TextErr::InvalidTopology` if the sizes are invalid.
    pub fn new<I>(sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let sizes: Vec<_> = sizes.into_iter().collect();

        if sizes.len() < 2 {
            return Err(TextErr::InvalidTopology(format!(
                "at least an input and an output layer are required, got {} layers",
                sizes.len()
            )));
        }

        if let Some(i) = sizes.iter().position(|&size| size == 0) {
            return Err(TextErr::InvalidTopology(format!("layer {i} has no neurons")));
        }

        Ok(Self { sizes })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// The width of the input layer.
    pub fn input(&self) -> usize {
        self.sizes[0]
    }

    /// The width of the output layer.
    pub fn output(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Returns the amount of weighted layers, that is, every layer but the input.
    pub fn depth(&self) -> usize {
        self.sizes.len() - 1
    }

    /// Returns the `(fan_in, fan_out)` pair of each weighted layer.
    pub fn dims(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sizes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns the amount of parameters of each weighted layer, weights and biases.
    pub fn layer_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.dims().map(|(fan_in, fan_out)| (fan_in + 1) * fan_out)
    }

    /// Returns the total amount of parameters of a network with this topology.
    pub fn num_params(&self) -> usize {
        self.layer_sizes().sum()
    }
}
