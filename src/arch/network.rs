use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::{Topology, sigmoid, sigmoid_prime, squared_error};
use crate::{Result, TextErr, initialization::ParamGen};

/// A fully connected feedforward network with a sigmoid after every weighted layer.
///
/// The network only owns its parameters. Every intermediate value of a training step is
/// handed back to the caller: `calculate` returns a `ForwardPass`, `backprop` consumes it and
/// returns the `ErrorSignals`, and `update_weights` consumes both.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    // weights[l] has shape (L_{l+1}, L_l)
    weights: Vec<Array2<f32>>,
    biases: Vec<Array1<f32>>,
}

/// The activations and sigmoid derivatives of every layer for a single input.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    // activations[0] is the raw input, activations[l] the output of weighted layer l.
    activations: Vec<Array1<f32>>,
    // derivatives[l - 1] belongs to weighted layer l.
    derivatives: Vec<Array1<f32>>,
}

/// The error signal of every weighted layer, produced by `Network::backprop`.
#[derive(Debug, Clone)]
pub struct ErrorSignals {
    signals: Vec<Array1<f32>>,
}

impl ForwardPass {
    /// Returns the activations of the output layer.
    pub fn output(&self) -> ArrayView1<'_, f32> {
        self.activations[self.activations.len() - 1].view()
    }

    /// Consumes the pass returning the activations of the output layer.
    pub fn into_output(mut self) -> Array1<f32> {
        self.activations.pop().unwrap_or_default()
    }

    /// Returns the activations of layer `layer`, `0` being the input.
    pub fn activation(&self, layer: usize) -> Option<ArrayView1<'_, f32>> {
        self.activations.get(layer).map(|a| a.view())
    }

    /// Returns the sigmoid derivatives of weighted layer `layer`, starting from `1`.
    pub fn derivative(&self, layer: usize) -> Option<ArrayView1<'_, f32>> {
        layer
            .checked_sub(1)
            .and_then(|l| self.derivatives.get(l))
            .map(|d| d.view())
    }
}

impl ErrorSignals {
    /// Returns the error signal of weighted layer `layer`, starting from `1`.
    pub fn layer(&self, layer: usize) -> Option<ArrayView1<'_, f32>> {
        layer
            .checked_sub(1)
            .and_then(|l| self.signals.get(l))
            .map(|e| e.view())
    }
}

impl Network {
    /// Creates a new `Network`.
    ///
    /// Parameters are drawn layer by layer from `param_gen`: first the `L_i × L_{i-1}` weights in
    /// row major order and then the `L_i` biases.
    ///
    /// # Arguments
    /// * `topology` - The layer sizes.
    /// * `param_gen` - The generator of the initial parameters.
    ///
    /// # Returns
    /// The network or `TextErr::ParamGenExhausted` if the generator ran out of values or
    /// returned an empty sample.
    pub fn new(topology: Topology, param_gen: &mut dyn ParamGen) -> Result<Self> {
        let expected = topology.num_params();
        let mut got = 0;

        let mut weights = Vec::with_capacity(topology.depth());
        let mut biases = Vec::with_capacity(topology.depth());

        for (fan_in, fan_out) in topology.dims() {
            let size = (fan_in + 1) * fan_out;
            let mut params = Vec::with_capacity(size);

            while params.len() < size {
                let sample = match param_gen.sample(size - params.len()) {
                    Some(sample) if !sample.is_empty() => sample,
                    _ => {
                        return Err(TextErr::ParamGenExhausted {
                            got: got + params.len(),
                            expected,
                        });
                    }
                };
                params.extend(sample);
            }

            got += size;
            let b = params.split_off(fan_in * fan_out);
            let w = Array2::from_shape_vec((fan_out, fan_in), params).map_err(|e| {
                TextErr::InvalidTopology(format!("failed to shape layer weights: {e}"))
            })?;

            weights.push(w);
            biases.push(Array1::from_vec(b));
        }

        Ok(Self {
            topology,
            weights,
            biases,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weights(&self) -> &[Array2<f32>] {
        &self.weights
    }

    pub fn biases(&self) -> &[Array1<f32>] {
        &self.biases
    }

    /// Whether every weight and bias is a finite number.
    pub fn is_finite(&self) -> bool {
        self.weights.iter().all(|w| w.iter().all(|x| x.is_finite()))
            && self.biases.iter().all(|b| b.iter().all(|x| x.is_finite()))
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `input` - A vector of width `L0`.
    ///
    /// # Returns
    /// The activations and derivatives of every layer or `TextErr::DimensionMismatch` if the
    /// input has the wrong width.
    pub fn calculate(&self, input: ArrayView1<f32>) -> Result<ForwardPass> {
        check_width("input", input.len(), self.topology.input())?;

        let depth = self.topology.depth();
        let mut activations = Vec::with_capacity(depth + 1);
        let mut derivatives = Vec::with_capacity(depth);
        activations.push(input.to_owned());

        for (w, b) in self.weights.iter().zip(&self.biases) {
            let a = (w.dot(&activations[activations.len() - 1]) + b).mapv_into(sigmoid);
            derivatives.push(a.mapv(sigmoid_prime));
            activations.push(a);
        }

        Ok(ForwardPass {
            activations,
            derivatives,
        })
    }

    /// Propagates the output error backwards through the network.
    ///
    /// # Arguments
    /// * `pass` - The result of the `calculate` call for the input that `target` belongs to.
    /// * `target` - The expected output, of width `Ln`.
    ///
    /// # Returns
    /// The error signal of every weighted layer or `TextErr::DimensionMismatch` if either the
    /// target or the pass do not match this network.
    pub fn backprop(&self, pass: &ForwardPass, target: ArrayView1<f32>) -> Result<ErrorSignals> {
        check_width("target", target.len(), self.topology.output())?;
        self.check_pass(pass)?;

        let depth = self.topology.depth();
        let mut signals = vec![Array1::zeros(0); depth];

        let mut delta = (&pass.output() - &target) * &pass.derivatives[depth - 1];
        for l in (0..depth - 1).rev() {
            let next = self.weights[l + 1].t().dot(&delta) * &pass.derivatives[l];
            signals[l + 1] = delta;
            delta = next;
        }
        signals[0] = delta;

        Ok(ErrorSignals { signals })
    }

    /// Takes a gradient descent step of length `eta`.
    ///
    /// # Arguments
    /// * `pass` - The forward pass that `errors` were computed from.
    /// * `errors` - The result of `backprop`.
    /// * `eta` - The learning rate.
    ///
    /// # Returns
    /// An error if `eta` is not a positive finite number or the caches do not match this
    /// network, in which case no parameter is modified.
    pub fn update_weights(
        &mut self,
        pass: &ForwardPass,
        errors: &ErrorSignals,
        eta: f32,
    ) -> Result<()> {
        if !(eta > 0. && eta.is_finite()) {
            return Err(TextErr::InvalidLearningRate(eta));
        }

        self.check_pass(pass)?;
        self.check_errors(errors)?;

        for (l, (w, b)) in self.weights.iter_mut().zip(&mut self.biases).enumerate() {
            let e = &errors.signals[l];
            let a_prev = &pass.activations[l];

            let dw = e.view().insert_axis(Axis(1)).dot(&a_prev.view().insert_axis(Axis(0)));
            w.scaled_add(-eta, &dw);
            b.scaled_add(-eta, e);
        }

        Ok(())
    }

    /// Runs a whole online training step: `calculate`, `backprop` and `update_weights`.
    ///
    /// # Arguments
    /// * `input` - A vector of width `L0`.
    /// * `target` - The expected output, of width `Ln`.
    /// * `eta` - The learning rate.
    ///
    /// # Returns
    /// The squared error of the prediction made before the update.
    pub fn train(
        &mut self,
        input: ArrayView1<f32>,
        target: ArrayView1<f32>,
        eta: f32,
    ) -> Result<f32> {
        check_width("input", input.len(), self.topology.input())?;
        check_width("target", target.len(), self.topology.output())?;

        let pass = self.calculate(input)?;
        let errors = self.backprop(&pass, target)?;
        self.update_weights(&pass, &errors, eta)?;

        Ok(squared_error(pass.output(), target))
    }

    fn check_pass(&self, pass: &ForwardPass) -> Result<()> {
        check_width(
            "forward pass layers",
            pass.activations.len(),
            self.topology.sizes().len(),
        )?;
        check_width(
            "forward pass derivatives",
            pass.derivatives.len(),
            self.topology.depth(),
        )?;

        for (a, &size) in pass.activations.iter().zip(self.topology.sizes()) {
            check_width("forward pass activations", a.len(), size)?;
        }

        for (d, &size) in pass.derivatives.iter().zip(&self.topology.sizes()[1..]) {
            check_width("forward pass derivatives", d.len(), size)?;
        }

        Ok(())
    }

    fn check_errors(&self, errors: &ErrorSignals) -> Result<()> {
        check_width("error signal layers", errors.signals.len(), self.topology.depth())?;

        for (e, &size) in errors.signals.iter().zip(&self.topology.sizes()[1..]) {
            check_width("error signals", e.len(), size)?;
        }

        Ok(())
    }
}

fn check_width(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(TextErr::DimensionMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}
