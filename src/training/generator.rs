use std::num::NonZeroUsize;

use log::debug;

use super::{UnknownCharPolicy, check_widths, symbols::Symbols};
use crate::{
    Result,
    arch::Network,
    encoding::{FeatureEncoder, Window, best_char},
};

/// Generates text from a trained network, feeding every prediction back into the window.
pub struct Generator<'a> {
    network: &'a Network,
    encoder: &'a FeatureEncoder,
    policy: UnknownCharPolicy,
}

impl<'a> Generator<'a> {
    /// Creates a new `Generator`.
    ///
    /// # Returns
    /// The generator or `TextErr::DimensionMismatch` if the network's widths are not `K`.
    pub fn new(network: &'a Network, encoder: &'a FeatureEncoder) -> Result<Self> {
        check_widths(network, encoder)?;

        Ok(Self {
            network,
            encoder,
            policy: UnknownCharPolicy::default(),
        })
    }

    /// Sets what to do with prompt characters outside the alphabet.
    pub fn with_policy(mut self, policy: UnknownCharPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Predicts the character that follows `window`.
    pub fn predict(&self, window: &Window) -> Result<char> {
        let input = self.encoder.encode(window)?;
        let output = self.network.calculate(input.view())?.into_output();

        best_char(self.encoder.alphabet(), output.view())
    }

    /// Generates `length` characters following `window`.
    pub fn generate(&self, mut window: Window, length: usize) -> Result<String> {
        let mut text = String::with_capacity(length);

        for _ in 0..length {
            let c = self.predict(&window)?;
            text.push(c);
            window.shift(c);
        }

        debug!("generated {length} characters, final window {:?}", window.to_string());
        Ok(text)
    }

    /// Generates `length` characters following the last `history` symbols of `prompt`.
    ///
    /// # Returns
    /// The generated text, without the prompt, or `TextErr::StreamExhausted` if the prompt has
    /// less than `history` characters in the alphabet.
    pub fn generate_from_prompt(
        &self,
        prompt: &str,
        history: NonZeroUsize,
        length: usize,
    ) -> Result<String> {
        let mut symbols = Symbols::new(prompt.chars(), self.encoder.alphabet(), self.policy);
        let prompt: String = symbols.by_ref().collect();

        if let Some(e) = symbols.take_err() {
            return Err(e);
        }

        let window = Window::from_prompt(&prompt, history)?;
        self.generate(window, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        TextErr,
        arch::Topology,
        encoding::{Alphabet, Normalization},
        initialization::ConstParamGen,
        training::OnlineTrainer,
    };

    fn history(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn constant_network(k: usize, value: f32) -> Network {
        let topology = Topology::new([k, 6, k]).unwrap();
        let mut param_gen = ConstParamGen::new(value, topology.num_params());
        Network::new(topology, &mut param_gen).unwrap()
    }

    #[test]
    fn symmetric_network_predicts_first_symbol() {
        let encoder = FeatureEncoder::new(Alphabet::standard(), Normalization::WindowLength);
        let net = constant_network(28, 0.);
        let generator = Generator::new(&net, &encoder).unwrap();

        let window = Window::from_prompt("hello", history(5)).unwrap();
        assert_eq!(generator.predict(&window).unwrap(), 'a');
        assert_eq!(generator.generate(window, 3).unwrap(), "aaa");
    }

    #[test]
    fn generates_requested_length_within_alphabet() {
        let encoder = FeatureEncoder::new(Alphabet::extended(), Normalization::WindowLength);
        let mut net = constant_network(30, 0.1);
        OnlineTrainer::new(0.3, history(4))
            .unwrap()
            .train(&mut net, &encoder, "see the sea, see the tree.\n".chars())
            .unwrap();

        let generator = Generator::new(&net, &encoder).unwrap();
        let text = generator
            .generate_from_prompt("I See", history(4), 25)
            .unwrap();

        assert_eq!(text.chars().count(), 25);
        assert!(text.chars().all(|c| encoder.alphabet().contains(c)));
    }

    #[test]
    fn zero_length() {
        let encoder = FeatureEncoder::new(Alphabet::standard(), Normalization::WindowLength);
        let net = constant_network(28, 0.);
        let generator = Generator::new(&net, &encoder).unwrap();

        assert_eq!(
            generator.generate_from_prompt("abcd", history(4), 0).unwrap(),
            ""
        );
    }

    #[test]
    fn short_prompt() {
        let encoder = FeatureEncoder::new(Alphabet::standard(), Normalization::WindowLength);
        let net = constant_network(28, 0.);
        let generator = Generator::new(&net, &encoder).unwrap();

        assert!(matches!(
            generator.generate_from_prompt("Hi 5", history(4), 1),
            Err(TextErr::StreamExhausted { got: 3, .. })
        ));
    }

    #[test]
    fn rejecting_prompt() {
        let encoder = FeatureEncoder::new(Alphabet::standard(), Normalization::WindowLength);
        let net = constant_network(28, 0.);
        let generator = Generator::new(&net, &encoder)
            .unwrap()
            .with_policy(UnknownCharPolicy::Reject);

        assert!(matches!(
            generator.generate_from_prompt("hello, world", history(4), 1),
            Err(TextErr::OutOfAlphabet(','))
        ));
    }

    #[test]
    fn mismatched_network() {
        let encoder = FeatureEncoder::new(Alphabet::standard(), Normalization::WindowLength);
        let net = constant_network(30, 0.);

        assert!(matches!(
            Generator::new(&net, &encoder),
            Err(TextErr::DimensionMismatch { .. })
        ));
    }
}
