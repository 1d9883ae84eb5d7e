use std::num::NonZeroUsize;

use log::{debug, info};

use super::{TrainStats, UnknownCharPolicy, check_widths, symbols::Symbols};
use crate::{
    Result, TextErr,
    arch::Network,
    encoding::{FeatureEncoder, Window, one_hot},
};

/// Trains a network online over a character stream, one gradient step per character.
#[derive(Debug, Clone)]
pub struct OnlineTrainer {
    learning_rate: f32,
    history: NonZeroUsize,
    policy: UnknownCharPolicy,
    log_every: Option<NonZeroUsize>,
}

impl OnlineTrainer {
    /// Creates a new `OnlineTrainer`.
    ///
    /// # Arguments
    /// * `learning_rate` - The step length of every update.
    /// * `history` - `H`, the length of the sliding window.
    ///
    /// # Returns
    /// The trainer or `TextErr::InvalidLearningRate` if the rate is not positive and finite.
    pub fn new(learning_rate: f32, history: NonZeroUsize) -> Result<Self> {
        if !(learning_rate > 0. && learning_rate.is_finite()) {
            return Err(TextErr::InvalidLearningRate(learning_rate));
        }

        Ok(Self {
            learning_rate,
            history,
            policy: UnknownCharPolicy::default(),
            log_every: None,
        })
    }

    pub fn with_policy(mut self, policy: UnknownCharPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Logs the loss every `log_every` steps.
    pub fn with_log_every(mut self, log_every: Option<NonZeroUsize>) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn history(&self) -> NonZeroUsize {
        self.history
    }

    /// Streams once through `stream` training `network` on every character.
    ///
    /// The first `H` characters seed the window. Then, for each following character `c`, the
    /// network is trained to predict `c` from the window and `c` is shifted into the window.
    ///
    /// # Arguments
    /// * `network` - The network to train, its input and output widths must be `K`.
    /// * `encoder` - The feature encoder, which also holds the alphabet.
    /// * `stream` - The corpus.
    ///
    /// # Returns
    /// The training statistics, or the first error found. Weights are left fully updated up
    /// to the last successful step.
    pub fn train<I>(
        &self,
        network: &mut Network,
        encoder: &FeatureEncoder,
        stream: I,
    ) -> Result<TrainStats>
    where
        I: IntoIterator<Item = char>,
    {
        check_widths(network, encoder)?;

        let alphabet = encoder.alphabet();
        let mut symbols = Symbols::new(stream.into_iter(), alphabet, self.policy);

        let mut window = match Window::initialize(symbols.by_ref(), self.history) {
            Ok(window) => window,
            Err(e) => return Err(symbols.take_err().unwrap_or(e)),
        };
        debug!("seeded window with {:?}", window.to_string());

        let mut stats = TrainStats::default();

        for c in symbols.by_ref() {
            let input = encoder.encode(&window)?;
            let target = one_hot(alphabet, c)?;
            let loss = network.train(input.view(), target.view(), self.learning_rate)?;

            stats.record(loss);
            window.shift(c);

            if let Some(n) = self.log_every {
                if stats.steps() % n.get() == 0 {
                    info!(step = stats.steps(), loss = loss; "training");
                }
            }
        }

        if let Some(e) = symbols.take_err() {
            return Err(e);
        }

        stats.set_skipped(symbols.skipped());
        info!(
            steps = stats.steps(),
            skipped = stats.skipped(),
            mean_loss = stats.mean_loss().unwrap_or_default();
            "training complete"
        );

        Ok(stats)
    }
}
