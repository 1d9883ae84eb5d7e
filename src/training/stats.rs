/// Statistics produced by a pass of `OnlineTrainer::train` over a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrainStats {
    steps: usize,
    skipped: usize,
    loss_sum: f32,
    last_loss: Option<f32>,
}

impl TrainStats {
    pub(crate) fn record(&mut self, loss: f32) {
        self.steps += 1;
        self.loss_sum += loss;
        self.last_loss = Some(loss);
    }

    pub(crate) fn set_skipped(&mut self, skipped: usize) {
        self.skipped = skipped;
    }

    /// Returns the amount of training steps taken, one per character after the seed window.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the amount of characters dropped for being outside the alphabet.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the mean squared error over every step, `None` if no step was taken.
    pub fn mean_loss(&self) -> Option<f32> {
        (self.steps > 0).then(|| self.loss_sum / self.steps as f32)
    }

    /// Returns the squared error of the last step.
    pub fn last_loss(&self) -> Option<f32> {
        self.last_loss
    }
}
