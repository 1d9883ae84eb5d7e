mod generator;
mod stats;
mod symbols;
mod trainer;

pub use generator::Generator;
pub use stats::TrainStats;
pub use symbols::UnknownCharPolicy;
pub use trainer::OnlineTrainer;

use crate::{Result, TextErr, arch::Network, encoding::FeatureEncoder};

/// Checks that the network reads and writes vectors of the encoder's width.
fn check_widths(network: &Network, encoder: &FeatureEncoder) -> Result<()> {
    let topology = network.topology();
    let k = encoder.width();

    for (what, got) in [
        ("network input", topology.input()),
        ("network output", topology.output()),
    ] {
        if got != k {
            return Err(TextErr::DimensionMismatch {
                what,
                got,
                expected: k,
            });
        }
    }

    Ok(())
}
