mod activations;
mod loss;
mod network;
mod topology;

pub use activations::{sigmoid, sigmoid_prime};
pub use loss::squared_error;
pub use network::{ErrorSignals, ForwardPass, Network};
pub use topology::Topology;
