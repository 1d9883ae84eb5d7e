mod alphabet;
mod decoder;
mod features;
mod target;
mod window;

pub use alphabet::{Alphabet, Symbol};
pub use decoder::best_char;
pub use features::{FeatureEncoder, Normalization};
pub use target::one_hot;
pub use window::Window;

pub(crate) use window::lowercase;
