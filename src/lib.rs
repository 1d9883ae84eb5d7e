//! Next character prediction with a small feedforward sigmoid network trained online.
//!
//! A sliding window of the last `H` characters is encoded as the frequency of each alphabet
//! symbol within it, the network maps that vector to one activation per symbol and the most
//! activated symbol is the prediction.

pub mod arch;
pub mod config;
pub mod encoding;
pub mod error;
pub mod initialization;
pub mod training;

pub use error::{Result, TextErr};
