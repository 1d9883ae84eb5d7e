use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, TextErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum TextErr {
    /// A vector or cache does not have the width the topology requires.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// The character has no symbol in the alphabet.
    OutOfAlphabet(char),
    /// The character stream ended before the window could be filled.
    StreamExhausted { got: usize, expected: usize },
    InvalidTopology(String),
    InvalidLearningRate(f32),
    InvalidConfig(String),
    /// The network produced a NaN or infinite activation at `index`.
    NonFiniteOutput { index: usize },
    /// The parameter generator ran dry before every parameter was initialized.
    ParamGenExhausted { got: usize, expected: usize },
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for TextErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            TextErr::OutOfAlphabet(c) => write!(f, "character {c:?} is not in the alphabet"),
            TextErr::StreamExhausted { got, expected } => write!(
                f,
                "the stream ended after {got} characters, at least {expected} are required"
            ),
            TextErr::InvalidTopology(msg) => write!(f, "invalid topology: {msg}"),
            TextErr::InvalidLearningRate(eta) => {
                write!(f, "the learning rate must be positive and finite, got {eta}")
            }
            TextErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            TextErr::NonFiniteOutput { index } => {
                write!(f, "the network output is not finite at index {index}")
            }
            TextErr::ParamGenExhausted { got, expected } => write!(
                f,
                "the parameter generator produced {got} of the {expected} required parameters"
            ),
            TextErr::Io(e) => write!(f, "io error: {e}"),
            TextErr::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for TextErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TextErr::Io(e) => Some(e),
            TextErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TextErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for TextErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
