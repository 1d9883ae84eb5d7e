use std::{cell::RefCell, fs, num::NonZeroUsize, path::Path, rc::Rc};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result, TextErr,
    arch::{Network, Topology},
    encoding::{Alphabet, FeatureEncoder, Normalization, Symbol},
    initialization::{ChainedParamGen, ConstParamGen, ParamGen, RandErr, RandParamGen},
    training::{OnlineTrainer, UnknownCharPolicy},
};

const DEFAULT_HISTORY: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// The alphabet the network reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetConfig {
    #[default]
    Standard,
    Extended,
    Custom {
        symbols: Vec<Symbol>,
    },
}

/// How the initial weights and biases are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamGenConfig {
    Const { value: f32 },
    Uniform { low: f32, high: f32 },
    Normal { mean: f32, std_dev: f32 },
    /// Per layer Xavier uniform weights and zero biases.
    #[default]
    XavierUniform,
}

/// Everything needed to build and train a text predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextGenConfig {
    /// Layer sizes, the first and the last must equal the alphabet size.
    pub topology: Vec<usize>,
    /// `H`, the sliding window length.
    pub history: NonZeroUsize,
    pub learning_rate: f32,
    pub alphabet: AlphabetConfig,
    pub normalization: Normalization,
    pub init: ParamGenConfig,
    pub seed: Option<u64>,
    pub unknown_chars: UnknownCharPolicy,
    /// Log the training loss every this many steps.
    pub log_every: Option<NonZeroUsize>,
}

impl Default for TextGenConfig {
    fn default() -> Self {
        Self {
            topology: vec![28, 30, 30, 30, 28],
            history: DEFAULT_HISTORY,
            learning_rate: 0.05,
            alphabet: AlphabetConfig::default(),
            normalization: Normalization::default(),
            init: ParamGenConfig::default(),
            seed: None,
            unknown_chars: UnknownCharPolicy::default(),
            log_every: None,
        }
    }
}

impl TextGenConfig {
    /// Parses and validates a JSON configuration, missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Checks the configuration is consistent, in particular that the network's input and
    /// output widths match the alphabet size.
    pub fn validate(&self) -> Result<()> {
        let k = self.alphabet()?.len();
        let topology = self.topology()?;

        if topology.input() != k || topology.output() != k {
            return Err(TextErr::InvalidConfig(format!(
                "the topology must start and end with the alphabet size {k}, got {:?}",
                self.topology
            )));
        }

        if !(self.learning_rate > 0. && self.learning_rate.is_finite()) {
            return Err(TextErr::InvalidLearningRate(self.learning_rate));
        }

        Ok(())
    }

    pub fn alphabet(&self) -> Result<Alphabet> {
        match &self.alphabet {
            AlphabetConfig::Standard => Ok(Alphabet::standard()),
            AlphabetConfig::Extended => Ok(Alphabet::extended()),
            AlphabetConfig::Custom { symbols } => Alphabet::new(symbols.iter().cloned()),
        }
    }

    pub fn topology(&self) -> Result<Topology> {
        Topology::new(self.topology.iter().copied())
    }

    pub fn encoder(&self) -> Result<FeatureEncoder> {
        Ok(FeatureEncoder::new(self.alphabet()?, self.normalization))
    }

    /// Builds a freshly initialized network.
    pub fn network(&self) -> Result<Network> {
        let topology = self.topology()?;
        let rng = Rc::new(RefCell::new(match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }));

        let mut param_gen = self.param_gen(&topology, rng).map_err(invalid_init)?;
        Network::new(topology, &mut *param_gen)
    }

    pub fn trainer(&self) -> Result<OnlineTrainer> {
        Ok(OnlineTrainer::new(self.learning_rate, self.history)?
            .with_policy(self.unknown_chars)
            .with_log_every(self.log_every))
    }

    fn param_gen(
        &self,
        topology: &Topology,
        rng: Rc<RefCell<StdRng>>,
    ) -> std::result::Result<Box<dyn ParamGen>, RandErr> {
        let limit = topology.num_params();

        let param_gen: Box<dyn ParamGen> = match self.init {
            ParamGenConfig::Const { value } => Box::new(ConstParamGen::new(value, limit)),
            ParamGenConfig::Uniform { low, high } => {
                Box::new(RandParamGen::uniform(rng, limit, low, high)?)
            }
            ParamGenConfig::Normal { mean, std_dev } => {
                Box::new(RandParamGen::normal(rng, limit, mean, std_dev)?)
            }
            ParamGenConfig::XavierUniform => {
                let mut layers: Vec<Box<dyn ParamGen>> = Vec::new();

                for (fan_in, fan_out) in topology.dims() {
                    let limit = fan_in * fan_out;
                    let weights = RandParamGen::xavier_uniform(rng.clone(), limit, fan_in, fan_out)?;
                    layers.push(Box::new(weights));
                    layers.push(Box::new(ConstParamGen::new(0., fan_out)));
                }

                Box::new(ChainedParamGen::new(layers))
            }
        };

        Ok(param_gen)
    }
}

fn invalid_init(e: RandErr) -> TextErr {
    TextErr::InvalidConfig(format!("invalid initialization: {e}"))
}
