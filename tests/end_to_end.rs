use std::num::NonZeroUsize;

use text_predictor::{
    TextErr,
    arch::{Network, Topology, squared_error},
    config::{ParamGenConfig, TextGenConfig},
    encoding::{Alphabet, FeatureEncoder, Normalization, Window, best_char, one_hot},
    initialization::ConstParamGen,
    training::{Generator, OnlineTrainer},
};

const CORPUS: &str = "the quick brown fox jumps over the lazy dog";

fn history(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn trains_over_pangram_without_diverging() {
    let config = TextGenConfig {
        topology: vec![28, 30, 30, 30, 28],
        history: history(10),
        learning_rate: 0.3,
        seed: Some(42),
        ..Default::default()
    };
    config.validate().unwrap();

    let encoder = config.encoder().unwrap();
    let mut network = config.network().unwrap();
    let stats = config
        .trainer()
        .unwrap()
        .train(&mut network, &encoder, CORPUS.chars())
        .unwrap();

    assert_eq!(stats.steps(), CORPUS.len() - 10);
    assert_eq!(stats.skipped(), 0);
    assert!(network.is_finite());
}

#[test]
fn trains_with_zero_initialization() {
    let config = TextGenConfig {
        learning_rate: 0.3,
        init: ParamGenConfig::Const { value: 0. },
        ..Default::default()
    };

    let encoder = config.encoder().unwrap();
    let mut network = config.network().unwrap();
    config
        .trainer()
        .unwrap()
        .train(&mut network, &encoder, CORPUS.repeat(5).chars())
        .unwrap();

    assert!(network.is_finite());
}

#[test]
fn manual_pipeline_matches_components() {
    let alphabet = Alphabet::standard();
    let encoder = FeatureEncoder::new(alphabet.clone(), Normalization::WindowLength);
    let topology = Topology::new([28, 30, 28]).unwrap();
    let mut param_gen = ConstParamGen::new(0.01, topology.num_params());
    let mut network = Network::new(topology, &mut param_gen).unwrap();

    let mut stream = CORPUS.chars();
    let mut window = Window::initialize(stream.by_ref(), history(10)).unwrap();
    assert_eq!(window.to_string(), "the quick ");

    let c = stream.next().unwrap();
    let input = encoder.encode(&window).unwrap();
    let target = one_hot(&alphabet, c).unwrap();
    assert!((input.sum() - 1.).abs() < 1e-6);

    let before = network.train(input.view(), target.view(), 0.05).unwrap();
    let after = squared_error(
        network.calculate(input.view()).unwrap().output(),
        target.view(),
    );
    assert!(after < before);

    window = window.advance(c);
    assert_eq!(window.to_string(), "he quick b");

    let output = network.calculate(encoder.encode(&window).unwrap().view()).unwrap();
    assert!(alphabet.contains(best_char(&alphabet, output.output()).unwrap()));
}

#[test]
fn learns_a_repeating_sentence() {
    let config = TextGenConfig {
        topology: vec![28, 40, 28],
        history: history(4),
        learning_rate: 0.5,
        seed: Some(7),
        ..Default::default()
    };

    let encoder = config.encoder().unwrap();
    let mut network = config.network().unwrap();
    let trainer = config.trainer().unwrap();
    let corpus = "abc. ".repeat(400);

    let first = trainer.train(&mut network, &encoder, corpus.chars()).unwrap();
    let second = trainer.train(&mut network, &encoder, corpus.chars()).unwrap();
    assert!(second.mean_loss().unwrap() < first.mean_loss().unwrap());

    let text = Generator::new(&network, &encoder)
        .unwrap()
        .generate_from_prompt("abc.", history(4), 10)
        .unwrap();
    assert_eq!(text.chars().count(), 10);
}

#[test]
fn short_corpus_is_reported() {
    let config = TextGenConfig::default();
    let encoder = config.encoder().unwrap();
    let mut network = config.network().unwrap();

    let err = config
        .trainer()
        .unwrap()
        .train(&mut network, &encoder, "the fox".chars())
        .unwrap_err();

    assert!(matches!(
        err,
        TextErr::StreamExhausted {
            got: 7,
            expected: 10
        }
    ));
}

#[test]
fn learning_rate_must_be_positive() {
    assert!(matches!(
        OnlineTrainer::new(-0.3, history(10)),
        Err(TextErr::InvalidLearningRate(_))
    ));
}
