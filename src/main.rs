use std::{env, fs, process};

use anyhow::Context;
use log::info;

use text_predictor::{config::TextGenConfig, training::Generator};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <corpus> <prompt> <length> [config.json]",
            args[0]
        );
        process::exit(1);
    }

    let corpus_path = &args[1];
    let prompt = &args[2];
    let length: usize = args[3]
        .parse()
        .with_context(|| format!("invalid output length {:?}", args[3]))?;

    let config = match args.get(4) {
        Some(path) => TextGenConfig::from_path(path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => TextGenConfig::default(),
    };

    let corpus = fs::read_to_string(corpus_path)
        .with_context(|| format!("failed to read corpus {corpus_path}"))?;

    let encoder = config.encoder()?;
    let mut network = config.network()?;
    let trainer = config.trainer()?;

    info!("training on {corpus_path}");
    let stats = trainer.train(&mut network, &encoder, corpus.chars())?;
    info!(
        "trained for {} steps, skipped {} characters",
        stats.steps(),
        stats.skipped()
    );

    let text = Generator::new(&network, &encoder)?
        .with_policy(config.unknown_chars)
        .generate_from_prompt(prompt, config.history, length)
        .context("failed to generate text")?;

    println!("{prompt}{text}");
    Ok(())
}
