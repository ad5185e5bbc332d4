use std::env;

use anyhow::{bail, Context, Result};
use digit_mlp::mnist_data::{load_mnist, DataPaths};
use digit_mlp::{ExecutionMode, Trainer, TrainingConfig};
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: digit-mlp [data_dir] [--parallel]
    let mut data_dir = String::from("./mnist");
    let mut execution_mode = ExecutionMode::Sequential;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--parallel" => execution_mode = ExecutionMode::Parallel,
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            dir => data_dir = dir.to_string(),
        }
    }

    let paths = DataPaths::in_dir(&data_dir);
    let (train, test) = load_mnist(&paths)
        .with_context(|| format!("failed to load MNIST from '{data_dir}'"))?;

    let config = TrainingConfig::default().with_execution_mode(execution_mode);
    let mut trainer = Trainer::new(config).context("invalid training configuration")?;

    trainer.run(&train, &test, |report| {
        println!("Epoch: {:2} - Correct: {}/{}", report.epoch, report.evaluation.correct, report.evaluation.total);
    });
    info!("Done");

    Ok(())
}
