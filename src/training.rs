use log::{debug, info, warn};

use crate::config::TrainingConfig;
use crate::error::ConfigError;
use crate::helpers::{evaluate_model, Evaluation};
use crate::mlp::Mlp;
use crate::mnist_data::MnistData;
use crate::sgd::Sgd;

/// What the driver hands to the reporting side after every epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch index.
    pub epoch: usize,
    /// Test-set tally after the epoch.
    pub evaluation: Evaluation,
    /// Mean quadratic cost over the training samples of the epoch, each
    /// measured before its batch's update.
    pub train_cost: f32,
}

/// Owns the network for the whole run and mutates it once per batch.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    network: Mlp,
    sgd: Sgd,
}

impl Trainer {
    /// Validates `config` and initializes a network from its seed.
    pub fn new(config: TrainingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let network = Mlp::new(config.topology, config.seed);
        Ok(Self::build(config, network))
    }

    /// Starts from existing parameters instead of a seeded initialization.
    /// The config's topology is replaced by the network's.
    pub fn with_network(config: TrainingConfig, network: Mlp) -> Result<Self, ConfigError> {
        let config = config.with_topology(network.topology());
        config.validate()?;
        Ok(Self::build(config, network))
    }

    fn build(config: TrainingConfig, network: Mlp) -> Self {
        let sgd = Sgd::new(config.learning_rate, config.execution_mode);
        Self { config, network, sgd }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn network(&self) -> &Mlp {
        &self.network
    }

    pub fn into_network(self) -> Mlp {
        self.network
    }

    /// One pass over `train` in consecutive batches. Returns the mean
    /// pre-update cost of the samples used.
    pub fn train_epoch(&mut self, train: &MnistData) -> f32 {
        self.check_input(train, "training");

        let batch_size = self.config.batch_size;
        let mut cost = 0.0;
        let mut batches = 0;
        for (images, labels) in train.batches(batch_size) {
            cost += self.sgd.update_mini_batch(&mut self.network, images, labels);
            batches += 1;
            if batches % 1000 == 0 {
                debug!("{} batches of {} processed", batches, batch_size);
            }
        }

        let samples = batches * batch_size;
        if samples == 0 { 0.0 } else { cost / samples as f32 }
    }

    pub fn evaluate(&self, test: &MnistData) -> Evaluation {
        self.check_input(test, "test");
        evaluate_model(&self.network, test, self.config.execution_mode)
    }

    /// Trains for the configured number of epochs, evaluating on `test`
    /// after each one. `on_epoch` receives every report as it is produced.
    pub fn run<F>(&mut self, train: &MnistData, test: &MnistData, mut on_epoch: F) -> Vec<EpochReport>
    where
        F: FnMut(&EpochReport),
    {
        let remainder = train.len() % self.config.batch_size;
        if remainder != 0 {
            warn!(
                "{} training samples don't fill a batch of {} and are skipped every epoch",
                remainder, self.config.batch_size
            );
        }

        info!(
            "Training {}-{}-{} network: {} epochs, batch size {}, learning rate {}, {:?}",
            self.config.topology.input,
            self.config.topology.hidden,
            self.config.topology.output,
            self.config.epochs,
            self.config.batch_size,
            self.config.learning_rate,
            self.config.execution_mode,
        );

        let mut reports = Vec::with_capacity(self.config.epochs);
        for epoch in 1..=self.config.epochs {
            let train_cost = self.train_epoch(train);
            let evaluation = self.evaluate(test);
            let report = EpochReport { epoch, evaluation, train_cost };
            info!(
                "Epoch {}: {}/{} correct ({:.2}%), train cost {:.5}, test cost {:.5}",
                epoch,
                evaluation.correct,
                evaluation.total,
                evaluation.accuracy() * 100.0,
                train_cost,
                evaluation.cost,
            );
            on_epoch(&report);
            reports.push(report);
        }

        reports
    }

    // Every sample must fit the topology before any worker touches it.
    fn check_input(&self, data: &MnistData, which: &str) {
        assert_eq!(
            data.image_len(),
            self.config.topology.input,
            "{} images have {} pixels but the network expects {}",
            which,
            data.image_len(),
            self.config.topology.input
        );
        if let Err(err) = data.validate_labels(self.config.topology.output) {
            panic!("{} set rejected: {}", which, err);
        }
    }
}
