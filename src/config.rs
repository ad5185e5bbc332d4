use crate::error::ConfigError;

pub const IMAGE_HEIGHT: usize = 28;
pub const IMAGE_WIDTH: usize = 28;

pub const INPUT_LAYER_SIZE: usize = IMAGE_HEIGHT * IMAGE_WIDTH;
pub const HIDDEN_LAYER_SIZE: usize = 30;
pub const OUTPUT_LAYER_SIZE: usize = 10;

pub const LEARNING_RATE: f64 = 0.1;
pub const BATCH_SIZE: usize = 10;
pub const EPOCHS: usize = 1;
pub const RANDOM_SEED: u32 = 42;

pub const TRAINING_EXAMPLES: usize = 60_000;
pub const TESTING_EXAMPLES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Sequential,
    /// Per-sample work inside one batch (and evaluation) runs on the rayon
    /// pool. Parameter updates stay serial.
    Parallel,
}

/// Sizes of the two fully-connected layers: input -> hidden -> output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub input: usize,
    pub hidden: usize,
    pub output: usize,
}

impl Topology {
    pub const MNIST: Topology = Topology {
        input: INPUT_LAYER_SIZE,
        hidden: HIDDEN_LAYER_SIZE,
        output: OUTPUT_LAYER_SIZE,
    };

    pub fn new(input: usize, hidden: usize, output: usize) -> Self {
        Self { input, hidden, output }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::MNIST
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    /// Number of full passes over the training set.
    pub epochs: usize,
    /// Samples summed into one gradient step.
    pub batch_size: usize,
    /// Step size applied to the summed (not averaged) batch gradient, so it
    /// has to be tuned together with `batch_size`.
    pub learning_rate: f64,
    /// Seed for parameter initialization.
    pub seed: u32,
    pub topology: Topology,
    pub execution_mode: ExecutionMode,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: EPOCHS,
            batch_size: BATCH_SIZE,
            learning_rate: LEARNING_RATE,
            seed: RANDOM_SEED,
            topology: Topology::MNIST,
            execution_mode: ExecutionMode::Sequential,
        }
    }
}

impl TrainingConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_execution_mode(mut self, execution_mode: ExecutionMode) -> Self {
        self.execution_mode = execution_mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.epochs == 0 {
            return Err(ConfigError::InvalidEpochs);
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        let t = self.topology;
        if t.input == 0 || t.hidden == 0 || t.output == 0 {
            return Err(ConfigError::InvalidTopology(t));
        }
        Ok(())
    }
}
