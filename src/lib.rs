pub mod activation_functions;
pub mod config;
pub mod error;
pub mod helpers;
pub mod layer;
pub mod loss_functions;
pub mod mlp;
pub mod mnist_data;
pub mod random;
pub mod sgd;
pub mod tensor;
pub mod training;

pub use config::{ExecutionMode, Topology, TrainingConfig};
pub use error::{ConfigError, DatasetError};
pub use mlp::Mlp;
pub use mnist_data::MnistData;
pub use tensor::Tensor;
pub use training::{EpochReport, Trainer};
