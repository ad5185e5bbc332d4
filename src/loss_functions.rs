mod loss_function;

pub use loss_function::{LossFunction, QuadraticCost};
