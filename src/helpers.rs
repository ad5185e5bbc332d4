use rayon::prelude::*;

use crate::config::ExecutionMode;
use crate::loss_functions::{LossFunction, QuadraticCost};
use crate::mlp::Mlp;
use crate::mnist_data::MnistData;
use crate::tensor::Tensor;

/// Index of the maximum value. Only a strictly greater value replaces the
/// running maximum, so ties resolve to the earliest index. Returns 0 for an
/// empty slice.
pub fn argmax(values: &[f32]) -> usize {
    let mut max_idx = 0;
    let mut max_val = match values.first() {
        Some(&v) => v,
        None => return 0,
    };
    for (i, &val) in values.iter().enumerate() {
        if val > max_val {
            max_val = val;
            max_idx = i;
        }
    }
    max_idx
}

/// Target vector with 1.0 at `label` and 0.0 elsewhere.
pub fn one_hot(label: u8, classes: usize) -> Tensor {
    let label = label as usize;
    assert!(label < classes, "label {} is outside [0, {})", label, classes);
    let mut data = vec![0.0; classes];
    data[label] = 1.0;
    Tensor::vector(data)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    /// Mean quadratic cost over the evaluated samples.
    pub cost: f32,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

fn score_sample(net: &Mlp, image: &[u8], label: u8) -> (bool, f32) {
    let a2 = net.forward(image).a2;
    let target = one_hot(label, net.output.units());
    (argmax(&a2.data) == label as usize, QuadraticCost::forward(&a2, &target))
}

/// Counts the samples whose arg-max output matches their label. Never
/// touches the parameters.
pub fn evaluate_model(net: &Mlp, data: &MnistData, execution_mode: ExecutionMode) -> Evaluation {
    let scores: Vec<(bool, f32)> = match execution_mode {
        ExecutionMode::Sequential => data
            .samples()
            .map(|(image, label)| score_sample(net, image, label))
            .collect(),
        ExecutionMode::Parallel => data
            .images()
            .par_chunks_exact(data.image_len())
            .zip(data.labels().par_iter())
            .map(|(image, &label)| score_sample(net, image, label))
            .collect(),
    };

    let mut correct = 0;
    let mut cost = 0.0;
    for (hit, sample_cost) in &scores {
        if *hit {
            correct += 1;
        }
        cost += sample_cost;
    }

    let total = scores.len();
    let cost = if total == 0 { 0.0 } else { cost / total as f32 };
    Evaluation { correct, total, cost }
}
