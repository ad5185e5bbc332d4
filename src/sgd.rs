use rayon::prelude::*;

use crate::config::{ExecutionMode, Topology};
use crate::helpers::one_hot;
use crate::loss_functions::{LossFunction, QuadraticCost};
use crate::mlp::{normalize_pixel, ForwardPass, Gradients, Mlp};
use crate::tensor::Tensor;

/// Gradient sums over one batch, one entry per parameter.
struct BatchDelta {
    w1: Tensor,
    b1: Tensor,
    w2: Tensor,
    b2: Tensor,
}

impl BatchDelta {
    fn zeros(topology: Topology) -> Self {
        Self {
            w1: Tensor::zeros_2d(topology.input, topology.hidden),
            b1: Tensor::zeros(vec![topology.hidden]),
            w2: Tensor::zeros_2d(topology.hidden, topology.output),
            b2: Tensor::zeros(vec![topology.output]),
        }
    }

    fn accumulate(&mut self, image: &[u8], pass: &ForwardPass, grads: &Gradients) {
        for (i, &pixel) in image.iter().enumerate() {
            let x = normalize_pixel(pixel);
            self.w1.row_mut(i)
                .iter_mut()
                .zip(&grads.nabla1.data)
                .for_each(|(d, n)| *d += x * n);
        }

        for (i, &a) in pass.a1.data.iter().enumerate() {
            self.w2.row_mut(i)
                .iter_mut()
                .zip(&grads.nabla2.data)
                .for_each(|(d, n)| *d += a * n);
        }

        self.b1 += &grads.nabla1;
        self.b2 += &grads.nabla2;
    }
}

/// Mini-batch stochastic gradient descent on summed batch gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    pub execution_mode: ExecutionMode,
}

fn sample_gradients(net: &Mlp, image: &[u8], label: u8) -> (ForwardPass, Gradients, f32) {
    let target = one_hot(label, net.output.units());
    let pass = net.forward(image);
    let grads = net.backpropagate(&pass, &target);
    let cost = QuadraticCost::forward(&pass.a2, &target);
    (pass, grads, cost)
}

impl Sgd {
    pub fn new(learning_rate: f64, execution_mode: ExecutionMode) -> Self {
        Self { learning_rate, execution_mode }
    }

    /// Runs one batch and applies exactly one parameter update.
    ///
    /// `images` holds `labels.len()` consecutive images of
    /// `net.topology().input` bytes each. Gradients are summed sample by
    /// sample in batch order, in both execution modes, so the result does not
    /// depend on the mode. Returns the summed quadratic cost of the batch,
    /// measured before the update.
    pub fn update_mini_batch(&self, net: &mut Mlp, images: &[u8], labels: &[u8]) -> f32 {
        let image_len = net.hidden.inputs();
        assert_eq!(images.len(), labels.len() * image_len,
            "Batch has {} bytes for {} labels of {} pixels",
            images.len(), labels.len(), image_len);

        let mut delta = BatchDelta::zeros(net.topology());
        let mut cost = 0.0;

        match self.execution_mode {
            ExecutionMode::Sequential => {
                for (image, &label) in images.chunks_exact(image_len).zip(labels) {
                    let (pass, grads, sample_cost) = sample_gradients(net, image, label);
                    delta.accumulate(image, &pass, &grads);
                    cost += sample_cost;
                }
            }
            ExecutionMode::Parallel => {
                let network: &Mlp = &*net;
                let samples: Vec<_> = images
                    .par_chunks_exact(image_len)
                    .zip(labels.par_iter())
                    .map(|(image, &label)| (image, sample_gradients(network, image, label)))
                    .collect();

                for (image, (pass, grads, sample_cost)) in &samples {
                    delta.accumulate(image, pass, grads);
                    cost += sample_cost;
                }
            }
        }

        net.hidden.apply(self.learning_rate, &delta.w1, &delta.b1);
        net.output.apply(self.learning_rate, &delta.w2, &delta.b2);

        cost
    }
}
