use crate::activation_functions::sigmoid_prime;
use crate::config::Topology;
use crate::helpers::{argmax, one_hot};
use crate::layer::Layer;
use crate::loss_functions::{LossFunction, QuadraticCost};
use crate::random::Xorshift32;
use crate::tensor::Tensor;

/// Maps a raw pixel intensity to `[0, 1]`. Images are stored raw and only
/// normalized here, at the point of use.
pub fn normalize_pixel(pixel: u8) -> f32 {
    pixel as f32 / 255.0
}

/// Intermediate values of one forward pass, consumed by backprop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub z1: Tensor,
    pub a1: Tensor,
    pub z2: Tensor,
    pub a2: Tensor,
}

/// Per-unit errors of one sample: `nabla1` for the hidden layer, `nabla2`
/// for the output layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub nabla1: Tensor,
    pub nabla2: Tensor,
}

/// Two-layer sigmoid network: input -> hidden -> output.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    pub hidden: Layer,
    pub output: Layer,
}

impl Mlp {
    /// Random initialization in `[-1, 1]`. Draw order is W1, W2, B1, B2,
    /// each in row-major order, from a single generator.
    pub fn new(topology: Topology, seed: u32) -> Self {
        let mut rng = Xorshift32::new(seed);
        let w1 = Tensor::random_2d(topology.input, topology.hidden, &mut rng);
        let w2 = Tensor::random_2d(topology.hidden, topology.output, &mut rng);
        let b1 = Tensor::random(vec![topology.hidden], &mut rng);
        let b2 = Tensor::random(vec![topology.output], &mut rng);

        Self::from_layers(Layer::new(w1, b1), Layer::new(w2, b2))
    }

    pub fn from_layers(hidden: Layer, output: Layer) -> Self {
        assert_eq!(hidden.units(), output.inputs(),
            "Hidden layer has {} units but output layer expects {} inputs",
            hidden.units(), output.inputs());
        Self { hidden, output }
    }

    pub fn topology(&self) -> Topology {
        Topology::new(self.hidden.inputs(), self.hidden.units(), self.output.units())
    }

    pub fn forward(&self, image: &[u8]) -> ForwardPass {
        debug_assert_eq!(image.len(), self.hidden.inputs(), "image length doesn't match input layer");
        let (z1, a1) = self.hidden.forward(|j| normalize_pixel(image[j]));
        let (z2, a2) = self.output.forward(|j| a1.data[j]);

        ForwardPass { z1, a1, z2, a2 }
    }

    /// Errors at both layers for the quadratic cost. The hidden error flows
    /// back through the current output weights.
    pub fn backpropagate(&self, pass: &ForwardPass, target: &Tensor) -> Gradients {
        let cost_derivative = QuadraticCost::backward(&pass.a2, target);
        let nabla2: Vec<f32> = cost_derivative.data.iter()
            .zip(&pass.z2.data)
            .map(|(d, &z)| d * sigmoid_prime(z))
            .collect();
        let nabla2 = Tensor::vector(nabla2);

        let nabla1: Vec<f32> = self.output.propagate_error(&nabla2)
            .into_iter()
            .zip(&pass.z1.data)
            .map(|(e, &z)| e * sigmoid_prime(z))
            .collect();

        Gradients { nabla1: Tensor::vector(nabla1), nabla2 }
    }

    pub fn predict(&self, image: &[u8]) -> usize {
        argmax(&self.forward(image).a2.data)
    }

    /// Quadratic cost of a single sample.
    pub fn cost(&self, image: &[u8], label: u8) -> f32 {
        let target = one_hot(label, self.output.units());
        QuadraticCost::forward(&self.forward(image).a2, &target)
    }

    pub fn is_finite(&self) -> bool {
        self.hidden.is_finite() && self.output.is_finite()
    }
}
