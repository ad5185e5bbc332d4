use crate::activation_functions::sigmoid;
use crate::tensor::Tensor;

/// Fully-connected sigmoid layer.
///
/// `weights` has shape `[inputs, units]`: the weight from input `j` to unit
/// `i` is `weights.at(j, i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub weights: Tensor,
    pub biases: Tensor,
}

impl Layer {
    pub fn new(weights: Tensor, biases: Tensor) -> Self {
        assert_eq!(weights.rank(), 2, "Layer weights must be 2D, got shape {:?}", weights.shape);
        assert_eq!(biases.shape, vec![weights.cols()],
            "Layer biases {:?} don't match {} units", biases.shape, weights.cols());
        Self { weights, biases }
    }

    pub fn inputs(&self) -> usize {
        self.weights.rows()
    }

    pub fn units(&self) -> usize {
        self.weights.cols()
    }

    /// Returns `(z, a)`: pre-activations and their sigmoids. `input(j)` yields
    /// the j-th input value; each sum starts at the bias and adds inputs in
    /// increasing `j`.
    pub fn forward(&self, input: impl Fn(usize) -> f32) -> (Tensor, Tensor) {
        let inputs = self.inputs();
        let z: Vec<f32> = (0..self.units())
            .map(|i| {
                let mut sum = self.biases.data[i];
                for j in 0..inputs {
                    sum += self.weights.at(j, i) * input(j);
                }
                sum
            })
            .collect();
        let a = z.iter().map(|&x| sigmoid(x)).collect();

        (Tensor::vector(z), Tensor::vector(a))
    }

    /// `W · delta`: the error each input receives from this layer's units,
    /// before scaling by the input's own activation derivative.
    pub fn propagate_error(&self, delta: &Tensor) -> Vec<f32> {
        (0..self.inputs())
            .map(|i| {
                let mut sum = 0.0;
                for (w, d) in self.weights.row(i).iter().zip(&delta.data) {
                    sum += w * d;
                }
                sum
            })
            .collect()
    }

    /// Gradient step: `W -= rate * delta_w`, `b -= rate * delta_b`.
    pub fn apply(&mut self, rate: f64, delta_w: &Tensor, delta_b: &Tensor) {
        self.weights.scaled_sub_assign(rate, delta_w);
        self.biases.scaled_sub_assign(rate, delta_b);
    }

    pub fn is_finite(&self) -> bool {
        self.weights.is_finite() && self.biases.is_finite()
    }
}
