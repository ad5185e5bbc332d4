use crate::tensor::Tensor;

pub trait LossFunction {

    fn forward(predicted: &Tensor, target: &Tensor) -> f32;
    fn backward(predicted: &Tensor, target: &Tensor) -> Tensor;

}

/// `C = 1/2 * sum((a - y)^2)`. The 1/2 cancels in the derivative, leaving
/// `dC/da = a - y`.
pub struct QuadraticCost;

impl LossFunction for QuadraticCost {

    fn forward(predicted: &Tensor, target: &Tensor) -> f32 {
        assert_eq!(predicted.shape, target.shape, "Shape mismatch {:?} vs {:?}", predicted.shape, target.shape);
        let sum: f32 = predicted.data.iter()
            .zip(&target.data)
            .map(|(a, y)| (a - y) * (a - y))
            .sum();
        0.5 * sum
    }

    fn backward(predicted: &Tensor, target: &Tensor) -> Tensor {
        assert_eq!(predicted.shape, target.shape, "Shape mismatch {:?} vs {:?}", predicted.shape, target.shape);
        let data = predicted.data.iter().zip(&target.data).map(|(a, y)| a - y).collect();
        Tensor::new(data, predicted.shape.clone())
    }

}
