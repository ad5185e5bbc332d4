mod basic_ops;
mod tensor_2d;

use crate::random::Xorshift32;

/// Dense f32 buffer in row-major order.
///
/// A 2D tensor of shape `[rows, cols]` stores element `(r, c)` at
/// `r * cols + c`. Vectors use shape `[len]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {

    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
        let expected_size: usize = shape.iter().product();
        assert_eq!(data.len(), expected_size,
            "Data length {} doesn't match shape {:?} (expected {})",
            data.len(), shape, expected_size);
        Tensor {
            data,
            shape,
        }
    }

    pub fn vector(data: Vec<f32>) -> Tensor {
        let len = data.len();
        Tensor::new(data, vec![len])
    }

    pub fn zeros(shape: Vec<usize>) -> Tensor {
        let size: usize = shape.iter().product();
        Tensor::new(vec![0.0; size], shape)
    }

    /// Draws every element from `[-1, 1]` in storage order.
    pub fn random(shape: Vec<usize>, rng: &mut Xorshift32) -> Tensor {
        let size: usize = shape.iter().product();
        let data = (0..size)
            .map(|_| rng.uniform_symmetric())
            .collect::<Vec<f32>>();

        Tensor::new(data, shape)
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn rows(&self) -> usize {
        if self.shape.len() >= 1 { self.shape[0] } else { 1 }
    }

    pub fn cols(&self) -> usize {
        if self.shape.len() >= 2 { self.shape[1] } else { 1 }
    }

    pub fn fill(&mut self, value: f32) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Index of the first maximum, see [`crate::helpers::argmax`].
    pub fn argmax(&self) -> usize {
        crate::helpers::argmax(&self.data)
    }

}
