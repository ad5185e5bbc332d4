use crate::random::Xorshift32;
use crate::tensor::Tensor;

impl Tensor {

    pub fn new_2d(data: Vec<f32>, rows: usize, cols: usize) -> Tensor {
        Self::new(data, vec![rows, cols])
    }

    pub fn zeros_2d(rows: usize, cols: usize) -> Tensor {
        Self::zeros(vec![rows, cols])
    }

    pub fn random_2d(rows: usize, cols: usize, rng: &mut Xorshift32) -> Tensor {
        Self::random(vec![rows, cols], rng)
    }

    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols() + col]
    }

    pub fn row(&self, row: usize) -> &[f32] {
        let cols = self.cols();
        &self.data[row * cols..(row + 1) * cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        let cols = self.cols();
        &mut self.data[row * cols..(row + 1) * cols]
    }

}
