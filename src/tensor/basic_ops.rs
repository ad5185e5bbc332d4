use std::ops::AddAssign;

use crate::tensor::Tensor;

impl AddAssign<&Tensor> for Tensor {
    fn add_assign(&mut self, rhs: &Tensor) {
        assert_eq!(self.shape, rhs.shape, "Tensor add: shape mismatch {:?} vs {:?}", self.shape, rhs.shape);
        self.data.iter_mut().zip(&rhs.data).for_each(|(a, b)| *a += b);
    }
}

impl Tensor {

    /// `self -= scale * rhs`, element by element. Each element is computed
    /// in f64 and rounded to f32 once.
    pub fn scaled_sub_assign(&mut self, scale: f64, rhs: &Tensor) {
        assert_eq!(self.shape, rhs.shape, "Tensor scaled sub: shape mismatch {:?} vs {:?}", self.shape, rhs.shape);
        self.data.iter_mut()
            .zip(&rhs.data)
            .for_each(|(a, &b)| *a = (f64::from(*a) - scale * f64::from(b)) as f32);
    }

    pub fn approx_eq(&self, other: &Tensor, tolerance: f32) -> bool {
        if self.shape != other.shape {
            return false;
        }

        self.data.iter()
            .zip(&other.data)
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

}
