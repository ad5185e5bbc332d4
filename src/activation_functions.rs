//! Sigmoid built on a truncated Taylor series of `exp`.
//!
//! The derivative uses the closed form `s * (1 - s)` on the approximate
//! sigmoid, so backprop stays consistent with what the forward pass computed.
//!
//! Accuracy degrades for large magnitudes. In f32 the sigmoid reaches exactly
//! `1.0` for inputs above roughly 70, and exactly `0.0` once the polynomial
//! overflows (around `-5e7`). No finite input produces NaN.

mod activation_function;

pub use activation_function::{exp_approx, sigmoid, sigmoid_prime};
