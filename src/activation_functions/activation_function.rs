/// `1 + x + x^2/2 + x^3/6 + x^4/24 + x^5/120`
fn taylor5(x: f32) -> f32 {
    1.0 + x + x * x / 2.0 + x * x * x / 6.0 + x * x * x * x / 24.0 + x * x * x * x * x / 120.0
}

/// Approximate `e^x`. Negative inputs use `1 / p(-x)` so the polynomial is
/// only ever evaluated on a non-negative argument.
pub fn exp_approx(x: f32) -> f32 {
    if x >= 0.0 {
        taylor5(x)
    } else {
        1.0 / taylor5(-x)
    }
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + exp_approx(-x))
}

pub fn sigmoid_prime(x: f32) -> f32 {
    let s = sigmoid(x);
    s * (1.0 - s)
}
