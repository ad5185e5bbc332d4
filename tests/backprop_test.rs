use digit_mlp::helpers::one_hot;
use digit_mlp::layer::Layer;
use digit_mlp::mlp::{normalize_pixel, Mlp};
use digit_mlp::tensor::Tensor;
use digit_mlp::Topology;

#[cfg(test)]
mod backprop_tests {
    use super::*;

    fn small_network() -> Mlp {
        let hidden = Layer::new(
            Tensor::new_2d(vec![0.1, -0.2, 0.3, 0.4], 2, 2),
            Tensor::vector(vec![0.05, -0.05]),
        );
        let output = Layer::new(
            Tensor::new_2d(vec![0.2, -0.1, -0.3, 0.25], 2, 2),
            Tensor::vector(vec![0.0, 0.1]),
        );
        Mlp::from_layers(hidden, output)
    }

    // Seeded network scaled down so every pre-activation stays small, where
    // the truncated series is closest to the real exponential.
    fn gradient_check_network() -> Mlp {
        let mut net = Mlp::new(Topology::new(3, 4, 2), 7);
        for layer in [&mut net.hidden, &mut net.output] {
            layer.weights.data.iter_mut().for_each(|w| *w *= 0.25);
            layer.biases.data.iter_mut().for_each(|b| *b *= 0.25);
        }
        net
    }

    // Central difference of the quadratic cost with respect to the parameter
    // picked by `select`.
    fn numeric_gradient(
        net: &Mlp,
        image: &[u8],
        label: u8,
        epsilon: f32,
        select: impl Fn(&mut Mlp) -> &mut f32,
    ) -> f32 {
        let mut plus = net.clone();
        *select(&mut plus) += epsilon;
        let mut minus = net.clone();
        *select(&mut minus) -= epsilon;
        (plus.cost(image, label) - minus.cost(image, label)) / (2.0 * epsilon)
    }

    fn close(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_forward_matches_hand_computation() {
        let net = small_network();
        let pass = net.forward(&[255, 0]);

        assert!(close(pass.z1.data[0], 0.15, 1e-6));
        assert!(close(pass.z1.data[1], -0.25, 1e-6));
        assert!(close(pass.a1.data[0], 0.537_429_84, 1e-6));
        assert!(close(pass.a1.data[1], 0.437_823_57, 1e-6));
        assert!(close(pass.z2.data[0], -0.023_861_1, 1e-6));
        assert!(close(pass.z2.data[1], 0.155_712_9, 1e-6));
        assert!(close(pass.a2.data[0], 0.494_035, 1e-6));
        assert!(close(pass.a2.data[1], 0.538_849_76, 1e-6));
    }

    #[test]
    fn test_backprop_matches_hand_computation() {
        let net = small_network();
        let pass = net.forward(&[255, 0]);
        let grads = net.backpropagate(&pass, &one_hot(0, 2));

        assert!(close(grads.nabla2.data[0], -0.126_473_25, 1e-6));
        assert!(close(grads.nabla2.data[1], 0.133_899_15, 1e-6));
        assert!(close(grads.nabla1.data[0], -0.009_616_944, 1e-6));
        assert!(close(grads.nabla1.data[1], 0.017_578_1, 1e-6));
    }

    #[test]
    fn test_finite_difference_gradient_check() {
        let net = gradient_check_network();
        let image = [51u8, 204, 128];
        let label = 1;

        let pass = net.forward(&image);
        let grads = net.backpropagate(&pass, &one_hot(label, 2));

        let inputs: Vec<f32> = image.iter().map(|&p| normalize_pixel(p)).collect();
        let topology = net.topology();

        // Analytic gradient of every parameter, in storage order.
        let mut analytic_w1 = Vec::new();
        for x in &inputs {
            for n in &grads.nabla1.data {
                analytic_w1.push(x * n);
            }
        }
        let mut analytic_w2 = Vec::new();
        for a in &pass.a1.data {
            for n in &grads.nabla2.data {
                analytic_w2.push(a * n);
            }
        }

        let epsilon = 1e-2;
        let check = |numeric: f32, analytic: f32, what: &str| {
            let tolerance = 1e-3 + 2e-2 * analytic.abs();
            assert!(
                close(numeric, analytic, tolerance),
                "{what}: numeric {numeric} vs analytic {analytic}"
            );
        };

        for k in 0..topology.input * topology.hidden {
            let g = numeric_gradient(&net, &image, label, epsilon, |n| &mut n.hidden.weights.data[k]);
            check(g, analytic_w1[k], &format!("w1[{k}]"));
        }
        for k in 0..topology.hidden * topology.output {
            let g = numeric_gradient(&net, &image, label, epsilon, |n| &mut n.output.weights.data[k]);
            check(g, analytic_w2[k], &format!("w2[{k}]"));
        }
        for k in 0..topology.hidden {
            let g = numeric_gradient(&net, &image, label, epsilon, |n| &mut n.hidden.biases.data[k]);
            check(g, grads.nabla1.data[k], &format!("b1[{k}]"));
        }
        for k in 0..topology.output {
            let g = numeric_gradient(&net, &image, label, epsilon, |n| &mut n.output.biases.data[k]);
            check(g, grads.nabla2.data[k], &format!("b2[{k}]"));
        }
    }

    #[test]
    fn test_backprop_uses_output_weights() {
        let net = small_network();
        let mut zeroed = net.clone();
        zeroed.output.weights.fill(0.0);

        let pass = zeroed.forward(&[51, 204]);
        let grads = zeroed.backpropagate(&pass, &one_hot(1, 2));

        // No path back through the output weights, so no hidden error.
        assert!(grads.nabla1.data.iter().all(|&n| n == 0.0));
        assert!(grads.nabla2.data.iter().any(|&n| n != 0.0));
    }

    #[test]
    fn test_forward_is_pure() {
        let net = small_network();
        let before = net.clone();
        let first = net.forward(&[51, 204]);
        let second = net.forward(&[51, 204]);
        assert_eq!(first, second);
        assert_eq!(net, before);
    }
}
