use digit_mlp::helpers::{argmax, evaluate_model, one_hot, Evaluation};
use digit_mlp::layer::Layer;
use digit_mlp::tensor::Tensor;
use digit_mlp::{ExecutionMode, MnistData, Mlp};

#[cfg(test)]
mod evaluation_tests {
    use super::*;

    // Each hidden and output unit follows one input pixel, so the predicted
    // class is whichever pixel is brighter.
    fn brighter_pixel_network() -> Mlp {
        let hidden = Layer::new(
            Tensor::new_2d(vec![10.0, 0.0, 0.0, 10.0], 2, 2),
            Tensor::vector(vec![-5.0, -5.0]),
        );
        let output = Layer::new(
            Tensor::new_2d(vec![10.0, 0.0, 0.0, 10.0], 2, 2),
            Tensor::vector(vec![-5.0, -5.0]),
        );
        Mlp::from_layers(hidden, output)
    }

    fn test_set() -> MnistData {
        let images = vec![
            255, 0, // predicts 0
            0, 255, // predicts 1
            200, 30, // predicts 0
            10, 250, // predicts 1
            0, 255, // predicts 1
        ];
        let labels = vec![0, 1, 1, 0, 1];
        MnistData::from_raw(images, labels, 2).unwrap()
    }

    #[test]
    fn test_argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.2, 0.9, 0.9, 0.1]), 1);
        assert_eq!(argmax(&[0.5, 0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.1, 0.2, 0.3]), 2);
        assert_eq!(argmax(&[-1.0]), 0);
        let empty: [f32; 0] = [];
        assert_eq!(argmax(&empty), 0);
        assert_eq!(Tensor::vector(vec![0.2, 0.9, 0.9, 0.1]).argmax(), 1);
    }

    #[test]
    fn test_one_hot() {
        assert_eq!(one_hot(3, 5).data, vec![0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(one_hot(0, 1).data, vec![1.0]);
    }

    #[test]
    #[should_panic]
    fn test_one_hot_rejects_out_of_range_label() {
        one_hot(10, 10);
    }

    #[test]
    fn test_predictions_follow_brighter_pixel() {
        let net = brighter_pixel_network();
        assert_eq!(net.predict(&[255, 0]), 0);
        assert_eq!(net.predict(&[0, 255]), 1);
        assert_eq!(net.predict(&[200, 30]), 0);
        assert_eq!(net.predict(&[10, 250]), 1);
    }

    #[test]
    fn test_accuracy_tally_matches_manual_count() {
        let net = brighter_pixel_network();
        let data = test_set();

        let manual = (0..data.len())
            .filter(|&k| net.predict(data.image(k)) == data.label(k) as usize)
            .count();

        let evaluation = evaluate_model(&net, &data, ExecutionMode::Sequential);
        assert_eq!(evaluation.correct, 3);
        assert_eq!(evaluation.correct, manual);
        assert_eq!(evaluation.total, 5);
        assert!((evaluation.accuracy() - 0.6).abs() < 1e-12);
        assert!(evaluation.cost > 0.0);
    }

    #[test]
    fn test_parallel_evaluation_matches_sequential() {
        let net = Mlp::new(digit_mlp::Topology::new(2, 3, 2), 42);
        let data = test_set();

        let sequential = evaluate_model(&net, &data, ExecutionMode::Sequential);
        let parallel = evaluate_model(&net, &data, ExecutionMode::Parallel);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_evaluation_does_not_touch_parameters() {
        let net = brighter_pixel_network();
        let before = net.clone();
        evaluate_model(&net, &test_set(), ExecutionMode::Parallel);
        assert_eq!(net, before);
    }

    #[test]
    fn test_empty_test_set() {
        let net = brighter_pixel_network();
        let data = MnistData::from_raw(vec![], vec![], 2).unwrap();
        let evaluation = evaluate_model(&net, &data, ExecutionMode::Sequential);
        assert_eq!(evaluation, Evaluation { correct: 0, total: 0, cost: 0.0 });
        assert_eq!(evaluation.accuracy(), 0.0);
    }
}
