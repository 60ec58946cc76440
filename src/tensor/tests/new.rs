use crate::errors::TensorError;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_new() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(tensor.shape(), &[2, 3]);
    assert_eq!(tensor.dimension(), 2);
    assert_eq!(tensor.size(), 6);
    assert_eq!(tensor[[1, 2]], 6.);
    assert_eq!(tensor.to_vec(), vec![1., 2., 3., 4., 5., 6.]);
}

#[test]
fn test_new_scalar() {
    for shape in [vec![], vec![1], vec![1, 1], vec![1, 1, 1]] {
        let tensor = Tensor::new(&[3.5], &shape);
        assert!(tensor.is_scalar());
        assert_eq!(tensor.get_data_number(), Some(3.5));
    }
    let vector = Tensor::new(&[1., 2.], &[2]);
    assert!(!vector.is_scalar());
    assert_eq!(vector.get_data_number(), None);
}

#[test]
fn test_try_new_with_mismatched_shape() {
    assert_eq!(
        Tensor::try_new(&[1., 2., 3.], &[2, 2]),
        Err(TensorError::DataShapeMismatch {
            data_len: 3,
            shape: vec![2, 2],
        })
    );
}

#[test]
#[should_panic(expected = "数据长度3与形状[2, 2]所需的元素个数不一致")]
fn test_new_with_mismatched_shape_panics() {
    let _ = Tensor::new(&[1., 2., 3.], &[2, 2]);
}

#[test]
fn test_zeros_and_ones() {
    let zeros = Tensor::zeros(&[2, 2]);
    assert!(zeros.to_vec().iter().all(|&x| x == 0.));
    let ones = Tensor::ones(&[3]);
    assert_eq!(ones.to_vec(), vec![1., 1., 1.]);
}

#[test]
fn test_normal_with_rng_is_reproducible() {
    let mut rng1 = StdRng::seed_from_u64(42);
    let mut rng2 = StdRng::seed_from_u64(42);
    let a = Tensor::normal_with_rng(0.0, 1.0, &[5, 4], &mut rng1);
    let b = Tensor::normal_with_rng(0.0, 1.0, &[5, 4], &mut rng2);
    assert_eq!(a, b);
    assert!(a.is_all_finite());
}

#[test]
fn test_normal_statistics() {
    let mut rng = StdRng::seed_from_u64(7);
    let tensor = Tensor::normal_with_rng(2.0, 0.5, &[10000], &mut rng);
    let mean = tensor.mean().unwrap();
    let var = tensor.map(|x| (x - mean).powi(2)).mean().unwrap();
    assert!((mean - 2.0).abs() < 0.05, "均值偏差过大: {mean}");
    assert!((var.sqrt() - 0.5).abs() < 0.05, "标准差偏差过大: {}", var.sqrt());
}

#[test]
fn test_display() {
    let tensor = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    let text = format!("{tensor}");
    assert!(text.contains("形状: [2, 2]"));
    assert!(text.contains("1.0000"));
}
