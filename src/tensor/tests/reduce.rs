use crate::errors::TensorError;
use crate::tensor::Tensor;

#[test]
fn test_sum() {
    let a = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    assert_eq!(a.sum(), Tensor::new(&[10.], &[1]));
}

#[test]
fn test_sum_axis() {
    // [B=2, T=3, C=2]
    let a = Tensor::new(
        &[1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12.],
        &[2, 3, 2],
    );
    let reduced = a.sum_axis(-2, false).unwrap();
    assert_eq!(reduced, Tensor::new(&[9., 12., 27., 30.], &[2, 2]));

    let kept = a.sum_axis(1, true).unwrap();
    assert_eq!(kept, Tensor::new(&[9., 12., 27., 30.], &[2, 1, 2]));

    let last = a.sum_axis(-1, false).unwrap();
    assert_eq!(last, Tensor::new(&[3., 7., 11., 15., 19., 23.], &[2, 3]));
}

#[test]
fn test_sum_axis_out_of_range() {
    let a = Tensor::new(&[1., 2., 3.], &[3]);
    assert_eq!(
        a.sum_axis(-2, false),
        Err(TensorError::AxisOutOfRange { axis: -2, ndim: 1 })
    );
    assert_eq!(
        a.sum_axis(1, false),
        Err(TensorError::AxisOutOfRange { axis: 1, ndim: 1 })
    );
}

#[test]
fn test_min_max_mean() {
    let a = Tensor::new(&[3., -1., 2., 7.], &[2, 2]);
    assert_eq!(a.min_value(), Ok(-1.));
    assert_eq!(a.max_value(), Ok(7.));
    assert_eq!(a.mean(), Ok(2.75));

    let empty = Tensor::zeros(&[0, 3]);
    assert_eq!(empty.min_value(), Err(TensorError::EmptyTensor));
    assert_eq!(empty.mean(), Err(TensorError::EmptyTensor));
}

#[test]
fn test_min_max_propagate_nan() {
    let a = Tensor::new(&[f32::NAN, 1., -2., 2.], &[2, 2]);
    assert!(a.min_value().unwrap().is_nan());
    assert!(a.max_value().unwrap().is_nan());

    // NaN 在最后一个位置也同样传播
    let b = Tensor::new(&[1., -2., f32::NAN], &[3]);
    assert!(b.min_value().unwrap().is_nan());
}
