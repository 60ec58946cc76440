use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_powf() {
    let a = Tensor::new(&[1., 2., 3.], &[3]);
    assert_eq!(a.powf(2.), Tensor::new(&[1., 4., 9.], &[3]));
    assert_eq!(a.powf(0.), Tensor::ones(&[3]));
}

#[test]
fn test_pow_with_scalar_exponent_tensor() {
    let a = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    let p = Tensor::new(&[0.5], &[1]);
    let result = a.pow(&p);
    assert_eq!(result.shape(), &[2, 2]);
    assert_abs_diff_eq!(result[[0, 1]], 2f32.sqrt(), epsilon = 1e-6);
    assert_abs_diff_eq!(result[[1, 1]], 2., epsilon = 1e-6);
}

#[test]
fn test_pow_edge_cases() {
    let a = Tensor::new(&[0., -2.], &[2]);
    // 0的负数次幂为Inf
    assert_eq!(a.powf(-1.)[[0]], f32::INFINITY);
    // 负数的非整数次幂为NaN
    assert!(a.powf(0.5)[[1]].is_nan());
}

#[test]
fn test_ln_and_mask() {
    let a = Tensor::new(&[1., std::f32::consts::E, 0.], &[3]);
    let ln = a.ln();
    assert_abs_diff_eq!(ln[[0]], 0., epsilon = 1e-6);
    assert_abs_diff_eq!(ln[[1]], 1., epsilon = 1e-6);
    assert_eq!(ln[[2]], f32::NEG_INFINITY);
    assert_eq!(a.mask(|x| x > 0.5), Tensor::new(&[1., 1., 0.], &[3]));
}

#[test]
fn test_clamp_max() {
    let a = Tensor::new(&[-1., 0., 2., f32::NAN], &[4]);
    let clamped = a.clamp_max(0.);
    assert_eq!(clamped[[0]], -1.);
    assert_eq!(clamped[[1]], 0.);
    assert_eq!(clamped[[2]], 0.);
    assert!(clamped[[3]].is_nan());
}
