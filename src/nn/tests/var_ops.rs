/*
 * @Author       : 老董
 * @Description  : Var 句柄与扩展 trait 测试（算子重载、标量运算、归约、损失）
 */

use crate::nn::{Graph, GraphError, Init, Var, VarLossOps, VarMathOps, VarReduceOps};
use crate::tensor::Tensor;
use crate::{assert_err, assert_panic};
use approx::assert_abs_diff_eq;

#[test]
fn test_operator_overloading() {
    let graph = Graph::new();
    let a = graph.input(&Tensor::new(&[6., 8.], &[2])).unwrap();
    let b = graph.input(&Tensor::new(&[2., 4.], &[2])).unwrap();

    let sum = &a + &b;
    let diff = &a - &b;
    let product = &a * &b;
    let quotient = &a / &b;
    for (var, expected) in [
        (&sum, [8., 12.]),
        (&diff, [4., 4.]),
        (&product, [12., 32.]),
        (&quotient, [3., 2.]),
    ] {
        var.forward().unwrap();
        assert_eq!(var.value().unwrap().unwrap(), Tensor::new(&expected, &[2]));
    }
}

#[test]
fn test_vars_from_different_graphs() {
    let g1 = Graph::new();
    let g2 = Graph::new();
    let a = g1.input(&Tensor::ones(&[2])).unwrap();
    let b = g2.input(&Tensor::ones(&[2])).unwrap();

    assert!(!a.same_graph(&b));
    assert_err!(
        a.try_add(&b),
        GraphError::InvalidOperation(msg) if msg.contains("不同 Graph")
    );
    assert_err!(a.pow(&b), GraphError::InvalidOperation(_));
    assert_err!(a.mse_loss(&b), GraphError::InvalidOperation(_));
    assert_panic!(&a * &b);
}

#[test]
fn test_scalar_ops() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2., 3.], &[3])).unwrap();
    let y = x.add_scalar(0.5).unwrap().sub_scalar(2.).unwrap();

    assert_eq!(y.value_expected_shape().unwrap(), vec![3]);
    y.forward().unwrap();
    assert_eq!(
        y.value().unwrap().unwrap(),
        Tensor::new(&[-0.5, 0.5, 1.5], &[3])
    );
}

#[test]
fn test_reduce_and_clamp_chain() {
    let graph = Graph::new();
    let x = graph
        .input(&Tensor::new(&[2., -3., 4., 1., 0., 5.], &[1, 3, 2]))
        .unwrap();

    let sum = x.sum_axis(-2, false).unwrap();
    assert_eq!(sum.value_expected_shape().unwrap(), vec![1, 2]);
    sum.forward().unwrap();
    assert_eq!(sum.value().unwrap().unwrap(), Tensor::new(&[6., 3.], &[1, 2]));

    let shift = x.min_all().unwrap().clamp_max(0.).unwrap();
    assert_abs_diff_eq!(shift.item_after_forward(), -3.);

    let positive = graph.input(&Tensor::new(&[2., 3.], &[2])).unwrap();
    let no_shift = positive.min_all().unwrap().clamp_max(0.).unwrap();
    assert_abs_diff_eq!(no_shift.item_after_forward(), 0.);
}

#[test]
fn test_item_and_grad() {
    let graph = Graph::new();
    let w = graph.parameter(&[1], Init::Constant(3.), "w").unwrap();
    let target = graph.input(&Tensor::zeros(&[1])).unwrap();
    let loss = w.mse_loss(&target).unwrap();

    // 没有 forward 之前没有值
    assert_err!(loss.item(), GraphError::ComputationError(_));
    assert!(w.grad().unwrap().is_none());

    let loss_value = loss.backward().unwrap();
    assert_abs_diff_eq!(loss_value, 9.);
    assert_abs_diff_eq!(w.grad().unwrap().unwrap()[[0]], 6.);

    // 非标量不能 item
    let v = graph.input(&Tensor::ones(&[2])).unwrap();
    assert_err!(v.item(), GraphError::InvalidOperation(_));
}

#[test]
fn test_backward_retain_graph_keeps_values() {
    let graph = Graph::new();
    let w = graph.parameter(&[1], Init::Constant(2.), "w").unwrap();
    let x = graph.input(&Tensor::new(&[1., 2.], &[2])).unwrap();
    let target = graph.input(&Tensor::zeros(&[2])).unwrap();
    let y = &x * &w;
    let loss = y.mse_loss(&target).unwrap();

    loss.backward_retain_graph().unwrap();
    assert_eq!(y.value().unwrap().unwrap(), Tensor::new(&[2., 4.], &[2]));

    loss.backward().unwrap();
    assert!(y.value().unwrap().is_none());
}

#[test]
fn test_init_strategies() {
    assert_eq!(Init::Zeros.generate(&[2]), Tensor::zeros(&[2]));
    assert_eq!(Init::Ones.generate(&[2]), Tensor::ones(&[2]));
    assert_eq!(
        Init::Constant(1.5).generate(&[2]),
        Tensor::new(&[1.5, 1.5], &[2])
    );
    let normal = Init::Normal {
        mean: 10.,
        std: 0.01,
    }
    .generate(&[100]);
    assert_abs_diff_eq!(normal.mean().unwrap(), 10., epsilon = 0.01);
}

#[test]
fn test_graph_handle() {
    let graph = Graph::new();
    let x = graph.input_named(&Tensor::ones(&[2]), "x").unwrap();
    let p = graph.parameter(&[1], Init::Zeros, "p").unwrap();
    let _c = graph.constant(&Tensor::ones(&[1])).unwrap();
    assert_eq!(graph.nodes_count(), 3);

    let params = graph.parameters();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].node_id(), p.node_id());
    assert_eq!(graph.inner().get_node_name(x.node_id()).unwrap(), "x");

    // 同一图的另一个句柄
    let same = x.get_graph();
    assert_eq!(same.nodes_count(), 3);
    let wrapped: Var = graph.wrap_node_id(x.node_id());
    assert!(wrapped.same_graph(&x));
}

trait ItemAfterForward {
    fn item_after_forward(&self) -> f32;
}

impl ItemAfterForward for Var {
    fn item_after_forward(&self) -> f32 {
        self.forward().unwrap();
        self.item().unwrap()
    }
}
