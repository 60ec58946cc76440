use super::{Optimizer, clear_grads, param_value};
use crate::nn::graph::GraphInner;
use crate::nn::{Graph, GraphError, NodeId, Var};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Adam: Adaptive Moment Estimation
/// - m = β1 * m + (1 - β1) * g
/// - v = β2 * v + (1 - β2) * g²
/// - θ = θ - α * m_hat / (√v_hat + ε)
pub struct Adam {
    graph: Rc<RefCell<GraphInner>>,
    params: Vec<NodeId>,
    lr: f32,
    /// β1 (一阶矩衰减)
    beta1: f32,
    /// β2 (二阶矩衰减)
    beta2: f32,
    /// 数值稳定项
    epsilon: f32,
    /// 一阶矩估计
    m: HashMap<NodeId, Tensor>,
    /// 二阶矩估计
    v: HashMap<NodeId, Tensor>,
    /// 时间步
    t: i32,
}

impl Adam {
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Self {
        Self::with_config(graph, params, lr, 0.9, 0.999, 1e-8)
    }

    pub fn with_config(
        graph: &Graph,
        params: &[Var],
        lr: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    ) -> Self {
        Self {
            graph: graph.inner_rc(),
            params: params.iter().map(Var::node_id).collect(),
            lr,
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        }
    }

    /// 已执行的更新步数
    pub const fn steps(&self) -> i32 {
        self.t
    }
}

impl Optimizer for Adam {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        clear_grads(&mut self.graph.borrow_mut(), &self.params)
    }

    fn step(&mut self) -> Result<(), GraphError> {
        self.t += 1;
        let mut g = self.graph.borrow_mut();

        for &node_id in &self.params {
            let Some(grad) = g.get_node_grad(node_id)? else {
                continue;
            };
            let current = param_value(&g, node_id)?;

            // 更新一阶矩
            let m = self
                .m
                .entry(node_id)
                .or_insert_with(|| Tensor::zeros(grad.shape()));
            *m = &*m * self.beta1 + &grad * (1.0 - self.beta1);

            // 更新二阶矩
            let v = self
                .v
                .entry(node_id)
                .or_insert_with(|| Tensor::zeros(grad.shape()));
            *v = &*v * self.beta2 + &(&grad * &grad) * (1.0 - self.beta2);

            // 偏差修正
            let m_hat = &*m / (1.0 - self.beta1.powi(self.t));
            let v_hat = &*v / (1.0 - self.beta2.powi(self.t));

            let denom = v_hat.map(f32::sqrt) + self.epsilon;
            let new_value = current - &(&m_hat / &denom) * self.lr;
            g.set_node_value(node_id, Some(&new_value))?;
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }
}
