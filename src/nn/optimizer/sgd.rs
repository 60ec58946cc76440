use super::{Optimizer, clear_grads, param_value};
use crate::nn::graph::GraphInner;
use crate::nn::{Graph, GraphError, NodeId, Var};
use std::cell::RefCell;
use std::rc::Rc;

/// 随机梯度下降：θ = θ - α * ∇θ
pub struct SGD {
    graph: Rc<RefCell<GraphInner>>,
    /// 要优化的参数节点 ID
    params: Vec<NodeId>,
    lr: f32,
}

impl SGD {
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Self {
        Self {
            graph: graph.inner_rc(),
            params: params.iter().map(Var::node_id).collect(),
            lr,
        }
    }
}

impl Optimizer for SGD {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        clear_grads(&mut self.graph.borrow_mut(), &self.params)
    }

    fn step(&mut self) -> Result<(), GraphError> {
        let mut g = self.graph.borrow_mut();
        for &node_id in &self.params {
            if let Some(grad) = g.get_node_grad(node_id)? {
                let current = param_value(&g, node_id)?;
                let new_value = current - &grad * self.lr;
                g.set_node_value(node_id, Some(&new_value))?;
            }
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
        // 无状态
    }
}
