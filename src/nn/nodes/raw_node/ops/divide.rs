/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 逐元素除法节点
 *                 实现 C = A / B，除数中含0时按IEEE浮点语义得到Inf/NaN，不做拦截
 */

use super::super::{
    TraitNode, elementwise_output_shape, invalid_parent_index, parent_value, reduce_grad_to_shape,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Divide 节点：逐元素除法，支持标量广播
pub(in crate::nn) struct Divide {
    shape: Vec<usize>,
    parents_shapes: [Vec<usize>; 2],
}

impl Divide {
    pub(in crate::nn) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: elementwise_output_shape("Divide", left, right)?,
            parents_shapes: [left.to_vec(), right.to_vec()],
        })
    }
}

impl TraitNode for Divide {
    fn type_name(&self) -> &'static str {
        "Divide"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let left = parent_value(self.type_name(), parents, 0)?;
        let right = parent_value(self.type_name(), parents, 1)?;
        Ok(left / right)
    }

    /// 对于 C = A / B：
    /// - ∂L/∂A = upstream_grad / B
    /// - ∂L/∂B = -upstream_grad ⊙ A / B²
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let a_value = parent_value(self.type_name(), parents, 0)?;
        let b_value = parent_value(self.type_name(), parents, 1)?;
        match index {
            0 => reduce_grad_to_shape(upstream_grad / b_value, &self.parents_shapes[0]),
            1 => {
                let b_squared = b_value * b_value;
                let neg_grad_a = -(upstream_grad * a_value);
                reduce_grad_to_shape(&neg_grad_a / &b_squared, &self.parents_shapes[1])
            }
            _ => Err(invalid_parent_index(self.type_name(), index)),
        }
    }
}
