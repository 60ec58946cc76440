use super::super::{
    TraitNode, elementwise_output_shape, invalid_parent_index, parent_value, reduce_grad_to_shape,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Multiply 节点：C = A ⊙ B（逐元素乘法），支持标量广播
pub(in crate::nn) struct Multiply {
    shape: Vec<usize>,
    parents_shapes: [Vec<usize>; 2],
}

impl Multiply {
    pub(in crate::nn) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: elementwise_output_shape("Multiply", left, right)?,
            parents_shapes: [left.to_vec(), right.to_vec()],
        })
    }
}

impl TraitNode for Multiply {
    fn type_name(&self) -> &'static str {
        "Multiply"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let left = parent_value(self.type_name(), parents, 0)?;
        let right = parent_value(self.type_name(), parents, 1)?;
        Ok(left * right)
    }

    /// - ∂L/∂A = upstream_grad ⊙ B
    /// - ∂L/∂B = upstream_grad ⊙ A
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let other_index = match index {
            0 => 1,
            1 => 0,
            _ => return Err(invalid_parent_index(self.type_name(), index)),
        };
        let other = parent_value(self.type_name(), parents, other_index)?;
        reduce_grad_to_shape(upstream_grad * other, &self.parents_shapes[index])
    }
}
