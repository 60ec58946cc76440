use super::super::{
    TraitNode, elementwise_output_shape, invalid_parent_index, parent_value, reduce_grad_to_shape,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Subtract 节点：C = A - B，支持标量广播
pub(in crate::nn) struct Subtract {
    shape: Vec<usize>,
    parents_shapes: [Vec<usize>; 2],
}

impl Subtract {
    pub(in crate::nn) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: elementwise_output_shape("Subtract", left, right)?,
            parents_shapes: [left.to_vec(), right.to_vec()],
        })
    }
}

impl TraitNode for Subtract {
    fn type_name(&self) -> &'static str {
        "Subtract"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let left = parent_value(self.type_name(), parents, 0)?;
        let right = parent_value(self.type_name(), parents, 1)?;
        Ok(left - right)
    }

    /// - ∂L/∂A = upstream_grad
    /// - ∂L/∂B = -upstream_grad
    fn calc_grad_to_parent(
        &self,
        index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        match index {
            0 => reduce_grad_to_shape(upstream_grad.clone(), &self.parents_shapes[0]),
            1 => reduce_grad_to_shape(-upstream_grad, &self.parents_shapes[1]),
            _ => Err(invalid_parent_index(self.type_name(), index)),
        }
    }
}
