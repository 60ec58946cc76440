use super::super::{
    TraitNode, elementwise_output_shape, invalid_parent_index, parent_value, reduce_grad_to_shape,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Add 节点：C = A + B，支持标量广播
pub(in crate::nn) struct Add {
    shape: Vec<usize>,
    parents_shapes: [Vec<usize>; 2],
}

impl Add {
    pub(in crate::nn) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: elementwise_output_shape("Add", left, right)?,
            parents_shapes: [left.to_vec(), right.to_vec()],
        })
    }
}

impl TraitNode for Add {
    fn type_name(&self) -> &'static str {
        "Add"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let left = parent_value(self.type_name(), parents, 0)?;
        let right = parent_value(self.type_name(), parents, 1)?;
        Ok(left + right)
    }

    /// ∂L/∂A = ∂L/∂B = upstream_grad（被广播的一侧需求和）
    fn calc_grad_to_parent(
        &self,
        index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let shape = self
            .parents_shapes
            .get(index)
            .ok_or_else(|| invalid_parent_index(self.type_name(), index))?;
        reduce_grad_to_shape(upstream_grad.clone(), shape)
    }
}
