use super::super::{TraitNode, invalid_parent_index, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// SumAxis 节点：沿某一维度求和
pub(in crate::nn) struct SumAxis {
    /// 已规范化为非负的维度下标
    axis: usize,
    keep_dims: bool,
    input_shape: Vec<usize>,
    shape: Vec<usize>,
}

impl SumAxis {
    pub(in crate::nn) fn new(
        input_shape: &[usize],
        axis: isize,
        keep_dims: bool,
    ) -> Result<Self, GraphError> {
        let axis = Tensor::normalize_axis(axis, input_shape.len())?;
        let mut shape = input_shape.to_vec();
        if keep_dims {
            shape[axis] = 1;
        } else {
            shape.remove(axis);
        }
        Ok(Self {
            axis,
            keep_dims,
            input_shape: input_shape.to_vec(),
            shape,
        })
    }
}

impl TraitNode for SumAxis {
    fn type_name(&self) -> &'static str {
        "SumAxis"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_value(self.type_name(), parents, 0)?;
        Ok(input.sum_axis(self.axis as isize, self.keep_dims)?)
    }

    /// 被求和的每个元素对结果的偏导都是1，故把上游梯度沿该维度复制回输入形状
    fn calc_grad_to_parent(
        &self,
        index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if index != 0 {
            return Err(invalid_parent_index(self.type_name(), index));
        }
        let expanded = if self.keep_dims {
            upstream_grad.clone()
        } else {
            upstream_grad.insert_axis(self.axis)?
        };
        Ok(expanded.broadcast_to(&self.input_shape)?)
    }
}
