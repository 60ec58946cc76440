use super::super::{TraitNode, invalid_parent_index, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// ClampMax 节点：大于`max`的元素被截为`max`，其余（含NaN）原样保留
pub(in crate::nn) struct ClampMax {
    max: f32,
    shape: Vec<usize>,
}

impl ClampMax {
    pub(in crate::nn) fn new(input_shape: &[usize], max: f32) -> Self {
        Self {
            max,
            shape: input_shape.to_vec(),
        }
    }
}

impl TraitNode for ClampMax {
    fn type_name(&self) -> &'static str {
        "ClampMax"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_value(self.type_name(), parents, 0)?;
        Ok(input.clamp_max(self.max))
    }

    /// 被截断的元素梯度为0，其余梯度直通
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if index != 0 {
            return Err(invalid_parent_index(self.type_name(), index));
        }
        let input = parent_value(self.type_name(), parents, 0)?;
        let max = self.max;
        Ok(upstream_grad * &input.mask(|x| x <= max || x.is_nan()))
    }
}
