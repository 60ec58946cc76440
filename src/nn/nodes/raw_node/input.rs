use super::{TraitNode, invalid_parent_index};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Input 节点：外部数据的入口，不参与梯度计算
pub(in crate::nn) struct Input {
    shape: Vec<usize>,
}

impl Input {
    pub(in crate::nn) fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
        }
    }
}

impl TraitNode for Input {
    fn type_name(&self) -> &'static str {
        "Input"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(
            "Input节点的值应通过set_value设置，而不是通过父节点前向传播计算".to_string(),
        ))
    }

    fn calc_grad_to_parent(
        &self,
        index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(invalid_parent_index(self.type_name(), index))
    }

    fn is_leaf(&self) -> bool {
        true
    }
}
