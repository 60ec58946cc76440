use super::{TraitNode, invalid_parent_index};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Parameter 节点：可训练参数，梯度在多次反向传播间累积，直到被显式清零
pub(in crate::nn) struct Parameter {
    shape: Vec<usize>,
}

impl Parameter {
    pub(in crate::nn) fn new(shape: &[usize]) -> Result<Self, GraphError> {
        if shape.iter().product::<usize>() == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "参数张量不能为空，但收到的形状是{shape:?}"
            )));
        }
        Ok(Self {
            shape: shape.to_vec(),
        })
    }
}

impl TraitNode for Parameter {
    fn type_name(&self) -> &'static str {
        "Parameter"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(
            "Parameter节点的值应通过初始化或set_value设置，而不是通过父节点前向传播计算"
                .to_string(),
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

    fn is_trainable(&self) -> bool {
        true
    }
}
