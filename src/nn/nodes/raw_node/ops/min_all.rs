use super::super::{TraitNode, invalid_parent_index, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// MinAll 节点：所有元素的最小值，输出形状为[1]
///
/// 反向传播时梯度平均分给所有取到最小值的元素
pub(in crate::nn) struct MinAll {
    shape: Vec<usize>,
}

impl MinAll {
    pub(in crate::nn) fn new(input_shape: &[usize]) -> Result<Self, GraphError> {
        if input_shape.iter().product::<usize>() == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "MinAll节点的输入不能为空，但收到的形状是{input_shape:?}"
            )));
        }
        Ok(Self { shape: vec![1] })
    }
}

impl TraitNode for MinAll {
    fn type_name(&self) -> &'static str {
        "MinAll"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_value(self.type_name(), parents, 0)?;
        Ok(Tensor::from(input.min_value()?))
    }

    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if index != 0 {
            return Err(invalid_parent_index(self.type_name(), index));
        }
        let input = parent_value(self.type_name(), parents, 0)?;
        let min = value.view().sum();
        let selected = input.mask(|x| x == min);
        let count = selected.view().sum();
        if count == 0.0 {
            return Ok(Tensor::zeros(input.shape()));
        }
        Ok(&selected * (upstream_grad.view().sum() / count))
    }
}
