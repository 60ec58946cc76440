/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 均方误差损失节点
 */

use super::super::{TraitNode, invalid_parent_index, parent_value};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// MseLoss 节点：loss = mean((input - target)²)，输出形状为[1, 1]
pub(in crate::nn) struct MseLoss {
    shape: Vec<usize>,
}

impl MseLoss {
    pub(in crate::nn) fn new(input: &[usize], target: &[usize]) -> Result<Self, GraphError> {
        if input != target {
            return Err(GraphError::ShapeMismatch {
                expected: input.to_vec(),
                got: target.to_vec(),
                message: "MseLoss节点的输入与目标形状必须相同".to_string(),
            });
        }
        if input.iter().product::<usize>() == 0 {
            return Err(GraphError::InvalidOperation(
                "MseLoss节点的输入不能为空".to_string(),
            ));
        }
        Ok(Self { shape: vec![1, 1] })
    }
}

impl TraitNode for MseLoss {
    fn type_name(&self) -> &'static str {
        "MseLoss"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_value(self.type_name(), parents, 0)?;
        let target = parent_value(self.type_name(), parents, 1)?;
        let diff = input - target;
        let loss = (&diff * &diff).mean()?;
        Ok(Tensor::try_new(&[loss], &self.shape)?)
    }

    /// - ∂L/∂input = upstream_grad × 2(input - target) / n
    /// - ∂L/∂target = -∂L/∂input
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let input = parent_value(self.type_name(), parents, 0)?;
        let target = parent_value(self.type_name(), parents, 1)?;
        let scale = 2.0 * upstream_grad.view().sum() / input.size() as f32;
        let grad_input = (input - target) * scale;
        match index {
            0 => Ok(grad_input),
            1 => Ok(-grad_input),
            _ => Err(invalid_parent_index(self.type_name(), index)),
        }
    }
}
