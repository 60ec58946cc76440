/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 原始节点：每种节点只描述“如何由父节点的值算出本节点的值”
 *                 以及“如何把上游梯度传给某个父节点”（VJP），值与梯度的存储交给NodeHandle
 */

mod input;
mod loss;
mod ops;
mod parameter;

pub(in crate::nn) use input::Input;
pub(in crate::nn) use loss::*;
pub(in crate::nn) use ops::*;
pub(in crate::nn) use parameter::Parameter;

use crate::nn::GraphError;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
pub(in crate::nn) enum NodeType {
    Input(Input),
    Parameter(Parameter),
    Add(Add),
    Subtract(Subtract),
    Multiply(Multiply),
    Divide(Divide),
    Power(Power),
    SumAxis(SumAxis),
    MinAll(MinAll),
    ClampMax(ClampMax),
    MseLoss(MseLoss),
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    fn type_name(&self) -> &'static str;

    /// 节点创建时就已确定的输出形状
    fn value_expected_shape(&self) -> &[usize];

    /// 根据父节点的值计算本节点的值（调用方保证所有父节点都已有值）
    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError>;

    /// 计算本节点对第`index`个父节点的梯度（VJP）
    /// - `parents`: 所有父节点的值
    /// - `value`: 本节点在最近一次前向传播中的值
    /// - `upstream_grad`: 损失对本节点值的梯度，形状与本节点值一致
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError>;

    /// 是否为叶子节点（值由外部设置）
    fn is_leaf(&self) -> bool {
        false
    }

    /// 该节点的值是否应该在训练过程中被更新
    fn is_trainable(&self) -> bool {
        false
    }
}

/// 逐元素二元运算的输出形状：两者形状一致，或其中之一只含1个元素（广播）
pub(in crate::nn) fn elementwise_output_shape(
    type_name: &str,
    left: &[usize],
    right: &[usize],
) -> Result<Vec<usize>, GraphError> {
    let left_size = left.iter().product::<usize>();
    let right_size = right.iter().product::<usize>();
    if left == right || right_size == 1 {
        Ok(left.to_vec())
    } else if left_size == 1 {
        Ok(right.to_vec())
    } else {
        Err(GraphError::ShapeMismatch {
            expected: left.to_vec(),
            got: right.to_vec(),
            message: format!("{type_name}节点的两个父节点形状须一致，或其中之一为标量"),
        })
    }
}

/// 把与输出同形的梯度归约回父节点的形状（父节点被广播过时，对广播出来的部分求和）
pub(in crate::nn) fn reduce_grad_to_shape(
    grad: Tensor,
    shape: &[usize],
) -> Result<Tensor, GraphError> {
    if grad.shape() == shape {
        return Ok(grad);
    }
    if shape.iter().product::<usize>() == 1 {
        let total = grad.view().sum();
        return Ok(Tensor::try_new(&[total], shape)?);
    }
    Err(GraphError::ShapeMismatch {
        expected: shape.to_vec(),
        got: grad.shape().to_vec(),
        message: "梯度无法归约到父节点的形状".to_string(),
    })
}

/// 取出第`index`个父节点的值
pub(in crate::nn) fn parent_value<'a>(
    type_name: &str,
    parents: &[&'a Tensor],
    index: usize,
) -> Result<&'a Tensor, GraphError> {
    parents.get(index).copied().ok_or_else(|| {
        GraphError::ComputationError(format!("{type_name}节点缺少第{}个父节点", index + 1))
    })
}

/// 父节点下标不合法时的统一错误
pub(in crate::nn) fn invalid_parent_index(type_name: &str, index: usize) -> GraphError {
    GraphError::ComputationError(format!("{type_name}节点没有第{}个父节点", index + 1))
}
