/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 节点句柄：包裹原始节点，并统一持有节点的值、梯度与前向传播代数
 */

use super::NodeId;
use super::raw_node::{NodeType, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use std::fmt;

pub(in crate::nn) struct NodeHandle {
    id: NodeId,
    name: String,
    raw_node: NodeType,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    last_forward_pass_id: u64,
}

impl NodeHandle {
    pub(in crate::nn) fn new<T: Into<NodeType>>(id: NodeId, name: &str, raw_node: T) -> Self {
        Self {
            id,
            name: name.to_string(),
            raw_node: raw_node.into(),
            value: None,
            grad: None,
            last_forward_pass_id: 0,
        }
    }

    pub(in crate::nn) const fn id(&self) -> NodeId {
        self.id
    }

    pub(in crate::nn) fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::nn) fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub(in crate::nn) fn value_expected_shape(&self) -> &[usize] {
        self.raw_node.value_expected_shape()
    }

    /// 输入/参数节点：值由外部设置，不从父节点计算
    pub(in crate::nn) fn is_leaf(&self) -> bool {
        self.raw_node.is_leaf()
    }

    pub(in crate::nn) fn is_trainable(&self) -> bool {
        self.raw_node.is_trainable()
    }

    pub(in crate::nn) const fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    pub(in crate::nn) const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// 手动设置节点的值，只对叶子节点开放，且形状须与节点创建时确定的形状一致
    pub(in crate::nn) fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if !self.is_leaf() {
            return Err(GraphError::InvalidOperation(format!(
                "{self}的值只能通过前向传播计算得到，不能直接设置"
            )));
        }
        if let Some(value) = value
            && value.shape() != self.value_expected_shape()
        {
            return Err(GraphError::ShapeMismatch {
                expected: self.value_expected_shape().to_vec(),
                got: value.shape().to_vec(),
                message: format!("{self}的新值与节点形状不一致"),
            });
        }
        self.value = value.cloned();
        Ok(())
    }

    pub(in crate::nn) fn clear_value(&mut self) {
        self.value = None;
    }

    pub(in crate::nn) const fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: Option<&Tensor>) {
        self.grad = grad.cloned();
    }

    /// 梯度累加（同一节点被多个子节点使用时，各路梯度求和）
    pub(in crate::nn) fn accumulate_grad(&mut self, grad: &Tensor) {
        self.grad = Some(match self.grad.take() {
            Some(existing) => existing + grad,
            None => grad.clone(),
        });
    }

    pub(in crate::nn) fn clear_grad(&mut self) {
        self.grad = None;
    }

    pub(in crate::nn) const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::nn) fn set_last_forward_pass_id(&mut self, pass_id: u64) {
        self.last_forward_pass_id = pass_id;
    }

    /// 根据父节点的值计算并保存本节点的值
    pub(in crate::nn) fn calc_value_by_parents(
        &mut self,
        parents: &[&Tensor],
    ) -> Result<(), GraphError> {
        let value = self.raw_node.calc_value_by_parents(parents)?;
        self.value = Some(value);
        Ok(())
    }

    /// 计算本节点对第`index`个父节点的梯度（VJP）
    pub(in crate::nn) fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let value = self.value.as_ref().ok_or_else(|| {
            GraphError::ComputationError(format!("{self}没有值，请先执行forward"))
        })?;
        self.raw_node
            .calc_grad_to_parent(index, parents, value, upstream_grad)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "节点[id={}, name={}, type={}]",
            self.id,
            self.name,
            self.type_name()
        )
    }
}
