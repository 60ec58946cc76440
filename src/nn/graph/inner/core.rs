/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : GraphInner 基础操作 + 前向传播
 */

use super::GraphInner;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

impl GraphInner {
    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    /// 创建带种子的图：参数初始化完全可复现
    pub fn new_with_seed(seed: u64) -> Self {
        let mut graph = Self::new();
        graph.set_seed(seed);
        graph
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: HashMap::new(),
            backward_edges: HashMap::new(),
            last_forward_pass_id: 0,
            last_backward_pass_id: 0,
            next_id: 0,
            rng: None,
        }
    }

    /// 重新设置图的随机种子（只影响之后创建的参数）
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Some(StdRng::seed_from_u64(seed));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::nn) fn rng_mut(&mut self) -> Option<&mut StdRng> {
        self.rng.as_mut()
    }

    pub const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub const fn last_backward_pass_id(&self) -> u64 {
        self.last_backward_pass_id
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// 所有节点 ID（按创建顺序）
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut ids = self.nodes.keys().copied().collect::<Vec<_>>();
        ids.sort();
        ids
    }

    /// 所有可训练（Parameter）节点 ID（按创建顺序）
    pub fn get_trainable_nodes(&self) -> Vec<NodeId> {
        let mut ids = self
            .nodes
            .values()
            .filter(|node| node.is_trainable())
            .map(NodeHandle::id)
            .collect::<Vec<_>>();
        ids.sort();
        ids
    }

    pub(in crate::nn) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    pub fn set_node_value(&mut self, id: NodeId, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_value(value)
    }

    /// 获取节点的梯度（克隆）。Input 节点没有梯度
    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<Tensor>, GraphError> {
        Ok(self.get_node(id)?.grad().cloned())
    }

    pub fn clear_node_grad(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(id)?.clear_grad();
        Ok(())
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.get_node(id)?;
        Ok(self.backward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_value_expected_shape(&self, id: NodeId) -> Result<&[usize], GraphError> {
        Ok(self.get_node(id)?.value_expected_shape())
    }

    pub fn is_node_trainable(&self, id: NodeId) -> Result<bool, GraphError> {
        Ok(self.get_node(id)?.is_trainable())
    }

    // 前向传播：
    pub fn forward(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        // 1. 叶子节点没有可计算的内容
        let node = self.get_node(node_id)?;
        if node.is_leaf() {
            if node.has_value() {
                return Ok(());
            }
            return Err(GraphError::InvalidOperation(format!(
                "{node}是输入/参数节点，其值应通过set_value设置，而不是通过父节点前向传播计算"
            )));
        }

        // 2. 为图本次的前向传播设置新id
        let new_graph_forward_pass_id = self.last_forward_pass_id + 1;

        // 3. 通过内部方法执行完整的前向传播
        self.forward_node_internal(node_id, new_graph_forward_pass_id)?;

        // 4. 只有成功后才更新图的前向传播ID
        self.last_forward_pass_id = new_graph_forward_pass_id;
        Ok(())
    }

    // 前向传播的内部实现
    fn forward_node_internal(
        &mut self,
        node_id: NodeId,
        new_graph_forward_pass_id: u64,
    ) -> Result<(), GraphError> {
        // 1. 叶子节点须已有值；其他节点若已在本代计算过则直接返回
        let node = self.get_node_mut(node_id)?;
        if node.is_leaf() {
            if node.has_value() {
                node.set_last_forward_pass_id(new_graph_forward_pass_id);
                return Ok(());
            }
            return Err(GraphError::InvalidOperation(format!(
                "{node}没有值，无法参与前向传播（须先通过set_value设置）"
            )));
        }
        if node.last_forward_pass_id() == new_graph_forward_pass_id {
            return Ok(());
        }

        // 2. 递归计算所有父节点
        let parents_ids = self.get_node_parents(node_id)?;
        for parent_id in &parents_ids {
            self.forward_node_internal(*parent_id, new_graph_forward_pass_id)?;
        }

        // 3. 收集父节点的值（克隆一份，避免计算当前节点时的借用冲突）
        let parent_values = self.collect_parent_values(node_id, &parents_ids)?;
        let parent_refs = parent_values.iter().collect::<Vec<&Tensor>>();

        // 4. 计算当前节点
        let node = self.get_node_mut(node_id)?;
        node.calc_value_by_parents(&parent_refs)?;
        log::trace!("前向传播：{node}，形状{:?}", node.value_expected_shape());

        // 5. 更新节点的前向传播次数为当前次数
        node.set_last_forward_pass_id(new_graph_forward_pass_id);
        Ok(())
    }

    pub(in crate::nn::graph) fn collect_parent_values(
        &self,
        node_id: NodeId,
        parents_ids: &[NodeId],
    ) -> Result<Vec<Tensor>, GraphError> {
        parents_ids
            .iter()
            .map(|id| {
                let parent = self.get_node(*id)?;
                parent.value().cloned().ok_or_else(|| {
                    GraphError::ComputationError(format!(
                        "节点{node_id}的父节点{parent}没有值"
                    ))
                })
            })
            .collect()
    }
}
