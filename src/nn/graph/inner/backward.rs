/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : GraphInner 反向传播（VJP 模式）
 */

use super::GraphInner;
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;
use std::collections::HashSet;

impl GraphInner {
    /// 反向传播：计算损失对所有参与计算的可训练参数的梯度
    ///
    /// # 语义
    /// - 损失节点须为标量（只含1个元素），且已执行过 forward
    /// - 参数节点的梯度在多次 backward 间累积，需由调用者（如优化器）清零（PyTorch 惯例）
    /// - 结束后释放中间节点的值与梯度
    ///
    /// # 返回
    /// 损失的标量值
    pub fn backward(&mut self, loss: NodeId) -> Result<f32, GraphError> {
        self.backward_ex(loss, false)
    }

    /// 反向传播（扩展版本，支持 `retain_graph`）
    ///
    /// `retain_graph` 为 true 时保留中间节点的值，便于反向传播后继续读取，或对同一图多次 backward
    pub fn backward_ex(&mut self, loss: NodeId, retain_graph: bool) -> Result<f32, GraphError> {
        // 1. 获取 loss 值
        let loss_node = self.get_node(loss)?;
        let loss_value = loss_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("损失节点 {loss_node} 没有值，请先执行 forward"))
        })?;
        let loss_scalar = loss_value.get_data_number().ok_or_else(|| {
            GraphError::InvalidOperation(format!(
                "反向传播要求损失为标量，但得到形状 {:?}",
                loss_value.shape()
            ))
        })?;

        // 2. 逐节点传播梯度
        self.backward_vjp_core(loss)?;

        // 3. 如果 retain_graph=false，释放中间结果（PyTorch 默认行为）
        if !retain_graph {
            self.release_intermediate_results();
        }

        // 4. 返回 loss 值
        Ok(loss_scalar)
    }

    /// 清零所有节点的梯度
    pub fn zero_grad(&mut self) -> Result<(), GraphError> {
        for node in self.nodes.values_mut() {
            node.clear_grad();
        }
        Ok(())
    }

    fn backward_vjp_core(&mut self, loss_id: NodeId) -> Result<(), GraphError> {
        // 1. 重置中间节点的 grad（只有参数节点的梯度累积）
        self.reset_intermediate_grad();

        // 2. 损失节点的梯度为全1
        let loss_shape = self.get_node(loss_id)?.value_expected_shape().to_vec();
        self.get_node_mut(loss_id)?
            .set_grad(Some(&Tensor::ones(&loss_shape)));

        // 3. 获取拓扑排序（从损失到输入）
        let topo_order = self.topological_sort_backward(loss_id)?;
        let trainable_count = topo_order
            .iter()
            .filter(|id| self.nodes.get(id).is_some_and(|node| node.is_trainable()))
            .count();
        if trainable_count == 0 {
            log::warn!("损失节点{loss_id}不依赖任何可训练参数，反向传播不会产生参数梯度");
        }
        log::debug!(
            "反向传播：损失节点{loss_id}，涉及{}个节点（其中{trainable_count}个参数）",
            topo_order.len()
        );

        // 4. 按拓扑顺序反向传播梯度
        for node_id in &topo_order {
            self.propagate_grad_to_parents(*node_id)?;
        }

        self.last_backward_pass_id += 1;
        Ok(())
    }

    /// 把某节点的梯度传播给它的每一个父节点（Input 父节点除外）
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let node = self.get_node(node_id)?;
        let Some(upstream_grad) = node.grad().cloned() else {
            return Ok(());
        };
        if node.is_leaf() {
            return Ok(());
        }

        let parents_ids = self.get_node_parents(node_id)?;
        let parent_values = self.collect_parent_values(node_id, &parents_ids)?;
        let parent_refs = parent_values.iter().collect::<Vec<&Tensor>>();

        for (index, parent_id) in parents_ids.iter().enumerate() {
            let parent = self.get_node(*parent_id)?;
            if parent.is_leaf() && !parent.is_trainable() {
                continue;
            }
            let grad = self
                .get_node(node_id)?
                .calc_grad_to_parent(index, &parent_refs, &upstream_grad)?;
            self.get_node_mut(*parent_id)?.accumulate_grad(&grad);
        }
        Ok(())
    }

    /// 从损失节点出发的逆拓扑序：每个节点都排在它所有子节点之后
    fn topological_sort_backward(&self, loss_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let mut visited = HashSet::new();
        let mut post_order = Vec::new();
        // 显式栈：(节点, 父节点是否都已展开)
        let mut stack = vec![(loss_id, false)];
        while let Some((node_id, expanded)) = stack.pop() {
            if expanded {
                post_order.push(node_id);
                continue;
            }
            if !visited.insert(node_id) {
                continue;
            }
            stack.push((node_id, true));
            for parent_id in self.get_node_parents(node_id)? {
                if !visited.contains(&parent_id) {
                    stack.push((parent_id, false));
                }
            }
        }
        post_order.reverse();
        Ok(post_order)
    }

    fn reset_intermediate_grad(&mut self) {
        for node in self.nodes.values_mut() {
            if !node.is_trainable() {
                node.clear_grad();
            }
        }
    }

    /// 释放中间节点的值和梯度以节省内存，保留 Input 和 Parameter 节点的数据
    fn release_intermediate_results(&mut self) {
        for node in self.nodes.values_mut() {
            if !node.is_leaf() {
                node.clear_value();
                node.clear_grad();
            }
        }
    }
}
