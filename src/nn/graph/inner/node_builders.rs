/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : GraphInner 节点构建方法（new_*_node）
 */

use super::GraphInner;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::NodeType;
use crate::nn::nodes::raw_node::{
    Add, ClampMax, Divide, Input, MinAll, MseLoss, Multiply, Parameter, Power, Subtract, SumAxis,
};
use crate::nn::{GraphError, NodeId};

impl GraphInner {
    /// 添加节点到列表
    fn add_node_to_list(
        &mut self,
        raw_node: NodeType,
        name: Option<&str>,
        node_type: &str,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_id = self.generate_valid_node_id();
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), node_type)?;

        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        self.nodes
            .insert(node_id, NodeHandle::new(node_id, &node_name, raw_node));
        Ok(node_id)
    }

    fn generate_valid_node_id(&mut self) -> NodeId {
        // 生成唯一的节点ID
        self.next_id += 1;
        NodeId(self.next_id)
    }

    fn generate_valid_new_node_name(
        &self,
        base_name: &str,
        node_type: &str,
    ) -> Result<String, GraphError> {
        // 若用户提供了名称，检查重复
        if !base_name.is_empty() {
            if self.nodes.values().any(|node| node.name() == base_name) {
                return Err(GraphError::DuplicateNodeName(format!(
                    "节点{}在图{}中重复",
                    base_name,
                    self.name()
                )));
            }
            return Ok(base_name.to_string());
        }

        // 否则生成形如“add_3”的名称
        let mut counter = 1;
        loop {
            let name = format!("{node_type}_{counter}");
            if !self.nodes.values().any(|node| node.name() == name) {
                return Ok(name);
            }
            counter += 1;
        }
    }

    /// 父节点的预期形状（节点创建时用于推断本节点形状）
    fn parent_shape(&self, id: NodeId) -> Result<Vec<usize>, GraphError> {
        Ok(self.get_node_value_expected_shape(id)?.to_vec())
    }

    pub fn new_input_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Input::new(shape);
        self.add_node_to_list(node.into(), name, "input", &[])
    }

    /// 创建参数节点（值为空，需随后设置初始值）
    pub fn new_parameter_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Parameter::new(shape)?;
        self.add_node_to_list(node.into(), name, "parameter", &[])
    }

    pub fn new_add_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Add::new(&self.parent_shape(left)?, &self.parent_shape(right)?)?;
        self.add_node_to_list(node.into(), name, "add", &[left, right])
    }

    pub fn new_subtract_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Subtract::new(&self.parent_shape(left)?, &self.parent_shape(right)?)?;
        self.add_node_to_list(node.into(), name, "subtract", &[left, right])
    }

    pub fn new_multiply_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Multiply::new(&self.parent_shape(left)?, &self.parent_shape(right)?)?;
        self.add_node_to_list(node.into(), name, "multiply", &[left, right])
    }

    pub fn new_divide_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Divide::new(&self.parent_shape(left)?, &self.parent_shape(right)?)?;
        self.add_node_to_list(node.into(), name, "divide", &[left, right])
    }

    pub fn new_power_node(
        &mut self,
        base: NodeId,
        exponent: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Power::new(&self.parent_shape(base)?, &self.parent_shape(exponent)?)?;
        self.add_node_to_list(node.into(), name, "power", &[base, exponent])
    }

    pub fn new_sum_axis_node(
        &mut self,
        input: NodeId,
        axis: isize,
        keep_dims: bool,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = SumAxis::new(&self.parent_shape(input)?, axis, keep_dims)?;
        self.add_node_to_list(node.into(), name, "sum_axis", &[input])
    }

    pub fn new_min_all_node(
        &mut self,
        input: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = MinAll::new(&self.parent_shape(input)?)?;
        self.add_node_to_list(node.into(), name, "min_all", &[input])
    }

    pub fn new_clamp_max_node(
        &mut self,
        input: NodeId,
        max: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = ClampMax::new(&self.parent_shape(input)?, max);
        self.add_node_to_list(node.into(), name, "clamp_max", &[input])
    }

    pub fn new_mse_loss_node(
        &mut self,
        input: NodeId,
        target: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = MseLoss::new(&self.parent_shape(input)?, &self.parent_shape(target)?)?;
        self.add_node_to_list(node.into(), name, "mse_loss", &[input, target])
    }
}
