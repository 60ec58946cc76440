/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : Smart Var - 智能变量句柄，支持算子重载和链式调用
 */

use super::graph::GraphInner;
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::ops::{Add, Div, Mul, Sub};
use std::rc::Rc;

// ==================== Init 枚举 ====================

/// 参数初始化策略
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// 正态分布（图带种子时使用图的 RNG）
    Normal { mean: f32, std: f32 },
}

impl Init {
    /// 生成初始化后的 Tensor（使用全局 RNG）
    pub fn generate(&self, shape: &[usize]) -> Tensor {
        match self {
            Self::Constant(v) => &Tensor::ones(shape) * *v,
            Self::Zeros => Tensor::zeros(shape),
            Self::Ones => Tensor::ones(shape),
            Self::Normal { mean, std } => Tensor::normal(*mean, *std, shape),
        }
    }

    /// 生成初始化后的 Tensor（使用指定的 RNG）
    pub fn generate_with_rng(&self, shape: &[usize], rng: &mut rand::rngs::StdRng) -> Tensor {
        match self {
            Self::Normal { mean, std } => Tensor::normal_with_rng(*mean, *std, shape, rng),
            _ => self.generate(shape),
        }
    }
}

// ==================== Var 结构 ====================

/// 智能变量句柄 - 携带图引用，支持算子重载和链式调用
///
/// # 设计原则
/// - 持有 `Rc<RefCell<GraphInner>>` 引用，实现算子重载
/// - Clone 语义（非 Copy），但开销极低（Rc clone）
/// - 创建运算只是往图里追加节点，真正的数值在 `forward()` 时才计算
#[derive(Clone)]
pub struct Var {
    /// 节点 ID
    id: NodeId,
    /// 图引用（用户不可见）
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    /// 创建新的 Var（内部使用）
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    /// 获取节点 ID
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// 获取内部图引用（供 trait 和内部模块使用）
    pub(crate) const fn graph(&self) -> &Rc<RefCell<GraphInner>> {
        &self.graph
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph handle
    pub fn get_graph(&self) -> super::graph::Graph {
        super::graph::Graph::from_rc(Rc::clone(&self.graph))
    }

    /// 获取节点的预期输出形状（节点创建时就已确定）
    pub fn value_expected_shape(&self) -> Result<Vec<usize>, GraphError> {
        Ok(self
            .graph
            .borrow()
            .get_node_value_expected_shape(self.id)?
            .to_vec())
    }

    /// 以同一张图包装新节点
    pub(crate) fn wrap(&self, id: NodeId) -> Self {
        Self::new(id, Rc::clone(&self.graph))
    }

    pub(crate) fn ensure_same_graph(&self, other: &Self, op: &str) -> Result<(), GraphError> {
        if self.same_graph(other) {
            Ok(())
        } else {
            Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{op}"
            )))
        }
    }

    // ==================== 执行 ====================

    /// 前向传播
    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 反向传播（ensure-forward 语义）
    ///
    /// 先执行 forward() 确保 loss 值已计算，然后执行反向传播。
    /// 返回 loss 的标量值
    pub fn backward(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.backward(self.id)
    }

    /// 同`backward`，但保留中间节点的值
    pub fn backward_retain_graph(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.backward_ex(self.id, true)
    }

    // ==================== 值访问和设置 ====================

    /// 获取节点的值（克隆的 Tensor）
    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    /// 设置节点的值（仅输入/参数节点）
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, Some(value))
    }

    /// 获取标量值
    pub fn item(&self) -> Result<f32, GraphError> {
        let val = self.value()?.ok_or_else(|| {
            GraphError::ComputationError(format!("节点{}没有值，请先执行forward", self.id))
        })?;
        val.get_data_number()
            .ok_or_else(|| GraphError::InvalidOperation("Tensor 不是标量".to_string()))
    }

    /// 获取节点的梯度
    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        self.graph.borrow().get_node_grad(self.id)
    }

    // ==================== 安全版本（返回 Result）====================

    /// 安全的加法，支持标量广播
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.ensure_same_graph(other, "加法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_add_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }

    /// 安全的减法，支持标量广播
    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.ensure_same_graph(other, "减法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_subtract_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }

    /// 安全的元素级乘法，支持标量广播
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.ensure_same_graph(other, "乘法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_multiply_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }

    /// 安全的元素级除法，支持标量广播
    pub fn try_div(&self, other: &Self) -> Result<Self, GraphError> {
        self.ensure_same_graph(other, "除法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_divide_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }

    /// 创建与本 Var 同图的标量常量节点
    pub(crate) fn scalar_constant(&self, value: f32) -> Result<Self, GraphError> {
        let mut g = self.graph.borrow_mut();
        let id = g.new_input_node(&[1], None)?;
        g.set_node_value(id, Some(&Tensor::from(value)))?;
        Ok(self.wrap(id))
    }

    /// 加上一个纯数
    pub fn add_scalar(&self, value: f32) -> Result<Self, GraphError> {
        let constant = self.scalar_constant(value)?;
        self.try_add(&constant)
    }

    /// 减去一个纯数
    pub fn sub_scalar(&self, value: f32) -> Result<Self, GraphError> {
        let constant = self.scalar_constant(value)?;
        self.try_sub(&constant)
    }
}

// ==================== 算子重载（&Var op &Var）====================
// 形状不兼容或来自不同图时 panic，需要错误处理时请使用 try_* 版本

impl<'a, 'b> Add<&'b Var> for &'a Var {
    type Output = Var;

    fn add(self, other: &'b Var) -> Var {
        match self.try_add(other) {
            Ok(var) => var,
            Err(e) => panic!("Var 加法失败：{e}"),
        }
    }
}

impl<'a, 'b> Sub<&'b Var> for &'a Var {
    type Output = Var;

    fn sub(self, other: &'b Var) -> Var {
        match self.try_sub(other) {
            Ok(var) => var,
            Err(e) => panic!("Var 减法失败：{e}"),
        }
    }
}

impl<'a, 'b> Mul<&'b Var> for &'a Var {
    type Output = Var;

    fn mul(self, other: &'b Var) -> Var {
        match self.try_mul(other) {
            Ok(var) => var,
            Err(e) => panic!("Var 乘法失败：{e}"),
        }
    }
}

impl<'a, 'b> Div<&'b Var> for &'a Var {
    type Output = Var;

    fn div(self, other: &'b Var) -> Var {
        match self.try_div(other) {
            Ok(var) => var,
            Err(e) => panic!("Var 除法失败：{e}"),
        }
    }
}
