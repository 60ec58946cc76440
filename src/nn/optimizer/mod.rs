/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 优化器 - PyTorch 风格
 *
 * - 优化器持有 Rc<RefCell<GraphInner>> 引用，zero_grad()/step() 不需要图参数
 * - 只更新构造时绑定的参数
 * - minimize(&loss) 一步完成 zero_grad + backward + step
 */

mod adam;
mod sgd;

pub use adam::Adam;
pub use sgd::SGD;

use crate::nn::graph::GraphInner;
use crate::nn::{GraphError, NodeId, Var};
use crate::tensor::Tensor;

/// 优化器 trait
///
/// # 使用示例
/// ```ignore
/// let mut optimizer = Adam::new(&graph, &pool.parameters(), 0.01);
///
/// optimizer.zero_grad()?;
/// let loss = pool.forward(&x)?.mse_loss(&y)?;
/// loss.backward()?;
/// optimizer.step()?;
///
/// // 或者一步完成
/// let loss_val = optimizer.minimize(&loss)?;
/// ```
pub trait Optimizer {
    /// 清零所有绑定参数的梯度
    fn zero_grad(&mut self) -> Result<(), GraphError>;

    /// 按当前梯度更新绑定的参数；没有梯度的参数保持不变
    fn step(&mut self) -> Result<(), GraphError>;

    /// 一步完成：zero_grad + backward + step，返回 loss 的标量值
    fn minimize(&mut self, loss: &Var) -> Result<f32, GraphError> {
        self.zero_grad()?;
        let loss_val = loss.backward()?;
        self.step()?;
        Ok(loss_val)
    }

    fn learning_rate(&self) -> f32;

    fn set_learning_rate(&mut self, lr: f32);

    /// 重置累积状态（如 Adam 的动量）
    fn reset(&mut self);
}

/// 清零一组参数节点的梯度
fn clear_grads(graph: &mut GraphInner, params: &[NodeId]) -> Result<(), GraphError> {
    for &node_id in params {
        graph.clear_node_grad(node_id)?;
    }
    Ok(())
}

/// 取参数节点当前值（克隆）
fn param_value(graph: &GraphInner, node_id: NodeId) -> Result<Tensor, GraphError> {
    graph
        .get_node_value(node_id)?
        .cloned()
        .ok_or_else(|| GraphError::ComputationError(format!("参数节点{node_id}没有值")))
}
