/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : Var 损失函数扩展 trait
 */

use crate::nn::{GraphError, Var};

/// 损失函数扩展 trait
///
/// # 使用示例
/// ```ignore
/// use lehmer_torch::nn::VarLossOps;
///
/// let loss = output.mse_loss(&target)?;
/// ```
pub trait VarLossOps {
    /// MSE Loss（均方误差），返回形状为[1, 1]的标量损失节点
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError>;
}

impl VarLossOps for Var {
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError> {
        self.ensure_same_graph(target, "求损失")?;
        let id = self
            .graph()
            .borrow_mut()
            .new_mse_loss_node(self.node_id(), target.node_id(), None)?;
        Ok(self.wrap(id))
    }
}
