use crate::nn::{GraphError, Var};

/// 归约运算扩展 trait
pub trait VarReduceOps {
    /// 沿`axis`（支持负数下标）求和；`keep_dims`为true时保留长度为1的该维度
    fn sum_axis(&self, axis: isize, keep_dims: bool) -> Result<Var, GraphError>;

    /// 所有元素的最小值，结果形状为[1]
    fn min_all(&self) -> Result<Var, GraphError>;
}

impl VarReduceOps for Var {
    fn sum_axis(&self, axis: isize, keep_dims: bool) -> Result<Var, GraphError> {
        let id = self.graph().borrow_mut().new_sum_axis_node(
            self.node_id(),
            axis,
            keep_dims,
            None,
        )?;
        Ok(self.wrap(id))
    }

    fn min_all(&self) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_min_all_node(self.node_id(), None)?;
        Ok(self.wrap(id))
    }
}
