use crate::nn::{GraphError, Var};

/// 逐元素数学运算扩展 trait
pub trait VarMathOps {
    /// 逐元素求幂，`exponent`须与本 Var 同形或为标量（可以是可训练参数）
    fn pow(&self, exponent: &Var) -> Result<Var, GraphError>;

    /// 大于`max`的元素截为`max`，被截断处梯度为0
    fn clamp_max(&self, max: f32) -> Result<Var, GraphError>;
}

impl VarMathOps for Var {
    fn pow(&self, exponent: &Var) -> Result<Var, GraphError> {
        self.ensure_same_graph(exponent, "求幂")?;
        let id = self
            .graph()
            .borrow_mut()
            .new_power_node(self.node_id(), exponent.node_id(), None)?;
        Ok(self.wrap(id))
    }

    fn clamp_max(&self, max: f32) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_clamp_max_node(self.node_id(), max, None)?;
        Ok(self.wrap(id))
    }
}
