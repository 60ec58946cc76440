/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 逐元素幂节点
 *                 实现 C = A ^ P，P可以是与A同形的张量，也可以是（可训练的）标量
 */

use super::super::{
    TraitNode, elementwise_output_shape, invalid_parent_index, parent_value, reduce_grad_to_shape,
};
use crate::errors::Operator;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Power 节点：父节点依次为底数A与指数P
pub(in crate::nn) struct Power {
    shape: Vec<usize>,
    parents_shapes: [Vec<usize>; 2],
}

impl Power {
    pub(in crate::nn) fn new(base: &[usize], exponent: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: elementwise_output_shape("Power", base, exponent)?,
            parents_shapes: [base.to_vec(), exponent.to_vec()],
        })
    }
}

impl TraitNode for Power {
    fn type_name(&self) -> &'static str {
        "Power"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let base = parent_value(self.type_name(), parents, 0)?;
        let exponent = parent_value(self.type_name(), parents, 1)?;
        Ok(base.pow(exponent))
    }

    /// 对于 C = A ^ P：
    /// - ∂L/∂A = upstream_grad ⊙ P ⊙ A^(P-1)
    /// - ∂L/∂P = upstream_grad ⊙ C ⊙ ln(A)，其中 A ≤ 0 处 ln(A) 记为0
    ///
    /// A为0且P<1时∂L/∂A为Inf/NaN，原样传播
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let base = parent_value(self.type_name(), parents, 0)?;
        let exponent = parent_value(self.type_name(), parents, 1)?;
        match index {
            0 => {
                let local = base.zip_with(exponent, Operator::Pow, |a, p| p * a.powf(p - 1.0));
                reduce_grad_to_shape(upstream_grad * &local, &self.parents_shapes[0])
            }
            1 => {
                let log_base = base.map(|a| if a > 0.0 { a.ln() } else { 0.0 });
                reduce_grad_to_shape(
                    &(upstream_grad * value) * &log_base,
                    &self.parents_shapes[1],
                )
            }
            _ => Err(invalid_parent_index(self.type_name(), index)),
        }
    }
}
