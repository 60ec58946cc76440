/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 与形状/维度相关的张量操作
 */

use super::Tensor;
use crate::errors::TensorError;
use ndarray::{Axis, IxDyn};

impl Tensor {
    /// 将可能为负的维度下标（-1表示最后一维）转换为`[0, ndim)`内的下标
    pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize, TensorError> {
        let ndim_isize = ndim as isize;
        let normalized = if axis < 0 { axis + ndim_isize } else { axis };
        if normalized < 0 || normalized >= ndim_isize {
            return Err(TensorError::AxisOutOfRange { axis, ndim });
        }
        Ok(normalized as usize)
    }

    pub fn reshape(&self, shape: &[usize]) -> Result<Self, TensorError> {
        Self::try_new(&self.to_vec(), shape)
    }

    /// 在`axis`处插入一个长度为1的维度
    pub fn insert_axis(&self, axis: usize) -> Result<Self, TensorError> {
        if axis > self.dimension() {
            return Err(TensorError::AxisOutOfRange {
                axis: axis as isize,
                ndim: self.dimension(),
            });
        }
        Ok(Self::from_array(self.data.clone().insert_axis(Axis(axis))))
    }

    /// 按numpy广播规则把张量扩展到`shape`
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self, TensorError> {
        let view = self
            .data
            .broadcast(IxDyn(shape))
            .ok_or_else(|| TensorError::BroadcastError {
                from: self.shape().to_vec(),
                to: shape.to_vec(),
            })?;
        Ok(Self::from_array(view.to_owned()))
    }
}
