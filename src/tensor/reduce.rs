/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 张量的归约运算（求和、最值、均值）
 */

use super::Tensor;
use crate::errors::TensorError;
use ndarray::Axis;

impl Tensor {
    /// 对张量中的所有元素求和并返回一个形状为[1]的标量。
    pub fn sum(&self) -> Self {
        Self::from(self.data.sum())
    }

    /// 沿`axis`（支持负数下标）求和。
    /// `keep_dims`为true时被归约的维度保留为1，否则该维度被移除
    pub fn sum_axis(&self, axis: isize, keep_dims: bool) -> Result<Self, TensorError> {
        let axis = Self::normalize_axis(axis, self.dimension())?;
        let summed = self.data.sum_axis(Axis(axis));
        let data = if keep_dims {
            summed.insert_axis(Axis(axis))
        } else {
            summed
        };
        Ok(Self::from_array(data))
    }

    /// 全部元素的最小值；只要含NaN，结果即为NaN
    pub fn min_value(&self) -> Result<f32, TensorError> {
        self.fold_nan_aware(f32::INFINITY, f32::min)
    }

    /// 全部元素的最大值；只要含NaN，结果即为NaN
    pub fn max_value(&self) -> Result<f32, TensorError> {
        self.fold_nan_aware(f32::NEG_INFINITY, f32::max)
    }

    fn fold_nan_aware(&self, init: f32, f: fn(f32, f32) -> f32) -> Result<f32, TensorError> {
        if self.size() == 0 {
            return Err(TensorError::EmptyTensor);
        }
        Ok(self.data.iter().copied().fold(init, |acc, x| {
            if acc.is_nan() || x.is_nan() {
                f32::NAN
            } else {
                f(acc, x)
            }
        }))
    }

    pub fn mean(&self) -> Result<f32, TensorError> {
        if self.size() == 0 {
            return Err(TensorError::EmptyTensor);
        }
        Ok(self.data.sum() / self.size() as f32)
    }
}
