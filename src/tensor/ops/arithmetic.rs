/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 张量的加减乘除（逐元素）。两个张量须形状一致，或其中之一为标量（会被广播）；
 *                 与纯数（f32）运算时，纯数被广播到每个元素上。
 *                 注：除法不检查除数是否为零，按IEEE浮点语义得到Inf/NaN。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::Zip;
use std::ops::{Add, Div, Mul, Sub};

impl Tensor {
    /// 逐元素地对两个张量做二元运算，支持标量广播，形状不兼容时panic
    pub(crate) fn zip_with<F>(&self, other: &Self, operator: Operator, f: F) -> Self
    where
        F: Fn(f32, f32) -> f32,
    {
        match self.try_zip_with(other, operator, f) {
            Ok(tensor) => tensor,
            Err(e) => panic!("{}", e),
        }
    }

    pub(crate) fn try_zip_with<F>(
        &self,
        other: &Self,
        operator: Operator,
        f: F,
    ) -> Result<Self, TensorError>
    where
        F: Fn(f32, f32) -> f32,
    {
        let data = if self.is_same_shape(other) {
            Zip::from(&self.data)
                .and(&other.data)
                .map_collect(|&a, &b| f(a, b))
        } else if let Some(b) = other.get_data_number() {
            self.data.mapv(|a| f(a, b))
        } else if let Some(a) = self.get_data_number() {
            other.data.mapv(|b| f(a, b))
        } else {
            return Err(TensorError::OperatorError {
                operator,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            });
        };
        Ok(Self { data })
    }
}

// 为(不)带引用的张量与(不)带引用的张量、张量与f32、f32与张量之间生成运算符重载
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $operator:expr, $f:expr) => {
        impl<'a, 'b> $trait<&'b Tensor> for &'a Tensor {
            type Output = Tensor;

            fn $method(self, other: &'b Tensor) -> Tensor {
                self.zip_with(other, $operator, $f)
            }
        }
        impl<'a> $trait<&'a Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, other: &'a Tensor) -> Tensor {
                (&self).$method(other)
            }
        }
        impl<'a> $trait<Tensor> for &'a Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                self.$method(&other)
            }
        }
        impl $trait for Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                (&self).$method(&other)
            }
        }

        impl<'a> $trait<f32> for &'a Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                let f = $f;
                Tensor {
                    data: self.data.mapv(|a| f(a, scalar)),
                }
            }
        }
        impl $trait<f32> for Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                (&self).$method(scalar)
            }
        }

        impl<'a> $trait<&'a Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: &'a Tensor) -> Tensor {
                let f = $f;
                Tensor {
                    data: tensor.data.mapv(|b| f(self, b)),
                }
            }
        }
        impl $trait<Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: Tensor) -> Tensor {
                self.$method(&tensor)
            }
        }
    };
}

impl_binary_op!(Add, add, Operator::Add, |a: f32, b: f32| a + b);
impl_binary_op!(Sub, sub, Operator::Sub, |a: f32, b: f32| a - b);
impl_binary_op!(Mul, mul, Operator::Mul, |a: f32, b: f32| a * b);
impl_binary_op!(Div, div, Operator::Div, |a: f32, b: f32| a / b);

impl From<f32> for Tensor {
    /// 将`f32`类型转换为形状为`[1]`的张量
    fn from(scalar: f32) -> Self {
        Self::new(&[scalar], &[1])
    }
}
