use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Neg;

impl Tensor {
    /// 对每个元素应用`f`，返回新张量
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }

    /// 每个元素求`exponent`次幂
    pub fn powf(&self, exponent: f32) -> Self {
        self.map(|x| x.powf(exponent))
    }

    /// 逐元素求幂，`exponent`须与本张量形状一致或为标量。
    /// 注：底数为负且指数非整数时结果为NaN，底数为0且指数为负时结果为Inf，均不做额外处理
    pub fn pow(&self, exponent: &Self) -> Self {
        self.zip_with(exponent, Operator::Pow, f32::powf)
    }

    /// 逐元素自然对数
    pub fn ln(&self) -> Self {
        self.map(f32::ln)
    }

    /// 逐元素将大于`max`的值截为`max`，NaN保持不变
    pub fn clamp_max(&self, max: f32) -> Self {
        self.map(|x| if x > max { max } else { x })
    }

    /// 逐元素判断是否满足`predicate`，满足为1.0，否则为0.0
    pub fn mask<F: Fn(f32) -> bool>(&self, predicate: F) -> Self {
        self.map(|x| if predicate(x) { 1.0 } else { 0.0 })
    }
}

impl Neg for Tensor {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

impl<'a> Neg for &'a Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self.map(|x| -x)
    }
}
