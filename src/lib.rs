//! # Lehmer Torch
//!
//! 带可学习指数`p`的全局Lehmer池化层（`GlobalLehmerPool`），
//! 以及承载它所需的最小张量与自动微分计算图。
//!
//! Lehmer均值`Σx^p / Σx^(p-1)`随`p`在最小值、算术平均与最大值之间连续变化，
//! 因此可以让网络自己学出“该怎样池化”。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
