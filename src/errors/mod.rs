/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 张量层面的错误类型
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致且两个张量没有一个是标量，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("数据长度{data_len}与形状{shape:?}所需的元素个数不一致")]
    DataShapeMismatch { data_len: usize, shape: Vec<usize> },
    #[error("维度{axis}超出范围：张量只有{ndim}个维度")]
    AxisOutOfRange { axis: isize, ndim: usize },
    #[error("无法将形状{from:?}广播到{to:?}")]
    BroadcastError { from: Vec<usize>, to: Vec<usize> },
    #[error("张量为空（不含任何元素）")]
    EmptyTensor,
}
