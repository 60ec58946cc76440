/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : Module trait 定义
 */

use super::Var;

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（签名各异）
/// - `new()` **不是** trait 方法（参数各异）
/// - `parameters()` 返回 `Vec<Var>`（签名一致，放入 trait）
/// - 由于 Var 携带图引用，`forward()` 不需要 `&Graph` 参数
///
/// # 使用示例
///
/// ```ignore
/// use lehmer_torch::nn::{GlobalLehmerPool, Graph, Module, Var};
///
/// struct Encoder {
///     pool: GlobalLehmerPool,
/// }
///
/// impl Module for Encoder {
///     fn parameters(&self) -> Vec<Var> {
///         self.pool.parameters()
///     }
/// }
/// ```
pub trait Module {
    /// 获取所有可训练参数
    ///
    /// 优化器据此知道要更新哪些参数
    fn parameters(&self) -> Vec<Var>;

    /// 获取参数数量
    fn num_params(&self) -> usize {
        self.parameters().len()
    }
}
