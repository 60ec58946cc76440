/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : Var 扩展 trait 模块
 *
 * 按功能领域组织 Var 的扩展方法，用户按需 import。
 *
 * # 模块结构
 * - `math`: 逐元素数学运算（pow, clamp_max）
 * - `reduce`: 归约（sum_axis, min_all）
 * - `loss`: 损失函数（mse_loss）
 *
 * # 使用示例
 * ```ignore
 * use lehmer_torch::nn::{VarLossOps, VarMathOps, VarReduceOps};
 *
 * let numerator = x.pow(&p)?.sum_axis(-2, false)?;
 * let shift = x.min_all()?.clamp_max(0.0)?;
 * let loss = output.mse_loss(&target)?;
 * ```
 */

mod loss;
mod math;
mod reduce;

pub use loss::VarLossOps;
pub use math::VarMathOps;
pub use reduce::VarReduceOps;
