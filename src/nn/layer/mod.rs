/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : Layer 模块 - 由基础节点组合而成的网络层
 *
 * Layer 不是新的抽象层：它只持有参数 Var，forward 时往图里追加基础节点，
 * 反向传播完全交给计算图
 */

mod global_lehmer_pool;

pub use global_lehmer_pool::{GlobalLehmerPool, GlobalLehmerPoolConfig};
