/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14 10:02:11
 * @Description  : 负责神经网络（neural network）的构建
 */

mod graph;
pub mod layer;
mod module;
mod nodes;
pub mod optimizer;
mod var;
mod var_ops;

pub use graph::{Graph, GraphError, GraphInner};
pub use layer::{GlobalLehmerPool, GlobalLehmerPoolConfig};
pub use module::Module;
pub use nodes::NodeId;
pub use optimizer::{Adam, Optimizer, SGD};
pub use var::{Init, Var};
pub use var_ops::{VarLossOps, VarMathOps, VarReduceOps};

#[cfg(test)]
mod tests;
