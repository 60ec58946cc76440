/*
 * @Author       : 老董
 * @Description  : Module trait 测试：由多个层组合出的模块
 */

use crate::nn::{GlobalLehmerPool, GlobalLehmerPoolConfig, Graph, GraphError, Module, Var};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

/// 先沿时间轴、再沿通道轴池化
struct TwoStagePool {
    time_pool: GlobalLehmerPool,
    channel_pool: GlobalLehmerPool,
}

impl TwoStagePool {
    fn new(graph: &Graph) -> Result<Self, GraphError> {
        Ok(Self {
            time_pool: GlobalLehmerPool::new(graph, "time")?,
            channel_pool: GlobalLehmerPool::with_config(
                graph,
                GlobalLehmerPoolConfig::default().with_axis(-1),
                "channel",
            )?,
        })
    }

    fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let pooled = self.time_pool.forward(x)?;
        self.channel_pool.forward(&pooled)
    }
}

impl Module for TwoStagePool {
    fn parameters(&self) -> Vec<Var> {
        [self.time_pool.parameters(), self.channel_pool.parameters()].concat()
    }
}

#[test]
fn test_composed_module() {
    let graph = Graph::new_with_seed(1);
    let model = TwoStagePool::new(&graph).unwrap();
    assert_eq!(model.num_params(), 2);
    assert_eq!(graph.parameters().len(), 2);

    // [2, 4, 3] -> [2, 3] -> [2]
    let x = graph.input(&Tensor::ones(&[2, 4, 3])).unwrap();
    let y = model.forward(&x).unwrap();
    assert_eq!(y.value_expected_shape().unwrap(), vec![2]);

    y.forward().unwrap();
    for v in y.value().unwrap().unwrap().to_vec() {
        assert_abs_diff_eq!(v, 1., epsilon = 1e-4);
    }
}
