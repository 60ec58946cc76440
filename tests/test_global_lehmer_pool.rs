/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : GlobalLehmerPool 端到端测试：用梯度下降从数据中学回指数 p
 *                 数据：[2, 5, 3] 的序列特征（含负数），目标为 p=3 时的池化结果
 */
use lehmer_torch::nn::{
    Adam, GlobalLehmerPool, GlobalLehmerPoolConfig, Graph, GraphError, Init, Module, Optimizer,
    VarLossOps,
};
use lehmer_torch::tensor::Tensor;

const TRUE_P: f32 = 3.0;

fn get_features() -> Tensor {
    let data = (0..30)
        .map(|i| ((i * 7 % 11) as f32 - 3.0) * 0.4)
        .collect::<Vec<_>>();
    Tensor::new(&data, &[2, 5, 3])
}

/// 用固定的 p 池化，作为训练目标
fn get_target(features: &Tensor) -> Result<Tensor, GraphError> {
    let graph = Graph::new();
    let config = GlobalLehmerPoolConfig::default().with_init(Init::Constant(TRUE_P));
    let pool = GlobalLehmerPool::with_config(&graph, config, "reference_pool")?;
    let x = graph.input(features)?;
    let y = pool.forward(&x)?;
    y.forward()?;
    y.value()?
        .ok_or_else(|| GraphError::ComputationError("目标没有值".to_string()))
}

#[test]
fn test_learn_lehmer_exponent() -> Result<(), GraphError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let start_time = std::time::Instant::now();

    let features = get_features();
    let target_value = get_target(&features)?;
    assert_eq!(target_value.shape(), &[2, 3]);

    // ========== 网络结构 ==========
    let graph = Graph::new_with_seed(42);
    let config = GlobalLehmerPoolConfig::default().with_init(Init::Constant(1.0));
    let pool = GlobalLehmerPool::with_config(&graph, config, "pool")?;
    let x = graph.input_named(&features, "x")?;
    let target = graph.input_named(&target_value, "target")?;
    let loss = pool.forward(&x)?.mse_loss(&target)?;

    // ========== 训练 ==========
    let mut optimizer = Adam::new(&graph, &pool.parameters(), 0.05);
    let first_loss = optimizer.minimize(&loss)?;
    let mut last_loss = first_loss;
    for epoch in 1..400 {
        last_loss = optimizer.minimize(&loss)?;
        if epoch % 100 == 0 {
            println!("epoch {epoch}: loss = {last_loss:.6}, p = {:.4}", pool.p().item()?);
        }
    }

    let learned_p = pool.p().item()?;
    println!(
        "学到的 p = {learned_p:.4}（真实值 {TRUE_P}），耗时 {:.2?}",
        start_time.elapsed()
    );
    assert!(last_loss < first_loss * 0.01);
    assert!((learned_p - TRUE_P).abs() < 0.2);
    Ok(())
}

#[test]
fn test_pool_forward_per_batch_keeps_p() -> Result<(), GraphError> {
    // 每个批次都重新 forward 建图（动态图用法），参数保持不变
    let graph = Graph::new_with_seed(7);
    let pool = GlobalLehmerPool::new(&graph, "pool")?;
    let p_before = pool.p().item()?;

    for batch in 0..3 {
        let x = graph.input(&Tensor::normal(batch as f32, 1.0, &[4, 6, 2]))?;
        let y = pool.forward(&x)?;
        assert_eq!(y.value_expected_shape()?, vec![4, 2]);
        y.forward()?;
    }
    assert_eq!(pool.p().item()?, p_before);
    assert_eq!(graph.parameters().len(), 1);
    Ok(())
}
