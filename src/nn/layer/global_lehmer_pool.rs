/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 全局 Lehmer 池化层（指数 p 可学习）
 *
 * 沿某一轴求 Lehmer 均值：L_p(x) = Σx^p / Σx^(p-1)
 * - p = 1 时为算术平均
 * - p → +∞ 时趋于最大值，p → -∞ 时趋于最小值
 *
 * 为使幂运算在负数/零上有定义，先用全局最小值把输入平移到正数区间，
 * 求完均值再平移回来
 */

use crate::nn::{GraphError, Graph, Init, Module, Var, VarMathOps, VarReduceOps};
use crate::tensor::Tensor;

/// GlobalLehmerPool 的配置
///
/// # 使用示例
/// ```ignore
/// let config = GlobalLehmerPoolConfig::default()
///     .with_axis(-1)
///     .with_init(Init::Constant(2.0));
/// let pool = GlobalLehmerPool::with_config(&graph, config, "pool")?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalLehmerPoolConfig {
    /// 平移时额外留出的余量，保证平移后的最小值严格为正
    pub epsilon: f32,
    /// 归约轴，负数表示从末尾数起
    pub axis: isize,
    /// 是否保留被归约的轴（长度为1）
    pub keep_dims: bool,
    /// p 的初始化方式
    pub init: Init,
}

impl Default for GlobalLehmerPoolConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-4,
            axis: -2,
            keep_dims: false,
            init: Init::Normal {
                mean: 0.0,
                std: 0.05,
            },
        }
    }
}

impl GlobalLehmerPoolConfig {
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_keep_dims(mut self, keep_dims: bool) -> Self {
        self.keep_dims = keep_dims;
        self
    }

    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// 检查与输入形状无关的配置项；轴是否越界要等到 forward 时才知道
    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(GraphError::InvalidOperation(format!(
                "GlobalLehmerPool的epsilon须为有限的非负数，但收到{}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// 全局 Lehmer 池化层
///
/// # 输入/输出形状
/// - 输入：任意维度，如 [batch, time, channels]
/// - 输出：去掉归约轴，如 [batch, channels]（`keep_dims` 时为 [batch, 1, channels]）
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new_with_seed(42);
/// let pool = GlobalLehmerPool::new(&graph, "pool")?;
/// let x = graph.input(&Tensor::normal(0.0, 1.0, &[8, 16, 4]))?;
/// let y = pool.forward(&x)?; // [8, 4]
/// ```
#[derive(Debug)]
pub struct GlobalLehmerPool {
    /// 可学习指数，形状[1]
    p: Var,
    config: GlobalLehmerPoolConfig,
    name: String,
}

impl GlobalLehmerPool {
    /// 以默认配置创建
    pub fn new(graph: &Graph, name: &str) -> Result<Self, GraphError> {
        Self::with_config(graph, GlobalLehmerPoolConfig::default(), name)
    }

    /// 以指定配置创建
    ///
    /// # 参数
    /// - `graph`: 计算图句柄
    /// - `config`: 层配置
    /// - `name`: 层名称前缀，参数节点命名为`{name}_p`
    pub fn with_config(
        graph: &Graph,
        config: GlobalLehmerPoolConfig,
        name: &str,
    ) -> Result<Self, GraphError> {
        config.validate()?;
        let p = graph.parameter(&[1], config.init.clone(), &format!("{name}_p"))?;
        Ok(Self {
            p,
            config,
            name: name.to_string(),
        })
    }

    /// 前向传播
    ///
    /// 1. shift = min(min_all(x) - epsilon, 0)
    /// 2. shifted = x - shift
    /// 3. output = Σ shifted^p / Σ shifted^(p-1) + shift（沿归约轴求和）
    ///
    /// 平移后仍有元素恰为0（只在epsilon为0时可能）且 p < 1 时，
    /// 结果为 NaN/Inf，不做拦截
    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let input_shape = x.value_expected_shape()?;
        let axis = Tensor::normalize_axis(self.config.axis, input_shape.len()).map_err(|_| {
            GraphError::DimensionMismatch {
                expected: input_shape.len(),
                got: self.config.axis.unsigned_abs(),
                message: format!(
                    "{}的归约轴{}超出了{}维输入{:?}的范围",
                    self.name,
                    self.config.axis,
                    input_shape.len(),
                    input_shape
                ),
            }
        })? as isize;

        // 平移量由全局最小值决定，且永不为正
        let candidate = x.min_all()?.sub_scalar(self.config.epsilon)?;
        let shift = candidate.clamp_max(0.0)?;
        let shifted = x.try_sub(&shift)?;

        let p_minus_one = self.p.sub_scalar(1.0)?;
        let numerator = shifted.pow(&self.p)?.sum_axis(axis, self.config.keep_dims)?;
        let denominator = shifted
            .pow(&p_minus_one)?
            .sum_axis(axis, self.config.keep_dims)?;
        let output = numerator.try_div(&denominator)?.try_add(&shift)?;

        log::debug!(
            "{}: {:?} -> {:?}",
            self.name,
            input_shape,
            output.value_expected_shape()?
        );
        Ok(output)
    }

    /// 可学习指数 p
    pub const fn p(&self) -> &Var {
        &self.p
    }

    pub const fn epsilon(&self) -> f32 {
        self.config.epsilon
    }

    pub const fn axis(&self) -> isize {
        self.config.axis
    }

    pub const fn config(&self) -> &GlobalLehmerPoolConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Module for GlobalLehmerPool {
    fn parameters(&self) -> Vec<Var> {
        vec![self.p.clone()]
    }
}
