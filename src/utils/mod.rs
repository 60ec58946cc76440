//! # 常用接口模块
//!
//! 目前只有单元测试用到的断言宏

pub mod macro_for_unit_test;
