//! # Infrastructure Common
//!
//! 这个 crate 提供了 Bean 容器各层共享的基础类型。
//!
//! ## 核心内容
//!
//! - [`DependencyError`] - 依赖解析与实例化错误
//! - [`Strategy`] / [`BeanKind`] - Bean 的构造策略
//! - [`NodeState`] - Bean 节点的解析状态机
//! - [`ContainerOptions`] - 容器选项
//! - [`SourceLocation`] - 注入点的诊断位置
//!
//! ## 设计原则
//!
//! - 单线程、单次引导的同步构建流程
//! - 配置错误在引导期间立即失败，不做部分容器回退

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
