//! Bean 生命周期管理

use serde::{Deserialize, Serialize};
use std::fmt;

/// "构造完成" 钩子的方法名
///
/// 所有硬边与软边都装配完成后，按依赖优先顺序调用。
pub const INIT_HOOK: &str = "on_init";

/// "上下文就绪" 钩子的方法名
///
/// 在所有 Bean 的 [`INIT_HOOK`] 都执行完毕后，再按同样顺序调用。
pub const CONTEXT_HOOK: &str = "on_context";

/// 工厂 Bean 的构造策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// 单例模式 - 引导期间立即创建，仅创建一次
    Singleton,
    /// 原型模式 - 每次查找都创建新实例
    Prototype,
    /// 延迟单例 - 首次查找或首次被构造参数依赖时创建，之后复用
    LazySingleton,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Singleton
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Prototype => f.write_str("prototype"),
            Self::LazySingleton => f.write_str("lazy-singleton"),
        }
    }
}

/// Bean 种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanKind {
    /// 直接提供的预构建值
    Raw,
    /// 由工厂按策略构造
    Factory(Strategy),
}

impl BeanKind {
    /// 是否在整个上下文内只保留一个实例
    pub fn is_shared(&self) -> bool {
        !matches!(self, Self::Factory(Strategy::Prototype))
    }
}

/// Bean 节点解析状态
///
/// `Pending → Constructing → Constructed`。处于 `Constructing` 的节点被再次请求时，
/// 若实例已存在则返回该（可能尚未装配完的）实例。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// 尚未构造
    Pending,
    /// 构造或属性装配进行中
    Constructing,
    /// 构造与装配都已完成
    Constructed,
}

impl Default for NodeState {
    fn default() -> Self {
        Self::Pending
    }
}
