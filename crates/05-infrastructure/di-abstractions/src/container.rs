//! 容器统计信息

use serde::{Deserialize, Serialize};
use std::fmt;

/// 应用上下文统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextStats {
    /// 配置中的 Bean 数量
    pub registered_beans: usize,
    /// 已构造完成的共享 Bean 数量（原始值、单例、已触发的延迟单例）
    pub constructed_beans: usize,
    /// 累计创建的原型实例数量
    pub prototype_instances: usize,
    /// 已调用的 `on_init` 钩子数量
    pub init_hooks_invoked: usize,
    /// 已调用的 `on_context` 钩子数量
    pub context_hooks_invoked: usize,
}

impl fmt::Display for ContextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "beans: {}/{} constructed, prototypes: {}, hooks: {} init / {} context",
            self.constructed_beans,
            self.registered_beans,
            self.prototype_instances,
            self.init_hooks_invoked,
            self.context_hooks_invoked
        )
    }
}
