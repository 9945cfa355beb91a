//! 生命周期钩子调用
//!
//! 两轮调用：先对所有实例按依赖优先顺序调用 `on_init`，
//! 全部完成后再按同样顺序调用 `on_context`。没有钩子的实例直接跳过。

use crate::engine::CreatedInstance;
use di_abstractions::{ContextStats, DependencyGraph};
use infrastructure_common::{DependencyError, DependencyResult, CONTEXT_HOOK, INIT_HOOK};
use tracing::debug;

/// 生命周期调用器
pub(crate) struct LifecycleInvoker<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> LifecycleInvoker<'g> {
    pub(crate) fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// 对本轮创建的实例调用两轮钩子
    ///
    /// 顺序由依赖图从 `roots` 出发的后序遍历决定；同一个键的多个实例（原型）按创建顺序排列。
    pub(crate) fn invoke<'a, I>(
        &self,
        roots: I,
        created: &'a [CreatedInstance],
        stats: &mut ContextStats,
    ) -> DependencyResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let roots: Vec<&str> = roots
            .into_iter()
            .chain(created.iter().map(|entry| entry.key.as_str()))
            .collect();
        let order = self.graph.dependency_first_order(roots);

        let ordered: Vec<&CreatedInstance> = order
            .iter()
            .flat_map(|key| created.iter().filter(move |entry| entry.key == *key))
            .collect();

        for entry in &ordered {
            if call_hook(entry, INIT_HOOK)? {
                stats.init_hooks_invoked += 1;
            }
        }
        for entry in &ordered {
            if call_hook(entry, CONTEXT_HOOK)? {
                stats.context_hooks_invoked += 1;
            }
        }

        Ok(())
    }
}

/// 调用钩子，返回是否存在该钩子
fn call_hook(entry: &CreatedInstance, hook: &'static str) -> DependencyResult<bool> {
    // 先取出方法再调用，钩子执行期间不持有对象锁
    let Some(method) = entry.instance.method(hook) else {
        return Ok(false);
    };

    debug!("调用 Bean {} 的 {} 钩子", entry.key, hook);
    method(&entry.instance).map_err(|source| DependencyError::LifecycleFailed {
        bean: entry.key.clone(),
        hook,
        source,
    })?;
    Ok(true)
}
