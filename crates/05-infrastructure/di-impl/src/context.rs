//! 应用上下文
//!
//! 引导完成后返回的查找入口，独占本次引导创建的全部实例。

use crate::engine::{CreatedInstance, InstantiationEngine};
use crate::graph_builder::BuiltGraph;
use crate::lifecycle::LifecycleInvoker;
use crate::node::BeanTable;
use di_abstractions::{
    BeanIdentity, BeanRegistry, ContextStats, DependencyGraph, DependencyEdge, Namespace,
    ObjectRef, Value,
};
use infrastructure_common::{
    BeanKind, ContainerOptions, DependencyError, DependencyResult, NodeState,
};
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

/// 上下文内部状态
#[derive(Debug)]
pub(crate) struct ContextState {
    pub(crate) table: BeanTable,
    pub(crate) graph: DependencyGraph,
    pub(crate) namespace: Namespace,
    pub(crate) options: ContainerOptions,
    pub(crate) stats: ContextStats,
}

impl ContextState {
    pub(crate) fn new(built: BuiltGraph, namespace: Namespace, options: ContainerOptions) -> Self {
        let stats = ContextStats {
            registered_beans: built.table.len(),
            ..ContextStats::default()
        };
        Self {
            table: built.table,
            graph: built.graph,
            namespace,
            options,
            stats,
        }
    }

    /// 撤销失败的一轮查找：本轮创建的单例回到 `Pending`，下次查找重新构造
    fn discard(&mut self, created: &[CreatedInstance]) {
        for entry in created {
            if let Some(node) = self.table.get_mut(&entry.key) {
                if matches!(node.kind, BeanKind::Factory(_)) && node.is_shared() {
                    node.state = NodeState::Pending;
                    node.instance = None;
                }
            }
        }
    }

    fn constructed_beans(&self) -> usize {
        self.table
            .nodes()
            .filter(|node| node.is_shared() && node.state == NodeState::Constructed)
            .count()
    }
}

/// 应用上下文
///
/// 延迟单例在首次查找时构造，原型 Bean 每次查找都重新构造并重新解析依赖。
/// 按需创建的实例在返回前同样经过两轮生命周期钩子。
/// 查找失败时，这次查找创建的单例全部撤销。
///
/// 查找期间持有上下文锁，构造函数、取值器、注入函数与钩子都在锁内执行。
/// 它们不能再调用同一个上下文的查找方法，否则会死锁。
#[derive(Debug)]
pub struct ApplicationContext {
    id: Uuid,
    state: Mutex<ContextState>,
}

impl ApplicationContext {
    pub(crate) fn new(state: ContextState) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Mutex::new(state),
        }
    }

    /// 上下文 ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 统计信息
    pub fn stats(&self) -> ContextStats {
        let state = self.state.lock();
        ContextStats {
            constructed_beans: state.constructed_beans(),
            ..state.stats
        }
    }

    /// 引导与查找过程中记录的依赖（包括构造函数写入的属性占位符）
    pub fn dependencies_of(&self, key: &str) -> Vec<DependencyEdge> {
        self.state
            .lock()
            .graph
            .edges()
            .into_iter()
            .filter(|edge| edge.dependent == key)
            .collect()
    }

    fn lookup(&self, identity: &BeanIdentity) -> DependencyResult<Value> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let key = state
            .table
            .find(identity, &state.namespace)
            .ok_or_else(|| DependencyError::lookup_failed(identity.describe()))?;

        let mut engine = InstantiationEngine::new(state);
        let outcome = engine
            .obtain(&key)
            .and_then(|value| engine.drain().map(|()| value));
        let created = engine.finish();

        if !created.is_empty() {
            debug!("查找 {} 时创建了 {} 个实例", key, created.len());
        }
        let outcome = match outcome {
            Ok(value) if !created.is_empty() && state.options.invoke_lifecycle_hooks => {
                LifecycleInvoker::new(&state.graph)
                    .invoke([key.as_str()], &created, &mut state.stats)
                    .map(|()| value)
            }
            other => other,
        };

        if outcome.is_err() {
            debug!("查找 {} 失败，撤销 {} 个实例", key, created.len());
            state.discard(&created);
        }
        outcome
    }
}

impl BeanRegistry for ApplicationContext {
    fn get_bean(&self, identity: impl Into<BeanIdentity>) -> DependencyResult<Value> {
        self.lookup(&identity.into())
    }

    fn get_object(&self, identity: impl Into<BeanIdentity>) -> DependencyResult<ObjectRef> {
        let identity = identity.into();
        match self.lookup(&identity)? {
            Value::Object(object) => Ok(object),
            _ => Err(DependencyError::NotAnObject {
                identity: identity.describe().to_string(),
            }),
        }
    }

    fn contains_bean(&self, identity: impl Into<BeanIdentity>) -> bool {
        let state = self.state.lock();
        state.table.find(&identity.into(), &state.namespace).is_some()
    }

    fn bean_keys(&self) -> Vec<String> {
        self.state.lock().table.keys().map(str::to_string).collect()
    }

    fn state_of(&self, key: &str) -> Option<NodeState> {
        self.state.lock().table.get(key).map(|node| node.state)
    }
}
