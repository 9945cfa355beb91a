//! 实例化引擎
//!
//! 两阶段构造：先沿硬边递归构造实例，再从 FIFO 装配队列中逐个补齐软边。
//! 共享节点按 `Pending → Constructing → Constructed` 推进，
//! 处于 `Constructing` 且已有实例的节点被再次请求时直接返回该实例，
//! 这是属性层面相互引用得以成立的前提。
//! 带取值器的依赖在取值之前先完成装配，取到的值不会是未解析的占位符。

use crate::context::ContextState;
use crate::graph_builder::resolve_inject;
use di_abstractions::{
    scan_arguments, scan_object, EdgeKind, Inject, InjectionPoint, ObjectRef, ResolveContext,
    Value,
};
use infrastructure_common::{BeanKind, DependencyError, DependencyResult, NodeState, Strategy};
use std::collections::VecDeque;
use tracing::debug;

/// 本轮新创建的实例
#[derive(Debug, Clone)]
pub(crate) struct CreatedInstance {
    pub(crate) key: String,
    pub(crate) instance: ObjectRef,
}

/// 待装配的实例
#[derive(Debug)]
struct PatchJob {
    key: String,
    instance: ObjectRef,
    depth: usize,
}

/// 实例化引擎
///
/// 每次引导或按需查找创建一个引擎，结束后通过 [`InstantiationEngine::finish`]
/// 取回这一轮创建的实例，交给生命周期调用器。
pub(crate) struct InstantiationEngine<'s> {
    state: &'s mut ContextState,
    resolve_context: ResolveContext,
    queue: VecDeque<PatchJob>,
    created: Vec<CreatedInstance>,
    /// 正在装配的实例所处的原型链深度
    patch_depth: usize,
    /// 正在装配的实例栈
    patching: Vec<(String, ObjectRef)>,
}

impl<'s> InstantiationEngine<'s> {
    pub(crate) fn new(state: &'s mut ContextState) -> Self {
        Self {
            state,
            resolve_context: ResolveContext::new(),
            queue: VecDeque::new(),
            created: Vec::new(),
            patch_depth: 0,
            patching: Vec::new(),
        }
    }

    /// 引导：登记原始对象，立即构造所有单例，然后装配全部软边
    pub(crate) fn bootstrap(&mut self) -> DependencyResult<()> {
        let mut singletons = Vec::new();
        for node in self.state.table.nodes() {
            match node.kind {
                BeanKind::Raw => {
                    if let Some(instance) = node.instance_object() {
                        self.queue.push_back(PatchJob {
                            key: node.key.clone(),
                            instance: instance.clone(),
                            depth: 0,
                        });
                        self.created.push(CreatedInstance {
                            key: node.key.clone(),
                            instance: instance.clone(),
                        });
                    }
                }
                BeanKind::Factory(Strategy::Singleton) => singletons.push(node.key.clone()),
                BeanKind::Factory(_) => {}
            }
        }

        for key in &singletons {
            self.obtain(key)?;
        }

        self.drain()
    }

    /// 获取节点的值，必要时构造
    pub(crate) fn obtain(&mut self, key: &str) -> DependencyResult<Value> {
        let node = self
            .state
            .table
            .get(key)
            .ok_or_else(|| DependencyError::lookup_failed(key))?;

        match (node.kind, node.state, node.instance.clone()) {
            (BeanKind::Raw, _, instance) => Ok(instance.unwrap_or_default()),
            (BeanKind::Factory(Strategy::Prototype), _, _) => self.construct(key),
            (_, NodeState::Pending, _) => self.construct(key),
            (_, _, Some(instance)) => Ok(instance),
            (_, NodeState::Constructing, None) | (_, NodeState::Constructed, None) => {
                let mut chain = self.resolve_context.chain().to_vec();
                chain.push(key.to_string());
                Err(DependencyError::CircularDependency { chain })
            }
        }
    }

    /// 装配队列中的全部实例，装配过程中新建的实例追加到队尾
    pub(crate) fn drain(&mut self) -> DependencyResult<()> {
        while let Some(job) = self.queue.pop_front() {
            self.patch_depth = job.depth;
            self.patch(&job)?;
        }
        self.patch_depth = 0;
        Ok(())
    }

    /// 结束本轮，返回新创建的实例
    pub(crate) fn finish(self) -> Vec<CreatedInstance> {
        self.created
    }

    fn construct(&mut self, key: &str) -> DependencyResult<Value> {
        self.resolve_context.push(key)?;
        let result = self.construct_node(key);
        self.resolve_context.pop();

        if result.is_err() {
            if let Some(node) = self.state.table.get_mut(key) {
                if node.is_shared() {
                    node.state = NodeState::Pending;
                    node.instance = None;
                }
            }
        }
        result
    }

    fn construct_node(&mut self, key: &str) -> DependencyResult<Value> {
        let (class, args, shared) = {
            let node = self
                .state
                .table
                .get_mut(key)
                .ok_or_else(|| DependencyError::lookup_failed(key))?;
            if node.is_shared() {
                node.state = NodeState::Constructing;
            }
            let class = node
                .class
                .clone()
                .ok_or_else(|| DependencyError::lookup_failed(key))?;
            (class, node.args.clone(), node.is_shared())
        };
        let mut args: Vec<Value> = args.iter().map(|arg| self.state.table.adopt(arg)).collect();

        if !shared && self.patch_depth >= self.state.options.max_resolution_depth {
            return Err(DependencyError::ResolutionDepthExceeded {
                bean: key.to_string(),
                max_depth: self.state.options.max_resolution_depth,
            });
        }

        for (index, inject) in scan_arguments(&args) {
            let dependency = self.resolve(key, &inject, EdgeKind::Hard)?;
            let resolved = self.obtain(&dependency)?;
            self.settle(&dependency, &inject, &resolved)?;
            inject.deliver(InjectionPoint::argument(&mut args, index), &resolved)?;
        }

        let instance = class.construct(&args)?;
        debug!("构造 Bean {} ({})", key, class.name());

        let value = Value::Object(instance.clone());
        if shared {
            if let Some(node) = self.state.table.get_mut(key) {
                node.instance = Some(value.clone());
            }
        } else {
            self.state.stats.prototype_instances += 1;
        }

        self.queue.push_back(PatchJob {
            key: key.to_string(),
            instance: instance.clone(),
            depth: if shared { self.patch_depth } else { self.patch_depth + 1 },
        });
        self.created.push(CreatedInstance {
            key: key.to_string(),
            instance,
        });

        Ok(value)
    }

    /// 装配实例：先处理对象自身的占位符（被覆盖的跳过），再应用属性覆盖
    fn patch(&mut self, job: &PatchJob) -> DependencyResult<()> {
        self.patching.push((job.key.clone(), job.instance.clone()));
        let result = self.patch_properties(job);
        self.patching.pop();
        result
    }

    fn patch_properties(&mut self, job: &PatchJob) -> DependencyResult<()> {
        let overrides = self
            .state
            .table
            .get(&job.key)
            .map(|node| node.props.clone())
            .unwrap_or_default();

        for (name, inject) in scan_object(&job.instance) {
            if overrides.contains_key(&name) {
                continue;
            }
            self.wire_property(&job.key, &job.instance, &name, &inject)?;
        }

        for (name, value) in &overrides {
            match value.as_inject() {
                Some(inject) => self.wire_property(&job.key, &job.instance, name, inject)?,
                None => {
                    job.instance.set(name.as_str(), self.state.table.adopt(value));
                }
            }
        }

        if let Some(node) = self.state.table.get_mut(&job.key) {
            if node.is_shared() {
                node.state = NodeState::Constructed;
            }
        }
        debug!("装配 Bean {} 完成", job.key);
        Ok(())
    }

    fn wire_property(
        &mut self,
        key: &str,
        target: &ObjectRef,
        name: &str,
        inject: &Inject,
    ) -> DependencyResult<()> {
        let dependency = self.resolve(key, inject, EdgeKind::Soft)?;
        let resolved = self.obtain(&dependency)?;
        self.settle(&dependency, inject, &resolved)?;
        inject.deliver(InjectionPoint::property(target, name), &resolved)
    }

    /// 取值器要读取依赖的内容时，先把仍在队列中的依赖装配完
    ///
    /// 依赖本身正在装配（属性取值互相依赖）时返回循环依赖错误。
    fn settle(&mut self, dependency: &str, inject: &Inject, resolved: &Value) -> DependencyResult<()> {
        if inject.accessor().is_none() {
            return Ok(());
        }
        let Some(instance) = resolved.as_object() else {
            return Ok(());
        };

        if self.patching.iter().any(|(_, active)| active.ptr_eq(instance)) {
            let mut chain: Vec<String> = self.patching.iter().map(|(key, _)| key.clone()).collect();
            chain.push(dependency.to_string());
            return Err(DependencyError::CircularDependency { chain });
        }

        let Some(position) = self.queue.iter().position(|job| job.instance.ptr_eq(instance)) else {
            return Ok(());
        };
        if let Some(job) = self.queue.remove(position) {
            debug!("提前装配 Bean {} 以便取值", job.key);
            let depth = std::mem::replace(&mut self.patch_depth, job.depth);
            let result = self.patch(&job);
            self.patch_depth = depth;
            result?;
        }
        Ok(())
    }

    /// 解析依赖目标并把边记入依赖图
    fn resolve(&mut self, key: &str, inject: &Inject, kind: EdgeKind) -> DependencyResult<String> {
        let dependency = resolve_inject(&self.state.table, &self.state.namespace, inject)?;
        self.state.graph.add_edge(key, dependency.as_str(), kind);
        Ok(dependency)
    }
}
