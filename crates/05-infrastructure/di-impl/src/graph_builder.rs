//! 依赖图构建
//!
//! 扫描配置中的全部 Bean 描述，建立节点表与依赖图：
//! 构造参数中的占位符产生硬边，属性覆盖与原始对象自身属性中的占位符产生软边。
//! 工厂构造函数自己写入的占位符要到实例创建后才可见，由实例化引擎在装配时补入同一张图。

use crate::node::{BeanNode, BeanTable};
use di_abstractions::{
    scan_arguments, scan_object, scan_properties, BeanConfig, BeanDefinition, DependencyGraph,
    EdgeKind, FactoryBean, FactoryTarget, Inject, Namespace,
};
use infrastructure_common::{DependencyError, DependencyResult};
use tracing::debug;

/// 构建结果
#[derive(Debug)]
pub(crate) struct BuiltGraph {
    pub(crate) table: BeanTable,
    pub(crate) graph: DependencyGraph,
}

/// 依赖图构建器
pub(crate) struct GraphBuilder<'a> {
    config: &'a BeanConfig,
    namespace: &'a Namespace,
}

impl<'a> GraphBuilder<'a> {
    pub(crate) fn new(config: &'a BeanConfig, namespace: &'a Namespace) -> Self {
        Self { config, namespace }
    }

    /// 构建节点表与依赖图
    ///
    /// 只负责发现边，循环检测由调用方按选项决定是否执行。
    pub(crate) fn build(&self) -> DependencyResult<BuiltGraph> {
        let mut table = BeanTable::default();
        let mut graph = DependencyGraph::new();

        for (key, definition) in self.config.iter() {
            let node = match definition {
                BeanDefinition::Raw(value) => BeanNode::raw(key, value),
                BeanDefinition::Factory(factory) => self.factory_node(key, factory)?,
            };
            table.insert(node);
            graph.add_node(key);
        }

        for node in table.nodes() {
            for (_, inject) in scan_arguments(&node.args) {
                let dependency = resolve_inject(&table, self.namespace, &inject)?;
                graph.add_edge(node.key.as_str(), dependency, EdgeKind::Hard);
            }

            let mut soft = scan_properties(node.props.iter().map(|(name, value)| (name.as_str(), value)));
            if let Some(object) = node.instance_object() {
                soft.extend(scan_object(object));
            }
            for (_, inject) in soft {
                let dependency = resolve_inject(&table, self.namespace, &inject)?;
                graph.add_edge(node.key.as_str(), dependency, EdgeKind::Soft);
            }
        }

        debug!(
            "依赖图构建完成: {} 个节点, {} 条边",
            table.len(),
            graph.edge_count()
        );

        Ok(BuiltGraph { table, graph })
    }

    fn factory_node(&self, key: &str, factory: &FactoryBean) -> DependencyResult<BeanNode> {
        let class = match factory.target() {
            FactoryTarget::Class(class) => class.clone(),
            FactoryTarget::Path(path) => {
                self.namespace
                    .resolve(path)
                    .ok_or_else(|| DependencyError::ClassNotFound {
                        bean: key.to_string(),
                        path: path.clone(),
                        location: factory.location(),
                    })?
            }
        };

        Ok(BeanNode::factory(
            key,
            factory.strategy(),
            class,
            factory.args(),
            factory.props(),
        ))
    }
}

/// 把依赖描述符的目标解析为节点键，找不到时报告描述符的创建位置
pub(crate) fn resolve_inject(
    table: &BeanTable,
    namespace: &Namespace,
    inject: &Inject,
) -> DependencyResult<String> {
    table
        .find(inject.target(), namespace)
        .ok_or_else(|| DependencyError::BeanNotFound {
            identity: inject.target().describe().to_string(),
            location: inject.location(),
        })
}
