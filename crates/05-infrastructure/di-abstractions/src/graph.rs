//! 依赖图
//!
//! 节点是 Bean 键，边是 `(依赖方, 被依赖方, 种类)`。构造参数产生硬边，
//! 属性注入产生软边。只有完全由硬边组成的环才是非法的。

use indexmap::{IndexMap, IndexSet};
use infrastructure_common::{DependencyError, DependencyResult};
use std::collections::HashSet;

/// 边的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// 构造参数注入：依赖必须在依赖方构造前存在
    Hard,
    /// 属性注入：可以在依赖方构造后补齐
    Soft,
}

/// 依赖边
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    /// 依赖方
    pub dependent: String,
    /// 被依赖方
    pub dependency: String,
    /// 种类
    pub kind: EdgeKind,
}

/// 依赖图
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// 节点 → 出边（按发现顺序）
    adjacency: IndexMap<String, IndexSet<(String, EdgeKind)>>,
}

impl DependencyGraph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加节点
    pub fn add_node(&mut self, key: impl Into<String>) {
        self.adjacency.entry(key.into()).or_default();
    }

    /// 添加边，重复的边只记录一次，返回是否为新边
    pub fn add_edge(
        &mut self,
        dependent: impl Into<String>,
        dependency: impl Into<String>,
        kind: EdgeKind,
    ) -> bool {
        let dependent = dependent.into();
        let dependency = dependency.into();
        self.add_node(dependent.clone());
        self.add_node(dependency.clone());
        self.adjacency
            .get_mut(&dependent)
            .is_some_and(|edges| edges.insert((dependency, kind)))
    }

    /// 是否包含节点
    pub fn contains(&self, key: &str) -> bool {
        self.adjacency.contains_key(key)
    }

    /// 按插入顺序遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// 节点的所有出边
    pub fn dependencies_of(&self, key: &str) -> impl Iterator<Item = (&str, EdgeKind)> {
        self.adjacency
            .get(key)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(dependency, kind)| (dependency.as_str(), *kind)))
    }

    /// 节点的硬边依赖
    pub fn hard_dependencies_of(&self, key: &str) -> impl Iterator<Item = &str> {
        self.dependencies_of(key)
            .filter(|(_, kind)| *kind == EdgeKind::Hard)
            .map(|(dependency, _)| dependency)
    }

    /// 所有边
    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.adjacency
            .iter()
            .flat_map(|(dependent, edges)| {
                edges.iter().map(move |(dependency, kind)| DependencyEdge {
                    dependent: dependent.clone(),
                    dependency: dependency.clone(),
                    kind: *kind,
                })
            })
            .collect()
    }

    /// 边的数量
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum()
    }

    /// 依赖优先顺序
    ///
    /// 以给定根节点的顺序做深度优先后序遍历，同时沿硬边与软边前进。
    /// 已访问或正在访问的节点直接跳过，因此含软边的环不会死循环。
    pub fn dependency_first_order<'a, I>(&self, roots: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        for root in roots {
            self.post_order(root, &mut visited, &mut order);
        }
        order
    }

    fn post_order(&self, key: &str, visited: &mut HashSet<String>, order: &mut Vec<String>) {
        if !visited.insert(key.to_string()) {
            return;
        }
        let dependencies: Vec<&str> = self.dependencies_of(key).map(|(dependency, _)| dependency).collect();
        for dependency in dependencies {
            self.post_order(dependency, visited, order);
        }
        order.push(key.to_string());
    }
}

/// 循环依赖检测器
pub trait CircularDependencyDetector: Send + Sync {
    /// 检测循环依赖
    fn detect_circular_dependencies(&self, graph: &DependencyGraph) -> DependencyResult<()>;
}

/// 默认循环依赖检测器
///
/// 只沿硬边做深度优先搜索，发现回边即报错。
#[derive(Debug, Default)]
pub struct DefaultCircularDependencyDetector;

impl CircularDependencyDetector for DefaultCircularDependencyDetector {
    fn detect_circular_dependencies(&self, graph: &DependencyGraph) -> DependencyResult<()> {
        let mut visited = HashSet::new();
        let mut visiting = Vec::new();

        for node in graph.nodes() {
            if !visited.contains(node) {
                self.dfs_check(node, graph, &mut visited, &mut visiting)?;
            }
        }

        Ok(())
    }
}

impl DefaultCircularDependencyDetector {
    fn dfs_check(
        &self,
        current: &str,
        graph: &DependencyGraph,
        visited: &mut HashSet<String>,
        visiting: &mut Vec<String>,
    ) -> DependencyResult<()> {
        if let Some(start) = visiting.iter().position(|key| key == current) {
            // 回边：visiting[start..] 加上当前节点构成环
            let mut chain = visiting[start..].to_vec();
            chain.push(current.to_string());
            return Err(DependencyError::CircularDependency { chain });
        }

        if visited.contains(current) {
            return Ok(());
        }

        visiting.push(current.to_string());
        for dependency in graph.hard_dependencies_of(current) {
            self.dfs_check(dependency, graph, visited, visiting)?;
        }
        visiting.pop();
        visited.insert(current.to_string());

        Ok(())
    }
}
