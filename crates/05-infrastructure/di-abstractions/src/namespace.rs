//! 全局命名空间
//!
//! 以点分路径（如 `org.ClassB`）组织的类目录。容器只读取它，
//! 必须在引导前由调用方填充，并显式传入引导流程。

use crate::factory::Class;
use indexmap::IndexMap;

/// 命名空间条目
#[derive(Debug, Clone)]
pub enum NamespaceEntry {
    /// 类
    Class(Class),
    /// 嵌套命名空间
    Namespace(Namespace),
}

/// 命名空间
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: IndexMap<String, NamespaceEntry>,
}

impl Namespace {
    /// 创建空命名空间
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册类并返回自身，便于链式构建
    pub fn with_class(mut self, path: &str, class: &Class) -> Self {
        self.insert_class(path, class);
        self
    }

    /// 在点分路径下注册类，返回该路径上原有的条目
    ///
    /// 中间段如果已经是类，会被替换为嵌套命名空间。
    pub fn insert_class(&mut self, path: &str, class: &Class) -> Option<NamespaceEntry> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let leaf = segments.pop()?;

        let mut current = self;
        for segment in segments {
            let entry = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| NamespaceEntry::Namespace(Namespace::new()));
            if matches!(entry, NamespaceEntry::Class(_)) {
                *entry = NamespaceEntry::Namespace(Namespace::new());
            }
            current = match entry {
                NamespaceEntry::Namespace(namespace) => namespace,
                NamespaceEntry::Class(_) => return None,
            };
        }

        current
            .entries
            .insert(leaf.to_string(), NamespaceEntry::Class(class.clone()))
    }

    /// 按点分路径查找类
    pub fn resolve(&self, path: &str) -> Option<Class> {
        if path.is_empty() {
            return None;
        }

        let mut current = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            match (current.entries.get(segment)?, segments.peek()) {
                (NamespaceEntry::Class(class), None) => return Some(class.clone()),
                (NamespaceEntry::Namespace(namespace), Some(_)) => current = namespace,
                _ => return None,
            }
        }
        None
    }

    /// 是否包含指定路径的类
    pub fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    /// 顶层条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
