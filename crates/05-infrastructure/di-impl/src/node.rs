//! Bean 节点表
//!
//! 每个配置键对应一个节点，节点持有 Bean 描述的副本与解析状态。

use di_abstractions::{BeanIdentity, Class, Namespace, ObjectRef, Value};
use indexmap::IndexMap;
use infrastructure_common::{BeanKind, NodeState, Strategy};

/// 已解析的 Bean 节点
#[derive(Debug, Clone)]
pub(crate) struct BeanNode {
    pub(crate) key: String,
    pub(crate) kind: BeanKind,
    /// 实例的类，用于按类匹配；原始基本值没有类
    pub(crate) class: Option<Class>,
    pub(crate) args: Vec<Value>,
    pub(crate) props: IndexMap<String, Value>,
    pub(crate) state: NodeState,
    /// 共享实例；原型节点从不缓存实例
    pub(crate) instance: Option<Value>,
    /// 原始对象节点在配置中的原对象
    pub(crate) origin: Option<ObjectRef>,
}

impl BeanNode {
    /// 原始值节点
    ///
    /// 对象会被浅复制，同一份配置多次引导得到的上下文互不共享实例。
    /// 配置中对原对象的字面引用由 [`BeanTable::adopt`] 换成副本。
    pub(crate) fn raw(key: &str, value: &Value) -> Self {
        let (class, instance, origin) = match value {
            Value::Object(object) => {
                let copy = object.shallow_copy();
                (copy.class(), Value::Object(copy), Some(object.clone()))
            }
            other => (None, other.clone(), None),
        };

        Self {
            key: key.to_string(),
            kind: BeanKind::Raw,
            class,
            args: Vec::new(),
            props: IndexMap::new(),
            state: NodeState::Constructed,
            instance: Some(instance),
            origin,
        }
    }

    /// 工厂节点
    pub(crate) fn factory(
        key: &str,
        strategy: Strategy,
        class: Class,
        args: &[Value],
        props: &IndexMap<String, Value>,
    ) -> Self {
        Self {
            key: key.to_string(),
            kind: BeanKind::Factory(strategy),
            class: Some(class),
            args: args.to_vec(),
            props: props.clone(),
            state: NodeState::Pending,
            instance: None,
            origin: None,
        }
    }

    pub(crate) fn is_shared(&self) -> bool {
        self.kind.is_shared()
    }

    /// 已经构造完成的共享实例对象
    pub(crate) fn instance_object(&self) -> Option<&ObjectRef> {
        self.instance.as_ref().and_then(Value::as_object)
    }
}

/// 按配置顺序保存的节点表
#[derive(Debug, Clone, Default)]
pub(crate) struct BeanTable {
    nodes: IndexMap<String, BeanNode>,
}

impl BeanTable {
    pub(crate) fn insert(&mut self, node: BeanNode) {
        self.nodes.insert(node.key.clone(), node);
    }

    pub(crate) fn get(&self, key: &str) -> Option<&BeanNode> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut BeanNode> {
        self.nodes.get_mut(key)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = &BeanNode> {
        self.nodes.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 字面值指向原始对象节点的原对象时，换成本上下文中的副本
    pub(crate) fn adopt(&self, value: &Value) -> Value {
        let Some(object) = value.as_object() else {
            return value.clone();
        };
        self.nodes
            .values()
            .find(|node| node.origin.as_ref().is_some_and(|origin| origin.ptr_eq(object)))
            .and_then(|node| node.instance.clone())
            .unwrap_or_else(|| value.clone())
    }

    /// 把 Bean 身份解析为节点键
    ///
    /// 字符串先匹配配置键，再作为点分路径在命名空间中查找类；
    /// 类按配置顺序匹配第一个实例属于该类的节点。
    pub(crate) fn find(&self, identity: &BeanIdentity, namespace: &Namespace) -> Option<String> {
        match identity {
            BeanIdentity::Key(key) if self.nodes.contains_key(key) => Some(key.clone()),
            BeanIdentity::Key(path) => namespace
                .resolve(path)
                .and_then(|class| self.find_by_class(&class)),
            BeanIdentity::Class(class) => self.find_by_class(class),
        }
    }

    fn find_by_class(&self, class: &Class) -> Option<String> {
        self.nodes
            .values()
            .find(|node| node.class.as_ref().is_some_and(|own| own.ptr_eq(class)))
            .map(|node| node.key.clone())
    }
}
