//! Bean 描述
//!
//! 配置由 "键 → Bean 描述" 组成。描述要么是预构建的原始值，要么是带构造策略的
//! 工厂说明（目标类、构造参数、属性覆盖）。引导过程从不修改描述本身。

use crate::factory::Class;
use crate::object::ObjectRef;
use crate::value::Value;
use indexmap::IndexMap;
use infrastructure_common::{BeanKind, SourceLocation, Strategy};
use tracing::warn;

/// 工厂目标
#[derive(Debug, Clone)]
pub enum FactoryTarget {
    /// 类引用
    Class(Class),
    /// 在命名空间中解析的点分路径
    Path(String),
}

impl FactoryTarget {
    /// 诊断用名称
    pub fn describe(&self) -> &str {
        match self {
            Self::Class(class) => class.name(),
            Self::Path(path) => path,
        }
    }
}

impl From<&Class> for FactoryTarget {
    fn from(class: &Class) -> Self {
        Self::Class(class.clone())
    }
}

impl From<Class> for FactoryTarget {
    fn from(class: Class) -> Self {
        Self::Class(class)
    }
}

impl From<&str> for FactoryTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for FactoryTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// 工厂 Bean 说明
#[derive(Debug, Clone)]
pub struct FactoryBean {
    strategy: Strategy,
    target: FactoryTarget,
    args: Vec<Value>,
    props: IndexMap<String, Value>,
    location: SourceLocation,
}

impl FactoryBean {
    /// 创建工厂说明
    #[track_caller]
    pub fn new(strategy: Strategy, target: impl Into<FactoryTarget>) -> Self {
        Self {
            strategy,
            target: target.into(),
            args: Vec::new(),
            props: IndexMap::new(),
            location: SourceLocation::caller(),
        }
    }

    /// 设置按位置排列的构造参数
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// 追加一个构造参数
    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// 设置属性覆盖，覆盖值总是优先于对象自身构造逻辑写入的占位符
    pub fn with_props<I, K, V>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in props {
            self.props.insert(name.into(), value.into());
        }
        self
    }

    /// 添加一个属性覆盖
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// 构造策略
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// 目标
    pub fn target(&self) -> &FactoryTarget {
        &self.target
    }

    /// 构造参数
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// 属性覆盖
    pub fn props(&self) -> &IndexMap<String, Value> {
        &self.props
    }

    /// 定义位置
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

/// 声明引导期间立即构造的单例
#[track_caller]
pub fn instantiate(target: impl Into<FactoryTarget>) -> FactoryBean {
    FactoryBean::new(Strategy::Singleton, target)
}

/// 声明原型 Bean，每次查找都构造新实例
#[track_caller]
pub fn proto_of(target: impl Into<FactoryTarget>) -> FactoryBean {
    FactoryBean::new(Strategy::Prototype, target)
}

/// 声明延迟单例，首次需要时构造
#[track_caller]
pub fn lazy(target: impl Into<FactoryTarget>) -> FactoryBean {
    FactoryBean::new(Strategy::LazySingleton, target)
}

/// Bean 描述
#[derive(Debug, Clone)]
pub enum BeanDefinition {
    /// 预构建的原始值（对象或基本值）
    Raw(Value),
    /// 工厂说明
    Factory(FactoryBean),
}

impl BeanDefinition {
    /// 创建原始值描述
    pub fn raw(value: impl Into<Value>) -> Self {
        Self::Raw(value.into())
    }

    /// Bean 种类
    pub fn kind(&self) -> BeanKind {
        match self {
            Self::Raw(_) => BeanKind::Raw,
            Self::Factory(factory) => BeanKind::Factory(factory.strategy()),
        }
    }
}

impl From<FactoryBean> for BeanDefinition {
    fn from(factory: FactoryBean) -> Self {
        Self::Factory(factory)
    }
}

impl From<ObjectRef> for BeanDefinition {
    fn from(object: ObjectRef) -> Self {
        Self::Raw(Value::Object(object))
    }
}

impl From<&ObjectRef> for BeanDefinition {
    fn from(object: &ObjectRef) -> Self {
        Self::Raw(Value::Object(object.clone()))
    }
}

impl From<Value> for BeanDefinition {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// Bean 配置
///
/// 按声明顺序保存的 "键 → Bean 描述" 映射，每个键只对应一个节点。
#[derive(Debug, Clone, Default)]
pub struct BeanConfig {
    beans: IndexMap<String, BeanDefinition>,
}

impl BeanConfig {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明 Bean 并返回自身
    pub fn bean(mut self, key: impl Into<String>, definition: impl Into<BeanDefinition>) -> Self {
        self.insert(key, definition);
        self
    }

    /// 声明 Bean，同名键会替换原描述并返回旧描述
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        definition: impl Into<BeanDefinition>,
    ) -> Option<BeanDefinition> {
        let key = key.into();
        let previous = self.beans.insert(key.clone(), definition.into());
        if previous.is_some() {
            warn!("Bean {} 重复声明，使用最后一次的描述", key);
        }
        previous
    }

    /// 获取描述
    pub fn get(&self, key: &str) -> Option<&BeanDefinition> {
        self.beans.get(key)
    }

    /// 按声明顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BeanDefinition)> {
        self.beans.iter().map(|(key, definition)| (key.as_str(), definition))
    }

    /// Bean 数量
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl<K, D> FromIterator<(K, D)> for BeanConfig
where
    K: Into<String>,
    D: Into<BeanDefinition>,
{
    fn from_iter<T: IntoIterator<Item = (K, D)>>(iter: T) -> Self {
        let mut config = Self::new();
        for (key, definition) in iter {
            config.insert(key, definition);
        }
        config
    }
}
