//! Bean 注册表抽象接口

use crate::factory::Class;
use crate::object::ObjectRef;
use crate::value::Value;
use infrastructure_common::{DependencyResult, NodeState};
use std::fmt;

/// Bean 身份
///
/// 配置键、点分路径（两者都以字符串表示）或类引用。
#[derive(Clone, Debug)]
pub enum BeanIdentity {
    /// 配置键或点分路径
    Key(String),
    /// 类引用，按构造出的实例类型匹配
    Class(Class),
}

impl BeanIdentity {
    /// 诊断信息中使用的名称：字符串原样返回，类返回类名
    pub fn describe(&self) -> &str {
        match self {
            Self::Key(key) => key,
            Self::Class(class) => class.name(),
        }
    }
}

impl fmt::Display for BeanIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl From<&str> for BeanIdentity {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for BeanIdentity {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for BeanIdentity {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<&Class> for BeanIdentity {
    fn from(class: &Class) -> Self {
        Self::Class(class.clone())
    }
}

impl From<Class> for BeanIdentity {
    fn from(class: Class) -> Self {
        Self::Class(class)
    }
}

/// Bean 注册表 trait
///
/// 引导完成后对外暴露的查找接口
pub trait BeanRegistry {
    /// 按配置键、类或点分路径查找 Bean
    ///
    /// 延迟单例在首次查找时构造；原型 Bean 每次查找都返回新实例。
    fn get_bean(&self, identity: impl Into<BeanIdentity>) -> DependencyResult<Value>;

    /// 查找 Bean 并要求它是对象
    fn get_object(&self, identity: impl Into<BeanIdentity>) -> DependencyResult<ObjectRef>;

    /// 是否能解析到某个 Bean（不会触发构造）
    fn contains_bean(&self, identity: impl Into<BeanIdentity>) -> bool;

    /// 按配置顺序返回所有 Bean 键
    fn bean_keys(&self) -> Vec<String>;

    /// 查询 Bean 节点状态
    fn state_of(&self, key: &str) -> Option<NodeState>;
}
