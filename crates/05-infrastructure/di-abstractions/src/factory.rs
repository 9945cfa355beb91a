//! 类与构造函数
//!
//! [`Class`] 是构造函数引用：它决定实例的类型身份，并负责在给定构造参数时
//! 初始化一个新对象。

use crate::object::{Object, ObjectRef};
use crate::value::Value;
use infrastructure_common::{DependencyError, DependencyResult};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// 构造函数
///
/// 接收待初始化的对象与按位置排列的构造参数。构造函数可以在对象属性中
/// 放置 [`Inject`](crate::inject::Inject) 占位符，由容器在装配阶段解析。
pub type Constructor = Arc<dyn Fn(&mut Object, &[Value]) -> DependencyResult<()> + Send + Sync>;

struct ClassInner {
    name: String,
    constructor: OnceCell<Constructor>,
}

/// 类引用
///
/// 克隆后仍是同一个类，身份按指针比较。
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

impl Class {
    /// 创建带构造函数的类
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&mut Object, &[Value]) -> DependencyResult<()> + Send + Sync + 'static,
    {
        let class = Self::declare(name);
        class.define(constructor);
        class
    }

    /// 创建构造函数为空的类
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, |_, _| Ok(()))
    }

    /// 只声明类名，稍后通过 [`Class::define`] 提供构造函数
    ///
    /// 用于两个类的构造函数需要相互引用对方的场景。
    pub fn declare(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            name: name.into(),
            constructor: OnceCell::new(),
        }))
    }

    /// 定义构造函数，重复定义会被忽略
    pub fn define<F>(&self, constructor: F) -> &Self
    where
        F: Fn(&mut Object, &[Value]) -> DependencyResult<()> + Send + Sync + 'static,
    {
        if self.0.constructor.set(Arc::new(constructor)).is_err() {
            warn!("类 {} 已经定义过构造函数，忽略重复定义", self.name());
        }
        self
    }

    /// 类名
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// 是否已定义构造函数
    pub fn is_defined(&self) -> bool {
        self.0.constructor.get().is_some()
    }

    /// 是否为同一个类
    pub fn ptr_eq(&self, other: &Class) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// 使用已经解析好的参数构造实例
    pub fn construct(&self, args: &[Value]) -> DependencyResult<ObjectRef> {
        let constructor = self
            .0
            .constructor
            .get()
            .ok_or_else(|| DependencyError::ClassNotDefined {
                class: self.name().to_string(),
            })?;

        let mut object = Object::of(self);
        constructor(&mut object, args)?;
        Ok(ObjectRef::new(object))
    }

    /// 直接创建预构建实例，可作为原始 Bean 放入配置
    pub fn instantiate<I>(&self, args: I) -> DependencyResult<ObjectRef>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        self.construct(&args)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name())
            .field("defined", &self.is_defined())
            .finish()
    }
}
