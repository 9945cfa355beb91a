//! 依赖描述符
//!
//! [`inject`] 在声明依赖的位置创建一个占位符。占位符可以作为构造参数、
//! 属性覆盖值，或者由构造函数直接写入对象属性，容器会在解析时把它替换为
//! 真实的依赖值。

use crate::factory::Class;
use crate::registry::BeanIdentity;
use crate::resolver::InjectionPoint;
use crate::value::Value;
use infrastructure_common::{DependencyError, DependencyResult, SourceLocation};
use std::fmt;
use std::sync::Arc;

/// 值转换函数
pub type Transform = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// 自定义注入函数
///
/// 代替默认赋值，接收注入点与（经过取值器处理后的）依赖值。
pub type Injector = Arc<dyn Fn(InjectionPoint<'_>, Value) -> DependencyResult<()> + Send + Sync>;

/// 取值器：从解析到的 Bean 上取出真正注入的值
#[derive(Clone)]
pub enum Accessor {
    /// 读取 Bean 的属性，属性不存在时使用默认值
    Property {
        name: String,
        default: Option<Box<Value>>,
    },
    /// 对 Bean 做转换
    Transform(Transform),
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property { name, default } => f
                .debug_struct("Property")
                .field("name", name)
                .field("default", default)
                .finish(),
            Self::Transform(_) => f.write_str("Transform(<function>)"),
        }
    }
}

/// 可以作为注入目标的类型
///
/// 空字符串与 `None` 不是合法目标。
pub trait IntoInjectTarget {
    /// 转换为 Bean 身份，无效目标返回 `None`
    fn into_inject_target(self) -> Option<BeanIdentity>;
}

impl IntoInjectTarget for &str {
    fn into_inject_target(self) -> Option<BeanIdentity> {
        (!self.is_empty()).then(|| BeanIdentity::Key(self.to_string()))
    }
}

impl IntoInjectTarget for String {
    fn into_inject_target(self) -> Option<BeanIdentity> {
        (!self.is_empty()).then_some(BeanIdentity::Key(self))
    }
}

impl IntoInjectTarget for &String {
    fn into_inject_target(self) -> Option<BeanIdentity> {
        self.as_str().into_inject_target()
    }
}

impl IntoInjectTarget for &Class {
    fn into_inject_target(self) -> Option<BeanIdentity> {
        Some(BeanIdentity::Class(self.clone()))
    }
}

impl IntoInjectTarget for Class {
    fn into_inject_target(self) -> Option<BeanIdentity> {
        Some(BeanIdentity::Class(self))
    }
}

impl IntoInjectTarget for BeanIdentity {
    fn into_inject_target(self) -> Option<BeanIdentity> {
        match self {
            Self::Key(key) => key.into_inject_target(),
            class @ Self::Class(_) => Some(class),
        }
    }
}

impl<T: IntoInjectTarget> IntoInjectTarget for Option<T> {
    fn into_inject_target(self) -> Option<BeanIdentity> {
        self.and_then(IntoInjectTarget::into_inject_target)
    }
}

/// 依赖描述符
#[derive(Clone)]
pub struct Inject {
    target: BeanIdentity,
    accessor: Option<Accessor>,
    injector: Option<Injector>,
    location: SourceLocation,
}

/// 创建依赖描述符
///
/// 目标为空时立即返回 [`DependencyError::InvalidTarget`]，不会推迟到解析阶段。
///
/// ```
/// use di_abstractions::{inject, Class};
///
/// let repository = Class::plain("Repository");
/// let by_class = inject(&repository).unwrap();
/// let by_key = inject("repository").unwrap().property("url");
/// assert_eq!(by_class.target().describe(), "Repository");
/// assert!(by_key.accessor().is_some());
/// assert!(inject("").is_err());
/// ```
#[track_caller]
pub fn inject(target: impl IntoInjectTarget) -> DependencyResult<Inject> {
    let location = SourceLocation::caller();
    let target = target
        .into_inject_target()
        .ok_or(DependencyError::InvalidTarget)?;

    Ok(Inject {
        target,
        accessor: None,
        injector: None,
        location,
    })
}

impl Inject {
    /// 使用自定义注入函数代替默认赋值
    pub fn by<F>(mut self, injector: F) -> Self
    where
        F: Fn(InjectionPoint<'_>, Value) -> DependencyResult<()> + Send + Sync + 'static,
    {
        self.injector = Some(Arc::new(injector));
        self
    }

    /// 注入前对依赖做转换
    pub fn through<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.accessor = Some(Accessor::Transform(Arc::new(transform)));
        self
    }

    /// 注入依赖的某个属性，属性不存在时注入 `Value::Null`
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.accessor = Some(Accessor::Property {
            name: name.into(),
            default: None,
        });
        self
    }

    /// 注入依赖的某个属性，属性不存在时注入默认值
    pub fn property_or(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.accessor = Some(Accessor::Property {
            name: name.into(),
            default: Some(Box::new(default.into())),
        });
        self
    }

    /// 目标身份
    pub fn target(&self) -> &BeanIdentity {
        &self.target
    }

    /// 取值器
    pub fn accessor(&self) -> Option<&Accessor> {
        self.accessor.as_ref()
    }

    /// 是否带有自定义注入函数
    pub fn has_injector(&self) -> bool {
        self.injector.is_some()
    }

    /// 创建位置
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// 对解析到的 Bean 应用取值器
    ///
    /// 属性存在时原样返回（包括 `Null` 与假值），只有属性结构上不存在时才使用默认值。
    pub fn extract(&self, resolved: &Value) -> Value {
        match &self.accessor {
            None => resolved.clone(),
            Some(Accessor::Transform(transform)) => transform(resolved),
            Some(Accessor::Property { name, default }) => resolved
                .as_object()
                .and_then(|object| object.get(name))
                .or_else(|| default.as_deref().cloned())
                .unwrap_or(Value::Null),
        }
    }

    /// 把解析到的 Bean 交付到注入点
    pub fn deliver(&self, point: InjectionPoint<'_>, resolved: &Value) -> DependencyResult<()> {
        let value = self.extract(resolved);
        match &self.injector {
            Some(injector) => injector(point, value),
            None => {
                point.assign(value);
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Inject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("target", &self.target.describe())
            .field("accessor", &self.accessor)
            .field("injector", &self.injector.as_ref().map(|_| "<function>"))
            .field("location", &self.location.to_string())
            .finish()
    }
}
