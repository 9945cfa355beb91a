//! 错误类型定义

use crate::metadata::SourceLocation;
use thiserror::Error;

/// 依赖注入错误类型
///
/// 所有变体在引导期间都是不可恢复的：引导直接中止，不会返回部分构建的容器。
#[derive(Error, Debug)]
pub enum DependencyError {
    /// 依赖描述符的目标为空（空字符串或 `None`），在创建描述符时立即抛出
    #[error("Trying to inject invalid empty bean")]
    InvalidTarget,

    /// 注入点引用的 Bean 不存在
    #[error("Bean: `{identity}` couldn't be found from injection at line: {location}")]
    BeanNotFound {
        identity: String,
        location: SourceLocation,
    },

    /// 显式查找时 Bean 不存在，没有注入点可以报告
    #[error("Bean: `{identity}` couldn't be found")]
    LookupFailed { identity: String },

    /// 工厂 Bean 的目标类无法在命名空间中解析
    #[error("Class: `{path}` for bean `{bean}` couldn't be found from definition at line: {location}")]
    ClassNotFound {
        bean: String,
        path: String,
        location: SourceLocation,
    },

    /// 类只声明了名称，还没有定义构造函数
    #[error("Class: `{class}` was declared but never defined")]
    ClassNotDefined { class: String },

    /// 完全由构造参数（硬边）组成的循环依赖
    #[error("Circular dependencies found. If it is possible try inject those dependencies by properties instead by arguments.")]
    CircularDependency { chain: Vec<String> },

    /// 原型链解析深度超过上限
    #[error("Resolution of bean `{bean}` exceeded the maximum depth of {max_depth}")]
    ResolutionDepthExceeded { bean: String, max_depth: usize },

    /// 查找结果不是对象
    #[error("Bean: `{identity}` is not an object")]
    NotAnObject { identity: String },

    /// 生命周期钩子执行失败
    #[error("Lifecycle hook `{hook}` of bean `{bean}` failed: {source}")]
    LifecycleFailed {
        bean: String,
        hook: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DependencyError {
    /// 创建循环依赖错误
    pub fn circular(chain: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::CircularDependency {
            chain: chain.into_iter().map(Into::into).collect(),
        }
    }

    /// 创建查找失败错误
    pub fn lookup_failed(identity: impl Into<String>) -> Self {
        Self::LookupFailed {
            identity: identity.into(),
        }
    }

    /// 是否为循环依赖错误
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// 是否为 Bean 未找到错误（包括显式查找失败）
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BeanNotFound { .. } | Self::LookupFailed { .. } | Self::ClassNotFound { .. }
        )
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        Self::ParseError {
            source: Box::new(source),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
