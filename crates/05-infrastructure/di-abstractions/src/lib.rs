//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 Bean 配置、依赖描述符与依赖图。
//!
//! ## 核心类型
//!
//! - [`Value`] / [`ObjectRef`] - Bean 持有的动态值与共享对象
//! - [`Class`] - 构造函数引用，决定实例的类型身份
//! - [`Inject`] - 依赖描述符，嵌入在构造参数或对象属性中的占位符
//! - [`BeanDefinition`] / [`BeanConfig`] - Bean 描述与配置映射
//! - [`DependencyGraph`] - 区分硬边与软边的依赖图
//! - [`Namespace`] - 点分路径的全局命名空间

pub mod container;
pub mod definition;
pub mod factory;
pub mod graph;
pub mod inject;
pub mod namespace;
pub mod object;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod value;

pub use container::*;
pub use definition::*;
pub use factory::*;
pub use graph::*;
pub use inject::*;
pub use namespace::*;
pub use object::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
pub use value::*;
