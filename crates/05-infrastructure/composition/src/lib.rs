//! # 基础设施组合层
//!
//! 把命名空间、容器选项与日志组装起来，引导一个 Bean 容器。
//!
//! ## 主要功能
//!
//! - **容器构建器**: 使用构建者模式组装命名空间与选项
//! - **选项加载**: 从 TOML / JSON 文本读取容器选项
//! - **日志初始化**: 按预设或过滤规则初始化 `tracing-subscriber`
//!
//! ## 基本使用
//!
//! ```rust
//! use infrastructure_composition::{
//!     instantiate, BeanConfig, BeanRegistry, Class, ContainerBuilder,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let greeter = Class::new("Greeter", |this, _| {
//!         this.set("greeting", "hello");
//!         Ok(())
//!     });
//!
//!     let context = ContainerBuilder::new()
//!         .with_class("app.Greeter", &greeter)
//!         .with_options_toml("max_resolution_depth = 16")?
//!         .build(&BeanConfig::new().bean("greeter", instantiate("app.Greeter")))?;
//!
//!     let bean = context.get_object("greeter")?;
//!     println!("{:?}", bean.get("greeting"));
//!     Ok(())
//! }
//! ```

pub mod builder;


// 重新导出主要类型
pub use builder::{ContainerBuilder, LoggingConfig};
pub use di_abstractions::*;
pub use di_impl::{bake_beans, bake_beans_with, ApplicationContext};

// 重新导出错误与选项类型
pub use infrastructure_common::{
    ContainerOptions, DependencyError, DependencyResult, InfrastructureError, NodeState, Strategy,
    CONTEXT_HOOK, INIT_HOOK,
};
