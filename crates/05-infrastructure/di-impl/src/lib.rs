//! # 依赖注入具体实现
//!
//! 提供 Bean 容器的依赖解析与实例化引擎：
//!
//! - 依赖图构建：区分构造参数（硬边）与属性注入（软边）
//! - 实例化引擎：单例、原型、延迟单例三种策略，两阶段构造与装配
//! - 生命周期调用：按依赖优先顺序两轮调用 `on_init` / `on_context`
//! - 应用上下文：按配置键、类或点分路径查找 Bean
//!
//! ```
//! use di_abstractions::{inject, instantiate, BeanConfig, BeanRegistry, Class};
//! use di_impl::bake_beans;
//!
//! let class_b = Class::plain("ClassB");
//! let class_a = Class::new("ClassA", |this, args| {
//!     this.set("classB", args[0].clone());
//!     Ok(())
//! });
//!
//! let context = bake_beans(
//!     &BeanConfig::new()
//!         .bean("classA", instantiate(&class_a).with_arg(inject(&class_b)?))
//!         .bean("classB", instantiate(&class_b)),
//! )?;
//!
//! let a = context.get_object(&class_a)?;
//! let b = context.get_object(&class_b)?;
//! assert!(a.get("classB").unwrap().as_object().unwrap().ptr_eq(&b));
//! # Ok::<(), infrastructure_common::DependencyError>(())
//! ```

mod context;
mod engine;
mod graph_builder;
mod lifecycle;
mod node;

pub use context::ApplicationContext;

use crate::context::ContextState;
use crate::engine::InstantiationEngine;
use crate::graph_builder::GraphBuilder;
use crate::lifecycle::LifecycleInvoker;
use di_abstractions::{BeanConfig, CircularDependencyDetector, DefaultCircularDependencyDetector, Namespace};
use infrastructure_common::{ContainerOptions, DependencyResult};
use tracing::info;

/// 使用空命名空间与默认选项引导容器
pub fn bake_beans(config: &BeanConfig) -> DependencyResult<ApplicationContext> {
    bake_beans_with(config, Namespace::new(), ContainerOptions::default())
}

/// 引导容器
///
/// 构建依赖图并检测硬边循环，立即构造全部单例，装配所有软边，
/// 最后按依赖优先顺序调用生命周期钩子。任何错误都会中止引导，不返回部分构建的上下文。
/// `config` 本身不会被修改，可以反复用于引导新的上下文。
pub fn bake_beans_with(
    config: &BeanConfig,
    namespace: Namespace,
    options: ContainerOptions,
) -> DependencyResult<ApplicationContext> {
    let built = GraphBuilder::new(config, &namespace).build()?;
    if options.detect_circular_dependencies {
        DefaultCircularDependencyDetector.detect_circular_dependencies(&built.graph)?;
    }

    let mut state = ContextState::new(built, namespace, options);
    let created = {
        let mut engine = InstantiationEngine::new(&mut state);
        engine.bootstrap()?;
        engine.finish()
    };

    if state.options.invoke_lifecycle_hooks {
        let roots: Vec<String> = state.table.keys().map(str::to_string).collect();
        LifecycleInvoker::new(&state.graph).invoke(
            roots.iter().map(String::as_str),
            &created,
            &mut state.stats,
        )?;
    }

    let context = ApplicationContext::new(state);
    info!(
        "容器 {} 引导完成: 实例 {} 个, {}",
        context.id(),
        created.len(),
        context.stats()
    );
    Ok(context)
}
