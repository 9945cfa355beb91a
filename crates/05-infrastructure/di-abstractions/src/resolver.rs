//! 依赖解析抽象
//!
//! 提供注入点描述与解析链（用于检测构造阶段的循环依赖）

use crate::object::ObjectRef;
use crate::value::Value;
use infrastructure_common::{DependencyError, DependencyResult};
use std::fmt;

/// 注入点
///
/// 依赖描述符被解析后要写入的位置：某个对象的属性，或构造参数列表中的某一位。
pub enum InjectionPoint<'a> {
    /// 对象属性
    Property {
        target: &'a ObjectRef,
        name: &'a str,
    },
    /// 构造参数
    Argument {
        args: &'a mut [Value],
        index: usize,
    },
}

impl<'a> InjectionPoint<'a> {
    /// 创建属性注入点
    pub fn property(target: &'a ObjectRef, name: &'a str) -> Self {
        Self::Property { target, name }
    }

    /// 创建参数注入点
    pub fn argument(args: &'a mut [Value], index: usize) -> Self {
        Self::Argument { args, index }
    }

    /// 默认赋值
    pub fn assign(self, value: Value) {
        match self {
            Self::Property { target, name } => {
                target.set(name, value);
            }
            Self::Argument { args, index } => {
                if let Some(slot) = args.get_mut(index) {
                    *slot = value;
                }
            }
        }
    }

    /// 属性注入点的目标对象
    pub fn target(&self) -> Option<&ObjectRef> {
        match self {
            Self::Property { target, .. } => Some(*target),
            Self::Argument { .. } => None,
        }
    }
}

impl fmt::Display for InjectionPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property { name, .. } => write!(f, "property `{name}`"),
            Self::Argument { index, .. } => write!(f, "argument #{index}"),
        }
    }
}

/// 解析上下文
///
/// 记录当前正在构造的 Bean 链。沿构造参数递归时，同一个键出现两次即为硬边循环。
/// 无环的构造参数链总是有限的，所以默认不限制深度。
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<String>,
    /// 最大递归深度
    max_depth: Option<usize>,
}

impl ResolveContext {
    /// 创建不限深度的解析上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 限制解析链的最大深度
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// 添加 Bean 到解析链
    pub fn push(&mut self, key: &str) -> DependencyResult<()> {
        if self.resolution_chain.iter().any(|entry| entry == key) {
            let mut chain = self.resolution_chain.clone();
            chain.push(key.to_string());
            return Err(DependencyError::CircularDependency { chain });
        }
        if let Some(max_depth) = self.max_depth {
            if self.resolution_chain.len() >= max_depth {
                return Err(DependencyError::ResolutionDepthExceeded {
                    bean: key.to_string(),
                    max_depth,
                });
            }
        }
        self.resolution_chain.push(key.to_string());
        Ok(())
    }

    /// 从解析链中移除最后一个 Bean
    pub fn pop(&mut self) {
        self.resolution_chain.pop();
    }

    /// 当前解析链
    pub fn chain(&self) -> &[String] {
        &self.resolution_chain
    }

    /// 当前深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}
