//! 元数据定义
//!
//! 提供注入点的诊断位置

use std::fmt;
use std::panic::Location;

/// 源码位置
///
/// 在创建依赖描述符或 Bean 定义时通过 `#[track_caller]` 捕获，
/// 用于 "找不到 Bean" 之类的诊断信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// 文件路径
    pub file: &'static str,
    /// 行号
    pub line: u32,
    /// 列号
    pub column: u32,
}

impl SourceLocation {
    /// 从调用方位置创建
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// 捕获当前调用方的位置
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
