//! 容器选项

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 容器选项
///
/// 控制引导流程的可调参数，可以从 TOML 或 JSON 文本反序列化，缺失字段取默认值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    /// 是否在构图阶段检测硬边循环依赖
    ///
    /// 关闭后循环依赖会在实际构造时才被发现，从未被请求的延迟 Bean 不会报错。
    pub detect_circular_dependencies: bool,
    /// 最大解析深度，限制原型 Bean 之间的链式创建
    pub max_resolution_depth: usize,
    /// 是否调用生命周期钩子
    pub invoke_lifecycle_hooks: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            detect_circular_dependencies: true,
            max_resolution_depth: 100,
            invoke_lifecycle_hooks: true,
        }
    }
}

impl ContainerOptions {
    /// 从 TOML 文本解析
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let options: Self = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// 从 JSON 文本解析
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// 验证选项
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_resolution_depth 必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}
