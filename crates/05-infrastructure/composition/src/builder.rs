//! 容器构建器

use di_abstractions::{BeanConfig, Class, Namespace};
use di_impl::{bake_beans_with, ApplicationContext};
use infrastructure_common::{ContainerOptions, InfrastructureError};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// 容器构建器
///
/// 使用建造者模式组装命名空间、容器选项与日志，然后引导 Bean 容器
pub struct ContainerBuilder {
    /// 全局命名空间
    namespace: Namespace,
    /// 容器选项
    options: ContainerOptions,
    /// 选项验证是否启用
    validation_enabled: bool,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ContainerBuilder {
    /// 创建新的容器构建器
    pub fn new() -> Self {
        Self {
            namespace: Namespace::new(),
            options: ContainerOptions::default(),
            validation_enabled: true,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 使用已经填充好的命名空间
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        debug!("使用外部命名空间，顶层条目 {} 个", namespace.len());
        self.namespace = namespace;
        self
    }

    /// 在点分路径下注册类
    pub fn with_class(mut self, path: &str, class: &Class) -> Self {
        if self.namespace.insert_class(path, class).is_some() {
            warn!("命名空间路径 {} 已存在，替换为类 {}", path, class.name());
        }
        self
    }

    /// 设置容器选项
    pub fn with_options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// 从 TOML 文本读取容器选项
    pub fn with_options_toml(mut self, text: &str) -> Result<Self, InfrastructureError> {
        info!("从 TOML 文本加载容器选项");
        self.options = ContainerOptions::from_toml_str(text)?;
        Ok(self)
    }

    /// 从 JSON 文本读取容器选项
    pub fn with_options_json(mut self, text: &str) -> Result<Self, InfrastructureError> {
        info!("从 JSON 文本加载容器选项");
        self.options = ContainerOptions::from_json_str(text)?;
        Ok(self)
    }

    /// 启用或禁用选项验证
    pub fn enable_validation(mut self, enabled: bool) -> Self {
        self.validation_enabled = enabled;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 当前选项
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// 引导容器
    ///
    /// 构建器可以只配置一次，但 `config` 可以传给多个构建器反复引导。
    pub fn build(self, config: &BeanConfig) -> Result<ApplicationContext, InfrastructureError> {
        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        info!("开始引导容器，Bean {} 个", config.len());

        if self.validation_enabled {
            self.options.validate()?;
        }

        let context = bake_beans_with(config, self.namespace, self.options)?;

        info!("容器 {} 构建完成", context.id());
        Ok(context)
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> Result<(), InfrastructureError> {
        let filter = match &self.logging_config.filter {
            Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
                InfrastructureError::BootstrapFailed {
                    message: format!("日志过滤规则无效: {}", e),
                }
            })?,
            None => EnvFilter::new(self.logging_config.level.to_string()),
        };

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.logging_config.show_target)
            .with_thread_ids(self.logging_config.show_thread_ids)
            .with_file(self.logging_config.show_file)
            .with_line_number(self.logging_config.show_line_number);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 过滤规则（`EnvFilter` 语法），设置后优先于 `level`
    pub filter: Option<String>,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            filter: None,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            filter: None,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            filter: None,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 使用 `EnvFilter` 语法的过滤规则
    pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }
}
