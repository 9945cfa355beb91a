//! # 示例应用程序
//!
//! 演示如何声明 Bean、组合容器并在引导后查找 Bean

use anyhow::Context;
use clap::Parser;
use infrastructure_composition::{
    inject, instantiate, lazy, proto_of, BeanConfig, BeanRegistry, Class, ContainerBuilder,
    LoggingConfig, ObjectRef, Value, CONTEXT_HOOK, INIT_HOOK,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn ADSP Bean 容器示例应用")]
struct Args {
    /// 容器选项文件（TOML 或 JSON）
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,

    /// 原型 Bean 的查找次数
    #[arg(long, default_value_t = 2)]
    requests: usize,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// 应用名称
    pub name: String,
    /// 数据库连接串
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "example-app".to_string(),
            database_url: "postgres://localhost:5432/adsp".to_string(),
            max_connections: 10,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logging = if args.json_logs {
        LoggingConfig::production()
    } else {
        LoggingConfig::default()
    };
    logging.level = parse_log_level(&args.log_level);

    let mut builder = ContainerBuilder::new().with_logging(logging);
    if let Some(path) = &args.options {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取选项文件失败: {}", path.display()))?;
        builder = if path.extension().is_some_and(|ext| ext == "json") {
            builder.with_options_json(&text)?
        } else {
            builder.with_options_toml(&text)?
        };
    }

    let classes = Classes::new();
    let builder = builder
        .with_class("app.Repository", &classes.repository)
        .with_class("app.Service", &classes.service);

    let context = builder.build(&bean_config(&classes)?)?;
    info!("容器统计: {}", context.stats());

    let service = context.get_object("service")?;
    info!("服务已就绪: {:?}", service.get("ready"));

    for index in 0..args.requests {
        let request = context.get_object("request")?;
        let shares_service = request.get("service").is_some_and(|value| {
            value
                .as_object()
                .is_some_and(|object: &ObjectRef| object.ptr_eq(&service))
        });
        info!("请求 #{} 使用共享服务: {}", index, shares_service);
    }

    let audit = context.get_object("audit")?;
    info!("审计 Bean 延迟创建: {:?}", audit.get("target"));
    info!("最终统计: {}", context.stats());
    Ok(())
}

/// 示例中使用的类
struct Classes {
    repository: Class,
    service: Class,
    request: Class,
    audit: Class,
}

impl Classes {
    fn new() -> Self {
        let repository = Class::new("Repository", |this, args| {
            this.set("url", args.first().cloned().unwrap_or_default());
            this.define_method(INIT_HOOK, |this| {
                info!("Repository 已连接: {:?}", this.get("url"));
                Ok(())
            });
            Ok(())
        });

        let service = Class::new("Service", |this, args| {
            this.set("repository", args.first().cloned().unwrap_or_default());
            this.set("name", inject("settings")?.property_or("name", "unnamed"));
            this.define_method(CONTEXT_HOOK, |this| {
                this.set("ready", true);
                Ok(())
            });
            Ok(())
        });

        let request = Class::new("Request", |this, _| {
            this.set("service", inject("app.Service")?);
            Ok(())
        });

        let audit = Class::plain("Audit");

        Self {
            repository,
            service,
            request,
            audit,
        }
    }
}

/// 示例 Bean 配置
fn bean_config(classes: &Classes) -> anyhow::Result<BeanConfig> {
    let settings = serde_json::to_value(AppSettings::default())?;

    Ok(BeanConfig::new()
        .bean("settings", Value::from(settings))
        .bean(
            "repository",
            instantiate("app.Repository").with_arg(inject("settings")?.property("database_url")),
        )
        .bean(
            "service",
            instantiate(&classes.service).with_arg(inject(&classes.repository)?),
        )
        .bean("request", proto_of(&classes.request))
        .bean(
            "audit",
            lazy(&classes.audit).with_prop("target", inject("service")?.property("name")),
        ))
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
