//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Minecraft Vitals 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum MinecraftVitalsError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 探测相关错误
    #[error("探测错误: {0}")]
    Probe(#[from] ProbeError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置项取值非法
    #[error("配置项 {field} 取值非法: {value}")]
    InvalidValue { field: String, value: String },
}

/// 探测错误类型
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 探测工具不存在
    #[error("探测工具不存在: {tool}")]
    ToolMissing { tool: String },

    /// 探测命令超时
    #[error("探测命令超时: {tool} (超过 {timeout_secs} 秒)")]
    Timeout { tool: String, timeout_secs: u64 },

    /// 探测命令执行失败
    #[error("探测命令执行失败: {tool}: {reason}")]
    CommandFailed { tool: String, reason: String },
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, MinecraftVitalsError>;
