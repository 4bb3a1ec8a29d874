//! Minecraft Vitals - Minecraft服务端存活探测HTTP服务
//!
//! 这是一个用Rust编写的Minecraft服务端存活探测工具，支持：
//! - 宿主机进程探测（pgrep）
//! - Docker容器探测（docker ps）
//! - 后台定时缓存与请求时即时探测两种策略
//! - /health 与 /debug HTTP端点
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod web;

// 重新导出主要类型
pub use config::{CheckStrategy, ProbeMode, Settings};
pub use error::MinecraftVitalsError;
pub use health::{Liveness, ProbeResult, Prober, StatusStore};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
