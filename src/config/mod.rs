//! 配置管理模块
//!
//! 提供启动时一次性解析的不可变配置

pub mod types;

// 重新导出主要类型
pub use types::{CheckStrategy, ProbeMode, Settings};
