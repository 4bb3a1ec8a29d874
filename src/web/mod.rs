//! Web服务模块
//!
//! 提供 /health 与 /debug 端点的HTTP服务

use crate::config::CheckStrategy;
use crate::health::{DebugReporter, Prober, StatusStore};
use std::sync::Arc;

pub mod handlers;
pub mod server;

pub use server::{build_router, serve};

/// Web应用共享状态
#[derive(Clone)]
pub struct AppState {
    /// 状态存储（缓存策略下由后台调度器写入）
    pub store: Arc<StatusStore>,
    /// 探测器（即时策略下由处理函数直接调用）
    pub prober: Arc<dyn Prober>,
    /// 调试报告生成器
    pub reporter: Arc<DebugReporter>,
    /// 检查策略
    pub strategy: CheckStrategy,
}

impl AppState {
    /// 创建新的Web应用状态
    pub fn new(
        store: Arc<StatusStore>,
        prober: Arc<dyn Prober>,
        strategy: CheckStrategy,
    ) -> Self {
        let reporter = Arc::new(DebugReporter::new(Arc::clone(&prober)));
        Self {
            store,
            prober,
            reporter,
            strategy,
        }
    }
}
