//! 状态存储模块
//!
//! 保存最近一次探测结果，供HTTP处理器并发读取

use crate::health::ProbeResult;
use tokio::sync::RwLock;

/// 状态存储
///
/// 后台调度器写入快照，HTTP处理器读取快照。双方都不会在持锁期间执行探测，
/// 锁的持有时间仅为一次克隆或替换。
#[derive(Debug, Default)]
pub struct StatusStore {
    /// 最近一次探测结果，`None` 表示尚未完成任何探测
    current: RwLock<Option<ProbeResult>>,
}

impl StatusStore {
    /// 创建空的状态存储
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// 写入最新探测结果，整体替换当前快照
    pub async fn write(&self, result: ProbeResult) {
        let mut current = self.current.write().await;
        *current = Some(result);
    }

    /// 读取当前快照
    pub async fn read(&self) -> Option<ProbeResult> {
        let current = self.current.read().await;
        current.clone()
    }

    /// 判断是否已有探测结果
    pub async fn is_populated(&self) -> bool {
        let current = self.current.read().await;
        current.is_some()
    }
}
