//! 后台调度器模块
//!
//! 周期性执行探测并将结果写入状态存储

use crate::health::{Prober, StatusStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{debug, info, warn};

/// 探测调度器
///
/// 按固定间隔驱动探测器，并将每次结果写入共享状态存储。
/// 仅在缓存策略下运行。
pub struct ProbeScheduler {
    /// 探测器
    prober: Arc<dyn Prober>,
    /// 状态存储
    store: Arc<StatusStore>,
    /// 探测间隔
    interval: Duration,
}

impl ProbeScheduler {
    /// 创建新的探测调度器
    ///
    /// # 参数
    /// * `prober` - 探测器
    /// * `store` - 共享状态存储
    /// * `interval` - 探测间隔
    pub fn new(prober: Arc<dyn Prober>, store: Arc<StatusStore>, interval: Duration) -> Self {
        Self {
            prober,
            store,
            interval,
        }
    }

    /// 运行调度循环，直到收到停机信号
    ///
    /// 首个tick立即触发，状态存储在启动后一个探测时长内即有数据。
    /// 间隔休眠期间停机信号也会被及时观察到；正在执行的探测会先完成，
    /// 其结果照常写入存储。
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = interval(self.interval);
        info!(
            "后台探测任务启动: {} (间隔 {} 秒)",
            self.prober.target(),
            self.interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let result = self.prober.probe().await;
                    if result.is_up() {
                        debug!("探测完成: {} {}", self.prober.target(), result.status);
                    } else {
                        warn!("探测完成: {} {}", self.prober.target(), result.status);
                    }
                    self.store.write(result).await;
                }
                _ = shutdown.recv() => {
                    info!("后台探测任务收到停机信号，退出");
                    break;
                }
            }
        }
    }
}
