//! 探测模块
//!
//! 提供存活探测、状态存储、后台调度和调试报告功能

pub mod docker;
pub mod prober;
pub mod process;
pub mod report;
pub mod result;
pub mod scheduler;
pub mod store;

// 重新导出主要类型
pub use docker::DockerProber;
pub use prober::{Prober, PROBE_TIMEOUT};
pub use process::ProcessProber;
pub use report::DebugReporter;
pub use result::{Liveness, ProbeResult, ProbeTarget};
pub use scheduler::ProbeScheduler;
pub use store::StatusStore;
