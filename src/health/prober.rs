//! 探测器trait定义
//!
//! 定义统一的探测接口，并提供子进程执行的公共实现

use crate::error::{ProbeError, Result};
use crate::health::{ProbeResult, ProbeTarget};
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// 单次子进程探测的固定超时时间
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// 探测器trait，定义探测接口
///
/// 探测通过外部CLI工具的子进程完成，只解析退出码和标准输出。
/// `probe` 和 `survey` 不返回错误：工具缺失、超时等异常一律折叠为
/// 未运行状态或文档中的错误字段。
#[async_trait]
pub trait Prober: Send + Sync {
    /// 探测工具的可执行文件名
    fn tool(&self) -> &'static str;

    /// 探测目标
    fn target(&self) -> &ProbeTarget;

    /// 执行一次存活探测
    ///
    /// # 返回
    /// * `ProbeResult` - 探测结果，异常情况折叠为未运行并记录原因
    async fn probe(&self) -> ProbeResult;

    /// 收集探测机制的诊断信息
    ///
    /// # 返回
    /// * `serde_json::Value` - 诊断文档，子项失败以 `error` 字段呈现
    async fn survey(&self) -> serde_json::Value;

    /// 启动时验证探测工具可用
    ///
    /// 执行 `<tool> --version`。仅在工具不存在时返回错误；
    /// 退出码非零或超时只记录警告。
    async fn verify_tool(&self) -> Result<()> {
        match run_tool(self.tool(), &["--version"], PROBE_TIMEOUT).await {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                debug!(
                    "探测工具可用: {} ({})",
                    self.tool(),
                    version.lines().next().unwrap_or("").trim()
                );
                Ok(())
            }
            Ok(output) => {
                warn!(
                    "探测工具版本检查退出码非零: {} ({})",
                    self.tool(),
                    output.status
                );
                Ok(())
            }
            Err(err @ ProbeError::ToolMissing { .. }) => Err(err.into()),
            Err(err) => {
                warn!("探测工具版本检查失败: {err}");
                Ok(())
            }
        }
    }
}

/// 执行探测工具子进程并捕获输出
///
/// 标准输入/输出/错误全部不继承；超时后子进程随future丢弃被杀死。
/// 退出码非零不视为错误，由调用方解释。
pub(crate) async fn run_tool(
    tool: &str,
    args: &[&str],
    timeout_after: Duration,
) -> std::result::Result<Output, ProbeError> {
    let mut command = Command::new(tool);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_after, command.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(ProbeError::ToolMissing {
            tool: tool.to_string(),
        }),
        Ok(Err(e)) => Err(ProbeError::CommandFailed {
            tool: tool.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Err(ProbeError::Timeout {
            tool: tool.to_string(),
            timeout_secs: timeout_after.as_secs(),
        }),
    }
}

/// 将子进程标准输出解码为文本
pub(crate) fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
