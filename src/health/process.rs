//! 进程探测器实现
//!
//! 通过 pgrep 按命令行模式匹配宿主机进程

use crate::health::prober::{run_tool, stdout_text, Prober, PROBE_TIMEOUT};
use crate::health::{ProbeResult, ProbeTarget};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

/// 诊断时额外搜索的常见服务端模式
const SURVEY_PATTERNS: [&str; 4] = ["bedrock_server", "bedrock", "minecraft", "LD_LIBRARY_PATH"];

/// 进程探测器
///
/// 执行 `pgrep -f <pattern>`：退出码0表示存在匹配进程，1表示无匹配。
pub struct ProcessProber {
    /// pgrep -f 使用的匹配模式
    pattern: String,
    /// 探测目标描述
    target: ProbeTarget,
}

impl ProcessProber {
    /// 创建新的进程探测器
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            target: ProbeTarget::Process {
                pattern: pattern.clone(),
            },
            pattern,
        }
    }
}

#[async_trait]
impl Prober for ProcessProber {
    fn tool(&self) -> &'static str {
        "pgrep"
    }

    fn target(&self) -> &ProbeTarget {
        &self.target
    }

    async fn probe(&self) -> ProbeResult {
        match run_tool("pgrep", &["-f", &self.pattern], PROBE_TIMEOUT).await {
            Ok(output) if output.status.success() => {
                let pids = parse_pids(&stdout_text(&output));
                debug!("进程匹配成功: {} (PID {:?})", self.pattern, pids);
                ProbeResult::up().with_detail(json!({ "pids": pids }))
            }
            // pgrep 退出码1表示无匹配，其余退出码表示 pgrep 自身出错
            Ok(output) if output.status.code() == Some(1) => {
                debug!("未找到匹配进程: {}", self.pattern);
                ProbeResult::down()
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let code = output.status.code().unwrap_or(-1);
                warn!("pgrep 执行异常 (退出码 {code}): {}", stderr.trim());
                ProbeResult::down().with_detail(json!({
                    "error": format!("pgrep 退出码 {code}: {}", stderr.trim()),
                }))
            }
            Err(err) => {
                warn!("进程探测失败: {err}");
                ProbeResult::down().with_detail(json!({ "error": err.to_string() }))
            }
        }
    }

    async fn survey(&self) -> serde_json::Value {
        // 配置的模式排首位，其后为常见服务端模式，去重保序
        let mut patterns: Vec<&str> = vec![self.pattern.as_str()];
        for candidate in SURVEY_PATTERNS {
            if !patterns.contains(&candidate) {
                patterns.push(candidate);
            }
        }

        let scans = futures::future::join_all(patterns.iter().map(|p| scan_pattern(p))).await;

        let mut results = serde_json::Map::new();
        for (pattern, scan) in patterns.into_iter().zip(scans) {
            results.insert(pattern.to_string(), scan);
        }
        serde_json::Value::Object(results)
    }
}

/// 对单个模式执行一次 pgrep 搜索
async fn scan_pattern(pattern: &str) -> serde_json::Value {
    match run_tool("pgrep", &["-f", pattern], PROBE_TIMEOUT).await {
        Ok(output) if output.status.success() => {
            json!({
                "found": true,
                "pids": parse_pids(&stdout_text(&output)),
            })
        }
        Ok(_) => json!({ "found": false, "pids": [] }),
        Err(err) => json!({ "error": err.to_string() }),
    }
}

/// 解析 pgrep 输出，每行一个PID
fn parse_pids(stdout: &str) -> Vec<u32> {
    stdout
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect()
}
