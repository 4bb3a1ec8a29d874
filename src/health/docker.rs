//! 容器探测器实现
//!
//! 通过 docker CLI 按名称检查容器运行状态

use crate::health::prober::{run_tool, stdout_text, Prober, PROBE_TIMEOUT};
use crate::health::{ProbeResult, ProbeTarget};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

/// 容器探测器
///
/// 执行 `docker ps --filter name=<name> --format {{.Status}}`，
/// 输出以 `Up` 开头表示容器运行中。
pub struct DockerProber {
    /// 容器名称
    name: String,
    /// 探测目标描述
    target: ProbeTarget,
}

impl DockerProber {
    /// 创建新的容器探测器
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            target: ProbeTarget::Container { name: name.clone() },
            name,
        }
    }
}

#[async_trait]
impl Prober for DockerProber {
    fn tool(&self) -> &'static str {
        "docker"
    }

    fn target(&self) -> &ProbeTarget {
        &self.target
    }

    async fn probe(&self) -> ProbeResult {
        let filter = format!("name={}", self.name);
        let args = ["ps", "--filter", &filter, "--format", "{{.Status}}"];

        match run_tool("docker", &args, PROBE_TIMEOUT).await {
            Ok(output) if output.status.success() => {
                let status = stdout_text(&output).trim().to_string();
                if status.starts_with("Up") {
                    debug!("容器运行中: {} ({status})", self.name);
                    ProbeResult::up().with_detail(json!({ "container_status": status }))
                } else if status.is_empty() {
                    // 无输出：容器不存在或已停止
                    debug!("未找到运行中的容器: {}", self.name);
                    ProbeResult::down()
                } else {
                    debug!("容器未运行: {} ({status})", self.name);
                    ProbeResult::down().with_detail(json!({ "container_status": status }))
                }
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("docker ps 执行失败: {}", stderr.trim());
                ProbeResult::down().with_detail(json!({
                    "error": format!("docker ps 失败: {}", stderr.trim()),
                }))
            }
            Err(err) => {
                warn!("容器探测失败: {err}");
                ProbeResult::down().with_detail(json!({ "error": err.to_string() }))
            }
        }
    }

    async fn survey(&self) -> serde_json::Value {
        let mut survey = serde_json::Map::new();

        // 所有容器列表
        let list_args = ["ps", "-a", "--format", "{{.Names}}\t{{.Status}}\t{{.Image}}"];
        match run_tool("docker", &list_args, PROBE_TIMEOUT).await {
            Ok(output) if output.status.success() => {
                let containers = parse_container_lines(&stdout_text(&output));
                survey.insert("all_containers".to_string(), json!(containers));
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                survey.insert("error".to_string(), json!(stderr.trim()));
            }
            Err(err) => {
                survey.insert("error".to_string(), json!(err.to_string()));
            }
        }

        // 目标容器详细信息
        match run_tool("docker", &["inspect", &self.name], PROBE_TIMEOUT).await {
            Ok(output) if output.status.success() => {
                match parse_inspect_document(&stdout_text(&output)) {
                    Ok(Some(container)) => {
                        survey.insert("target_container".to_string(), container);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        survey.insert("target_container_error".to_string(), json!(err.to_string()));
                    }
                }
            }
            Ok(_) => {
                survey.insert("target_container".to_string(), json!("not_found"));
            }
            Err(err) => {
                survey.insert("target_container_error".to_string(), json!(err.to_string()));
            }
        }

        serde_json::Value::Object(survey)
    }
}

/// 解析 `docker ps` 的制表符分隔输出
fn parse_container_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() >= 3 {
                Some(json!({
                    "name": parts[0],
                    "status": parts[1],
                    "image": parts[2],
                }))
            } else {
                None
            }
        })
        .collect()
}

/// 解析 `docker inspect` 的JSON输出，提取状态对象和容器名
///
/// 返回 `Ok(None)` 表示输出为空数组（容器不存在）。
fn parse_inspect_document(
    stdout: &str,
) -> Result<Option<serde_json::Value>, serde_json::Error> {
    let parsed: serde_json::Value = serde_json::from_str(stdout)?;
    Ok(parsed
        .as_array()
        .and_then(|containers| containers.first())
        .map(|container| {
            json!({
                "state": container.get("State").cloned().unwrap_or_else(|| json!({})),
                "name": container.get("Name").cloned().unwrap_or_else(|| json!("")),
            })
        }))
}
