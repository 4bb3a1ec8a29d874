//! 探测结果数据结构
//!
//! 定义探测目标、存活状态和单次探测结果类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 存活状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    /// 目标正在运行
    Up,
    /// 目标未运行
    Down,
}

impl std::fmt::Display for Liveness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Liveness::Up => write!(f, "运行中"),
            Liveness::Down => write!(f, "未运行"),
        }
    }
}

impl Liveness {
    /// 判断目标是否存活
    pub fn is_up(&self) -> bool {
        matches!(self, Liveness::Up)
    }
}

/// 探测目标
///
/// 描述被监控的 Minecraft 服务端的运行形态：宿主机进程或 Docker 容器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProbeTarget {
    /// 宿主机进程，按命令行模式匹配
    Process {
        /// pgrep -f 使用的匹配模式
        pattern: String,
    },
    /// Docker 容器，按容器名称匹配
    Container {
        /// 容器名称
        name: String,
    },
}

impl std::fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeTarget::Process { pattern } => write!(f, "进程 {pattern}"),
            ProbeTarget::Container { name } => write!(f, "容器 {name}"),
        }
    }
}

/// 单次探测结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// 探测ID
    pub id: Uuid,
    /// 存活状态
    pub status: Liveness,
    /// 探测时间戳
    pub checked_at: DateTime<Utc>,
    /// 探测细节（匹配到的PID、容器状态、失败原因等）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ProbeResult {
    /// 创建新的探测结果
    pub fn new(status: Liveness) -> Self {
        Self {
            id: Uuid::new_v4(),
            status,
            checked_at: Utc::now(),
            detail: None,
        }
    }

    /// 创建存活结果
    pub fn up() -> Self {
        Self::new(Liveness::Up)
    }

    /// 创建未运行结果
    pub fn down() -> Self {
        Self::new(Liveness::Down)
    }

    /// 附加探测细节
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// 判断目标是否存活
    pub fn is_up(&self) -> bool {
        self.status.is_up()
    }

    /// 转换为JSON字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_display() {
        assert_eq!(Liveness::Up.to_string(), "运行中");
        assert_eq!(Liveness::Down.to_string(), "未运行");
    }

    #[test]
    fn test_liveness_is_up() {
        assert!(Liveness::Up.is_up());
        assert!(!Liveness::Down.is_up());
    }

    #[test]
    fn test_probe_target_display() {
        let process = ProbeTarget::Process {
            pattern: "bedrock_server".to_string(),
        };
        assert_eq!(process.to_string(), "进程 bedrock_server");

        let container = ProbeTarget::Container {
            name: "paper".to_string(),
        };
        assert_eq!(container.to_string(), "容器 paper");
    }

    #[test]
    fn test_probe_target_serialization() {
        let target = ProbeTarget::Process {
            pattern: "bedrock_server".to_string(),
        };
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["kind"], "process");
        assert_eq!(json["pattern"], "bedrock_server");

        let target = ProbeTarget::Container {
            name: "paper".to_string(),
        };
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["kind"], "container");
        assert_eq!(json["name"], "paper");
    }

    #[test]
    fn test_probe_result_builder_pattern() {
        let result = ProbeResult::up().with_detail(serde_json::json!({"pids": [1234]}));

        assert!(result.is_up());
        assert_eq!(result.status, Liveness::Up);
        assert_eq!(
            result.detail,
            Some(serde_json::json!({"pids": [1234]}))
        );
    }

    #[test]
    fn test_probe_result_serialization() {
        let result = ProbeResult::down();
        let json = result.to_json().unwrap();

        assert!(json.contains("down"));
        assert!(json.contains("checked_at"));
        // detail 为 None 时不出现在序列化结果中
        assert!(!json.contains("detail"));
    }

    #[test]
    fn test_probe_result_unique_ids() {
        let a = ProbeResult::up();
        let b = ProbeResult::up();
        assert_ne!(a.id, b.id);
    }
}
