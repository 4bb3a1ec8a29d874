//! 配置数据结构定义
//!
//! 定义应用程序的不可变配置结构体和验证逻辑

use crate::cli::Args;
use crate::error::ConfigError;
use crate::health::ProbeTarget;
use clap::ValueEnum;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// 探测模式
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeMode {
    /// 宿主机进程（pgrep）
    Process,
    /// Docker容器（docker CLI）
    Docker,
}

impl std::fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeMode::Process => write!(f, "process"),
            ProbeMode::Docker => write!(f, "docker"),
        }
    }
}

/// 检查策略
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStrategy {
    /// 后台定期探测，请求时读取缓存
    Cached,
    /// 每次请求时即时探测
    Direct,
}

impl std::fmt::Display for CheckStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStrategy::Cached => write!(f, "cached"),
            CheckStrategy::Direct => write!(f, "direct"),
        }
    }
}

/// 应用配置
///
/// 启动时从命令行参数和环境变量解析一次，之后不再变更。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// HTTP监听地址
    pub bind_address: IpAddr,
    /// HTTP监听端口
    pub port: u16,
    /// 探测目标
    pub target: ProbeTarget,
    /// 检查策略
    pub strategy: CheckStrategy,
    /// 后台探测间隔（秒）
    pub check_interval_seconds: u64,
}

impl Settings {
    /// 从命令行参数解析配置
    ///
    /// # 参数
    /// * `args` - 已解析的命令行参数
    ///
    /// # 返回
    /// * `Result<Self, ConfigError>` - 验证通过的配置，非法取值直接报错
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let bind_address: IpAddr =
            args.bind_address
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "bind-address".to_string(),
                    value: args.bind_address.clone(),
                })?;

        if args.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: "0".to_string(),
            });
        }

        if args.interval == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval".to_string(),
                value: "0".to_string(),
            });
        }

        let target = match args.mode {
            ProbeMode::Process => {
                let pattern = args.process_name.trim();
                if pattern.is_empty() {
                    return Err(ConfigError::ValidationError(
                        "进程匹配模式不能为空".to_string(),
                    ));
                }
                ProbeTarget::Process {
                    pattern: pattern.to_string(),
                }
            }
            ProbeMode::Docker => {
                let name = args.container_name.trim();
                if name.is_empty() {
                    return Err(ConfigError::ValidationError(
                        "容器名称不能为空".to_string(),
                    ));
                }
                ProbeTarget::Container {
                    name: name.to_string(),
                }
            }
        };

        Ok(Self {
            bind_address,
            port: args.port,
            target,
            strategy: args.strategy,
            check_interval_seconds: args.interval,
        })
    }

    /// HTTP监听的套接字地址
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// 后台探测间隔
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }
}
