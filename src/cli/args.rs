//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::config::{CheckStrategy, ProbeMode};
use clap::{Parser, Subcommand, ValueEnum};

/// Minecraft Vitals - Minecraft 服务端存活探测HTTP服务
#[derive(Parser, Debug, Clone)]
#[command(
    name = "minecraft-vitals",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 监听端口
    #[arg(
        short,
        long,
        value_name = "PORT",
        default_value_t = 8080,
        help = "HTTP监听端口",
        env = "HEALTH_CHECK_PORT"
    )]
    pub port: u16,

    /// 监听地址
    #[arg(
        long,
        value_name = "ADDR",
        default_value = "0.0.0.0",
        help = "HTTP监听地址",
        env = "MINECRAFT_VITALS_BIND"
    )]
    pub bind_address: String,

    /// 探测模式
    #[arg(
        short,
        long,
        value_enum,
        default_value = "process",
        help = "探测模式（宿主机进程或Docker容器）",
        env = "MINECRAFT_VITALS_MODE"
    )]
    pub mode: ProbeMode,

    /// 进程匹配模式
    #[arg(
        long,
        value_name = "PATTERN",
        default_value = "bedrock_server",
        help = "进程模式下 pgrep -f 使用的匹配模式",
        env = "MINECRAFT_PROCESS_NAME"
    )]
    pub process_name: String,

    /// 容器名称
    #[arg(
        long,
        value_name = "NAME",
        default_value = "paper",
        help = "容器模式下监控的Docker容器名称",
        env = "DOCKER_CONTAINER_NAME"
    )]
    pub container_name: String,

    /// 检查策略
    #[arg(
        short,
        long,
        value_enum,
        default_value = "cached",
        help = "检查策略（后台缓存或请求时即时探测）",
        env = "MINECRAFT_VITALS_STRATEGY"
    )]
    pub strategy: CheckStrategy,

    /// 探测间隔（秒）
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = 5,
        help = "缓存策略下的后台探测间隔（秒）",
        env = "CHECK_INTERVAL_SECONDS"
    )]
    pub interval: u64,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        help = "日志级别",
        env = "MINECRAFT_VITALS_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 以JSON格式输出日志
    #[arg(long, help = "以JSON格式输出日志", env = "MINECRAFT_VITALS_LOG_JSON")]
    pub log_json: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 启动HTTP探测服务（默认）
    Serve,

    /// 执行一次探测并以JSON输出结果
    ///
    /// 目标存活时退出码为0，否则为1。适合cron或容器HEALTHCHECK使用。
    Check,
}

impl Args {
    /// 解析命令行参数
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        let args = Args::try_parse_from(["minecraft-vitals"]).unwrap();

        assert_eq!(args.port, 8080);
        assert_eq!(args.bind_address, "0.0.0.0");
        assert_eq!(args.mode, ProbeMode::Process);
        assert_eq!(args.process_name, "bedrock_server");
        assert_eq!(args.container_name, "paper");
        assert_eq!(args.strategy, CheckStrategy::Cached);
        assert_eq!(args.interval, 5);
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(!args.log_json);
        assert!(args.command.is_none());
    }

    #[test]
    #[serial]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "minecraft-vitals",
            "--port",
            "9090",
            "--mode",
            "docker",
            "--container-name",
            "velocity",
            "--strategy",
            "direct",
            "--interval",
            "30",
        ])
        .unwrap();

        assert_eq!(args.port, 9090);
        assert_eq!(args.mode, ProbeMode::Docker);
        assert_eq!(args.container_name, "velocity");
        assert_eq!(args.strategy, CheckStrategy::Direct);
        assert_eq!(args.interval, 30);
    }

    #[test]
    #[serial]
    fn test_env_overrides_defaults() {
        std::env::set_var("HEALTH_CHECK_PORT", "18080");
        std::env::set_var("MINECRAFT_PROCESS_NAME", "java");

        let args = Args::try_parse_from(["minecraft-vitals"]).unwrap();

        std::env::remove_var("HEALTH_CHECK_PORT");
        std::env::remove_var("MINECRAFT_PROCESS_NAME");

        assert_eq!(args.port, 18080);
        assert_eq!(args.process_name, "java");
    }

    #[test]
    #[serial]
    fn test_check_subcommand() {
        let args = Args::try_parse_from(["minecraft-vitals", "check"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Check)));

        let args = Args::try_parse_from(["minecraft-vitals", "serve"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Serve)));
    }

    #[test]
    #[serial]
    fn test_rejects_unknown_mode() {
        assert!(Args::try_parse_from(["minecraft-vitals", "--mode", "kubernetes"]).is_err());
    }
}
