//! Minecraft Vitals 主程序入口
//!
//! Minecraft 服务端存活探测HTTP服务

use anyhow::{Context, Result};
use minecraft_vitals::cli::{Args, Commands};
use minecraft_vitals::config::{CheckStrategy, Settings};
use minecraft_vitals::health::{
    DockerProber, ProbeScheduler, ProbeTarget, Prober, ProcessProber, StatusStore,
};
use minecraft_vitals::logging::{LogConfig, LoggingSystem};
use minecraft_vitals::web::{self, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse_args();

    // 初始化日志系统
    let log_config = LogConfig {
        level: args.log_level.into(),
        json_format: args.log_json,
        ..Default::default()
    };

    LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!(
        "{} v{} 启动",
        minecraft_vitals::APP_NAME,
        minecraft_vitals::VERSION
    );

    // 执行命令
    if let Err(e) = execute_command(&args).await {
        error!("命令执行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 执行CLI命令
async fn execute_command(args: &Args) -> Result<()> {
    match args.command {
        None | Some(Commands::Serve) => run_server(args).await,
        Some(Commands::Check) => run_check(args).await,
    }
}

/// 根据探测目标构建对应的探测器
fn build_prober(settings: &Settings) -> Arc<dyn Prober> {
    match &settings.target {
        ProbeTarget::Process { pattern } => Arc::new(ProcessProber::new(pattern.clone())),
        ProbeTarget::Container { name } => Arc::new(DockerProber::new(name.clone())),
    }
}

/// 执行一次探测并以JSON输出结果
///
/// 目标存活时进程以0退出，否则以1退出。
async fn run_check(args: &Args) -> Result<()> {
    let settings = Settings::from_args(args).context("解析配置失败")?;
    let prober = build_prober(&settings);

    // 确认探测工具可用
    prober
        .verify_tool()
        .await
        .with_context(|| format!("探测工具 {} 不可用", prober.tool()))?;

    let result = prober.probe().await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.is_up() {
        std::process::exit(1);
    }

    Ok(())
}

/// 启动HTTP探测服务
///
/// 按以下顺序完成启动：
/// 1. 解析并校验配置
/// 2. 确认探测工具可用（不可用则直接退出）
/// 3. 缓存策略下启动后台探测调度器
/// 4. 注册中断信号处理
/// 5. 绑定监听地址并启动HTTP服务
///
/// 收到中断信号后，HTTP服务和调度器会依次优雅停止。
async fn run_server(args: &Args) -> Result<()> {
    let settings = Settings::from_args(args).context("解析配置失败")?;

    info!(
        "探测目标: {}，策略: {}，探测间隔: {}秒",
        settings.target, settings.strategy, settings.check_interval_seconds
    );
    debug!("生效配置: {}", serde_json::to_string(&settings)?);

    let prober = build_prober(&settings);

    // 启动前确认探测工具可用
    prober
        .verify_tool()
        .await
        .with_context(|| format!("探测工具 {} 不可用", prober.tool()))?;

    let store = Arc::new(StatusStore::new());
    let state = AppState::new(Arc::clone(&store), Arc::clone(&prober), settings.strategy);

    // 创建关闭信号通道，初始接收端留给HTTP服务
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    // 缓存策略下启动后台探测调度器
    let scheduler_handle = if settings.strategy == CheckStrategy::Cached {
        let scheduler = ProbeScheduler::new(
            Arc::clone(&prober),
            Arc::clone(&store),
            settings.check_interval(),
        );
        Some(tokio::spawn(scheduler.run(shutdown_tx.subscribe())))
    } else {
        info!("即时探测策略，不启动后台调度器");
        None
    };

    // 接收端全部就绪后再注册信号处理，启动窗口内的信号不会落空
    setup_signal_handlers(&shutdown_tx);

    // 绑定监听地址
    let addr = settings.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("绑定监听地址失败: {}", addr))?;

    // 启动HTTP服务并等待关闭信号
    web::serve(listener, state, shutdown_rx).await?;

    // 等待调度器退出
    if let Some(handle) = scheduler_handle {
        if let Err(e) = handle.await {
            error!("等待调度器退出失败: {}", e);
        } else {
            info!("后台调度器已停止");
        }
    }

    info!("服务已停止");
    Ok(())
}

/// 注册中断信号处理
///
/// 监听Ctrl+C与SIGTERM（Unix），收到任一信号后广播关闭事件。
fn setup_signal_handlers(shutdown_tx: &broadcast::Sender<()>) {
    // 设置Ctrl+C信号处理
    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("收到中断信号，正在停止服务...");
                let _ = shutdown_tx_clone.send(());
            }
            Err(err) => {
                error!("监听中断信号失败: {}", err);
            }
        }
    });

    // 设置SIGTERM信号处理（docker stop等场景）
    #[cfg(unix)]
    {
        let shutdown_tx_clone = shutdown_tx.clone();
        tokio::spawn(async move {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    if sigterm.recv().await.is_some() {
                        info!("收到SIGTERM信号，正在停止服务...");
                        let _ = shutdown_tx_clone.send(());
                    }
                }
                Err(err) => {
                    error!("监听SIGTERM信号失败: {}", err);
                }
            }
        });
    }
}
