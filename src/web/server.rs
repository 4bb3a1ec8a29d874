//! Web服务器实现
//!
//! 构建axum路由并运行HTTP服务

use super::{handlers, AppState};
use crate::error::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 构建应用路由
///
/// `/health` 与 `/debug` 之外的路径一律返回空body的404。
/// 所有请求经由 TraceLayer 记录方法、路径与状态码。
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/debug", get(handlers::debug_report))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 运行HTTP服务直到收到停机信号
///
/// # 参数
/// * `listener` - 已绑定的TCP监听器
/// * `state` - Web应用共享状态
/// * `shutdown` - 停机信号接收器
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = listener.local_addr()?;
    let router = build_router(state);

    info!("HTTP服务已启动: http://{addr}");
    info!("健康检查端点: http://{addr}/health");
    info!("调试端点: http://{addr}/debug");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            info!("接收到停机信号，正在关闭HTTP服务...");
        })
        .await?;

    info!("HTTP服务已关闭");
    Ok(())
}
