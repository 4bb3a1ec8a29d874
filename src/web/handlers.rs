//! Web 路由处理函数
//!
//! 实现 /health、/debug 和兜底404的处理逻辑

use super::AppState;
use crate::config::CheckStrategy;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// /health 响应体
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 总体状态："ok" 或 "error"
    pub status: &'static str,
    /// Minecraft 服务端状态："running" 或 "not_running"
    pub minecraft: &'static str,
    /// 最近一次后台探测时间（仅缓存策略下存在快照时）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check: Option<DateTime<Utc>>,
}

impl HealthResponse {
    fn running(last_check: Option<DateTime<Utc>>) -> Self {
        Self {
            status: "ok",
            minecraft: "running",
            last_check,
        }
    }

    fn not_running(last_check: Option<DateTime<Utc>>) -> Self {
        Self {
            status: "error",
            minecraft: "not_running",
            last_check,
        }
    }
}

/// /health 端点处理函数
///
/// 缓存策略下只读取状态存储，响应耗时与探测耗时无关；
/// 即时策略下每次请求执行一次探测。尚无快照视为未运行。
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.strategy {
        CheckStrategy::Cached => match state.store.read().await {
            Some(snapshot) if snapshot.is_up() => (
                StatusCode::OK,
                Json(HealthResponse::running(Some(snapshot.checked_at))),
            ),
            Some(snapshot) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::not_running(Some(snapshot.checked_at))),
            ),
            // 首次探测尚未完成
            None => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::not_running(None)),
            ),
        },
        CheckStrategy::Direct => {
            let result = state.prober.probe().await;
            if result.is_up() {
                (StatusCode::OK, Json(HealthResponse::running(None)))
            } else {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(HealthResponse::not_running(None)),
                )
            }
        }
    }
}

/// /debug 端点处理函数
///
/// 始终返回200；探测层面的异常体现在文档字段中。
pub async fn debug_report(State(state): State<AppState>) -> impl IntoResponse {
    let doc = state.reporter.report().await;
    (StatusCode::OK, Json(doc))
}

/// 兜底处理函数：未知路径返回空body的404
pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
