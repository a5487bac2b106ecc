//! 健康检查路由
//!
//! 只反映进程自身状态，不探测下游

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::server::ServerState;

use super::not_found;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health).head(not_found).fallback(not_found))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    /// 下游 `host:port`
    printer: String,
    mode: &'static str,
    target: String,
    path: String,
    version: &'static str,
    uptime_seconds: u64,
}

/// 基础健康检查
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let target = state.printer.target();

    Json(HealthResponse {
        status: "ok",
        printer: target.to_string(),
        mode: state.config.mode.as_str(),
        target: state.config.target_name.clone(),
        path: target.path().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}
