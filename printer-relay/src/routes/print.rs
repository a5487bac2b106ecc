//! 打印任务转发
//!
//! 每个请求: 接收 → 缓冲完整请求体 → 转发 → {成功 | 不可达 | 超时}。
//! 请求体完整读取之前不会发起转发，因此不存在部分响应。

use axum::{
    Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{debug, warn};

use crate::server::ServerState;
use crate::utils::RelayError;

use super::not_found;

/// Content type of relayed downstream replies
pub const REPLY_CONTENT_TYPE: &str = "text/xml";

pub fn router() -> Router<ServerState> {
    Router::new().route("/print", post(print_job).fallback(not_found))
}

/// 转发打印任务到下游，原样返回下游状态码和响应体
pub async fn print_job(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, RelayError> {
    let job = body.map_err(|rejection| reject_body(rejection, state.config.max_body_bytes))?;
    debug!(job_len = job.len(), "Print job buffered, forwarding");

    let reply = state
        .printer
        .print(job)
        .await
        .map_err(|e| RelayError::from_print_error(&state.config.target_name, e))?;

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, [(CONTENT_TYPE, REPLY_CONTENT_TYPE)], reply.body).into_response())
}

fn reject_body(rejection: BytesRejection, limit: usize) -> RelayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(limit, "Print job rejected: body too large");
        RelayError::PayloadTooLarge { limit }
    } else {
        warn!(error = %rejection.body_text(), "Print job rejected: body unreadable");
        RelayError::BodyRead(rejection.body_text())
    }
}
