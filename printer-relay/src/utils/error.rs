//! 请求级错误处理
//!
//! [`RelayError`] 描述一次 `/print` 请求的失败终态，并映射为 HTTP 响应：
//!
//! | 错误 | 状态码 | 响应体 |
//! |------|--------|--------|
//! | `Unreachable` | 502 | `{"error": "<name> unreachable", "details": "..."}` |
//! | `Timeout` | 504 | `{"error": "<name> timeout"}` |
//! | `PayloadTooLarge` | 413 | `{"error": "Print job too large", "details": "..."}` |
//! | `BodyRead` | 400 | `{"error": "Failed to read print job", "details": "..."}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use printer_client::PrintError;
use serde::Serialize;

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// 下游连接失败 (502)
    #[error("{target} unreachable")]
    Unreachable { target: String, details: String },

    /// 下游超时 (504)
    #[error("{target} timeout")]
    Timeout { target: String },

    /// 请求体超过上限 (413)
    #[error("Print job too large")]
    PayloadTooLarge { limit: usize },

    /// 请求体读取失败 (400)
    #[error("Failed to read print job")]
    BodyRead(String),
}

impl RelayError {
    /// 将下游错误映射为请求错误，`target` 为错误信息中的下游名称
    pub fn from_print_error(target: &str, err: PrintError) -> Self {
        match err {
            PrintError::Timeout(_) => RelayError::Timeout {
                target: target.to_string(),
            },
            PrintError::Unreachable(details)
            | PrintError::InvalidConfig(details)
            | PrintError::Client(details) => RelayError::Unreachable {
                target: target.to_string(),
                details,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Unreachable { .. } => StatusCode::BAD_GATEWAY,
            RelayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::BodyRead(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            RelayError::Unreachable { details, .. } => Some(details.clone()),
            RelayError::Timeout { .. } => None,
            RelayError::PayloadTooLarge { limit } => Some(format!("limit is {} bytes", limit)),
            RelayError::BodyRead(details) => Some(details.clone()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}
