use std::sync::Arc;
use std::time::Instant;

use printer_client::PrinterClient;

use super::config::Config;
use super::error::{Result, ServerError};

/// 服务器状态 - 所有请求共享，只读
///
/// 请求之间没有可变共享状态：每个请求持有自己的请求体和下游连接。
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub printer: PrinterClient,
    pub started_at: Instant,
}

impl ServerState {
    /// 校验配置并构建下游客户端
    pub fn initialize(config: &Config) -> Result<Self> {
        config.validate()?;

        let printer = PrinterClient::new(config.target()?, config.timeout)
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config.clone()),
            printer,
            started_at: Instant::now(),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
