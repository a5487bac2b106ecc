//! Printer Relay - 打印任务 HTTP 中继
//!
//! # 架构概述
//!
//! 接收浏览器/云端发来的 XML 打印任务，原样转发到固定的下游
//! (局域网打印机的 WebPRNT 接口，或下一跳中继)，并返回下游响应
//! 或合成的错误 (502 不可达 / 504 超时)。
//!
//! ```text
//! caller ──POST /print──▶ printer-relay ──POST──▶ printer / next relay
//!        ◀── status+XML ──               ◀──────
//! ```
//!
//! # 模块结构
//!
//! ```text
//! printer-relay/src/
//! ├── server/        # 配置、状态、中间件、启动
//! ├── routes/        # /health, /print, 404
//! └── utils/         # 错误映射、日志
//! ```
//!
//! 下游 HTTP 交互在 `printer-client` crate 中。

pub mod routes;
pub mod server;
pub mod utils;

pub use routes::build_app;
pub use server::{Config, RelayMode, Server, ServerError, ServerState, serve};
pub use utils::RelayError;

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 按配置初始化日志 (级别、格式、输出目录)
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
}

pub fn print_banner() {
    println!(
        r#"
    ____       _       __
   / __ \_____(_)___  / /_
  / /_/ / ___/ / __ \/ __/
 / ____/ /  / / / / / /_
/_/   /_/  /_/_/ /_/\__/   relay
    "#
    );
}
