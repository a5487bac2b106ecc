use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use printer_client::RelayTarget;

use super::error::{Result, ServerError};

/// 转发模式
///
/// - `Printer`: 直连局域网打印机 (Star WebPRNT)
/// - `Relay`: 转发到下一跳中继 (例如通过 VPN 隧道可达的局域网中继)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMode {
    Printer,
    Relay,
}

impl RelayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayMode::Printer => "printer",
            RelayMode::Relay => "relay",
        }
    }

    pub fn default_timeout(&self) -> Duration {
        match self {
            RelayMode::Printer => Duration::from_secs(5),
            RelayMode::Relay => Duration::from_secs(10),
        }
    }

    pub fn default_target_port(&self) -> u16 {
        match self {
            RelayMode::Printer => 80,
            RelayMode::Relay => 3457,
        }
    }

    pub fn default_target_path(&self) -> &'static str {
        match self {
            RelayMode::Printer => "/StarWebPRNT/SendMessage",
            RelayMode::Relay => "/print",
        }
    }

    pub fn default_target_name(&self) -> &'static str {
        match self {
            RelayMode::Printer => "Printer",
            RelayMode::Relay => "Upstream relay",
        }
    }
}

impl FromStr for RelayMode {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "printer" | "direct" => Ok(RelayMode::Printer),
            "relay" | "chained" => Ok(RelayMode::Relay),
            other => Err(ServerError::Config(format!("Unknown RELAY_MODE: {}", other))),
        }
    }
}

/// 中继配置 - 启动时固定，运行期间不可重载
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | RELAY_BIND_ADDR | 0.0.0.0 | 监听地址 |
/// | RELAY_PORT | 3456 | 监听端口 |
/// | RELAY_MODE | printer | `printer` 或 `relay` |
/// | RELAY_TARGET_HOST | 192.168.1.100 | 下游主机 |
/// | RELAY_TARGET_PORT | 80 / 3457 | 下游端口 (按模式) |
/// | RELAY_TARGET_PATH | /StarWebPRNT/SendMessage / /print | 下游路径 (按模式) |
/// | RELAY_TARGET_NAME | Printer / Upstream relay | 错误信息中的下游名称 |
/// | RELAY_TIMEOUT_MS | 5000 / 10000 | 下游超时(毫秒) |
/// | RELAY_MAX_BODY_BYTES | 1048576 | 打印任务最大字节数 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_FORMAT | text | `text` 或 `json` |
/// | LOG_DIR | (未设置) | 日志目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// RELAY_MODE=relay RELAY_TARGET_HOST=100.79.171.122 cargo run -p printer-relay
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub bind_addr: IpAddr,
    /// HTTP 监听端口
    pub http_port: u16,
    /// 转发模式
    pub mode: RelayMode,
    /// 下游主机
    pub target_host: String,
    /// 下游端口
    pub target_port: u16,
    /// 下游路径
    pub target_path: String,
    /// 下游名称，用于 "<name> unreachable" / "<name> timeout"
    pub target_name: String,
    /// 单次转发超时
    pub timeout: Duration,
    /// 请求体上限 (字节)
    pub max_body_bytes: usize,
    /// 日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
    /// 日志目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 测试中使用，避免修改进程环境变量
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode: RelayMode = match lookup("RELAY_MODE") {
            Some(v) => v.parse()?,
            None => RelayMode::Printer,
        };

        let timeout = parse_var::<_, u64>(&lookup, "RELAY_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or_else(|| mode.default_timeout());

        Ok(Self {
            bind_addr: parse_var(&lookup, "RELAY_BIND_ADDR")?
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            http_port: parse_var(&lookup, "RELAY_PORT")?.unwrap_or(3456),
            mode,
            target_host: lookup("RELAY_TARGET_HOST").unwrap_or_else(|| "192.168.1.100".into()),
            target_port: parse_var(&lookup, "RELAY_TARGET_PORT")?
                .unwrap_or_else(|| mode.default_target_port()),
            target_path: lookup("RELAY_TARGET_PATH")
                .unwrap_or_else(|| mode.default_target_path().into()),
            target_name: lookup("RELAY_TARGET_NAME")
                .unwrap_or_else(|| mode.default_target_name().into()),
            timeout,
            max_body_bytes: parse_var(&lookup, "RELAY_MAX_BODY_BYTES")?.unwrap_or(1024 * 1024),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|v| !v.is_empty()),
        })
    }

    /// 指向指定下游的配置
    ///
    /// 常用于测试场景
    pub fn for_target(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.target_host = host.into();
        config.target_port = port;
        config.target_path = path.into();
        config
    }

    /// 校验配置并构造下游目标
    pub fn target(&self) -> Result<RelayTarget> {
        RelayTarget::new(&self.target_host, self.target_port, &self.target_path)
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// 启动前校验
    pub fn validate(&self) -> Result<()> {
        self.target()?;
        if self.timeout.is_zero() {
            return Err(ServerError::Config("RELAY_TIMEOUT_MS must be > 0".into()));
        }
        if self.max_body_bytes == 0 {
            return Err(ServerError::Config(
                "RELAY_MAX_BODY_BYTES must be > 0".into(),
            ));
        }
        if self.target_name.trim().is_empty() {
            return Err(ServerError::Config("RELAY_TARGET_NAME is empty".into()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mode = RelayMode::Printer;
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 3456,
            mode,
            target_host: "192.168.1.100".into(),
            target_port: mode.default_target_port(),
            target_path: mode.default_target_path().into(),
            target_name: mode.default_target_name().into(),
            timeout: mode.default_timeout(),
            max_body_bytes: 1024 * 1024,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

/// 解析可选的环境变量；值存在但无法解析时报错，而不是静默回退
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ServerError::Config(format!("Invalid {}={}: {}", key, raw, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_printer_mode() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.mode, RelayMode::Printer);
        assert_eq!(config.http_port, 3456);
        assert_eq!(config.target_port, 80);
        assert_eq!(config.target_path, "/StarWebPRNT/SendMessage");
        assert_eq!(config.target_name, "Printer");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        config.validate().unwrap();
    }

    #[test]
    fn test_relay_mode_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("RELAY_MODE", "relay"),
            ("RELAY_TARGET_HOST", "100.79.171.122"),
        ]))
        .unwrap();
        assert_eq!(config.mode, RelayMode::Relay);
        assert_eq!(config.target_port, 3457);
        assert_eq!(config.target_path, "/print");
        assert_eq!(config.target_name, "Upstream relay");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.target().unwrap().to_string(), "100.79.171.122:3457");
    }

    #[test]
    fn test_explicit_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("RELAY_PORT", "8080"),
            ("RELAY_BIND_ADDR", "127.0.0.1"),
            ("RELAY_TIMEOUT_MS", "250"),
            ("RELAY_TARGET_NAME", "Kitchen printer"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.target_name, "Kitchen printer");
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("RELAY_MODE", "carrier-pigeon")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("RELAY_PORT", "http")])).is_err());

        let config = Config::from_lookup(lookup_from(&[("RELAY_TARGET_HOST", "")])).unwrap();
        assert!(config.validate().is_err());

        let config = Config::from_lookup(lookup_from(&[("RELAY_TARGET_PORT", "0")])).unwrap();
        assert!(config.validate().is_err());

        let config = Config::from_lookup(lookup_from(&[("RELAY_TARGET_PATH", "print")])).unwrap();
        assert!(config.validate().is_err());

        let config = Config::from_lookup(lookup_from(&[("RELAY_TIMEOUT_MS", "0")])).unwrap();
        assert!(config.validate().is_err());
    }
}
