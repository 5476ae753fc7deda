//! 应用配置加载和管理

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// 应用配置结构
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub trends: TrendSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 表示按 CPU 核数
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

/// 区域数据源配置
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// 区域 CSV 文件路径
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    /// 读取超时（毫秒）
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

fn default_csv_path() -> String { "data/power_data_regions_full.csv".to_string() }
fn default_read_timeout_ms() -> u64 { 2000 }

/// 趋势模拟配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TrendSettings {
    /// 固定随机种子；不设置时使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,
}

/// 内存存储配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreSettings {
    /// 启动时写入演示数据
    #[serde(default)]
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` 或 `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl LoggingSettings {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Settings {
    /// 从配置文件和环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let settings = Config::builder()
            // 默认配置（可缺省）
            .add_source(File::with_name("config/default").required(false))
            // 根据环境加载对应配置
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // 环境变量覆盖，前缀 SPAS，分隔符 __
            .add_source(
                Environment::with_prefix("SPAS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// 获取服务器地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 实际工作线程数
    pub fn workers(&self) -> usize {
        if self.server.workers == 0 {
            num_cpus::get()
        } else {
            self.server.workers
        }
    }
}
