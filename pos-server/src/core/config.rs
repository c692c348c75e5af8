use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATA_DIR | ./data | 数据目录 (账本、日志) |
/// | STORE_NAME | SAIF Cafe | 小票抬头 |
/// | ADMIN_PASSWORD | admin | 管理员初始密码 |
/// | CASHIER_PASSWORD | cashier | 收银员初始密码 |
/// | INSIGHTS_API_URL | (无) | 分析 API 地址 |
/// | INSIGHTS_API_KEY | (无) | 分析 API 密钥 |
/// | SEED_DEMO_DATA | true | 启动时写入演示数据 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/data/pos HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据目录，存储账本和日志文件
    pub data_dir: String,
    /// 小票抬头 / 店名
    pub store_name: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 管理员初始密码
    pub admin_password: String,
    /// 收银员初始密码
    pub cashier_password: String,
    /// 分析 API 地址
    pub insights_api_url: String,
    /// 分析 API 密钥 (未配置时 AI 功能降级)
    pub insights_api_key: Option<String>,
    /// 启动时写入演示数据
    pub seed_demo_data: bool,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            store_name: std::env::var("STORE_NAME").unwrap_or_else(|_| "SAIF Cafe".into()),
            jwt: JwtConfig::default(),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into()),
            cashier_password: std::env::var("CASHIER_PASSWORD")
                .unwrap_or_else(|_| "cashier".into()),
            insights_api_url: std::env::var("INSIGHTS_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000/v1/complete".into()),
            insights_api_key: std::env::var("INSIGHTS_API_KEY").ok(),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 账本数据库文件路径
    pub fn ledger_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("ledger.redb")
    }

    /// 确保数据目录存在
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
