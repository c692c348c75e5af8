//! POS Server - 咖啡店销售终端服务
//!
//! # 架构概述
//!
//! 本模块是 POS Server 的主入口，提供以下核心功能：
//!
//! - **商品目录** (`catalog`): 内存权威库存状态
//! - **结账引擎** (`checkout`): 原子化的购物车提交事务
//! - **销售账本** (`ledger`): redb 只增销售记录
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── api/           # HTTP 路由和处理器
//! ├── catalog.rs     # 商品目录
//! ├── checkout/      # 结账事务引擎
//! ├── ledger/        # 销售账本
//! ├── reports.rs     # 报表聚合
//! ├── receipt.rs     # 小票渲染
//! ├── insights.rs    # AI 分析
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod insights;
pub mod ledger;
pub mod receipt;
pub mod reports;
pub mod seed;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use catalog::CatalogStore;
pub use checkout::{CheckoutEngine, CheckoutError};
pub use core::{Config, Server, ServerState};
pub use ledger::SaleLedger;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____ ___    ____________
  / ___//   |  /  _/ ____/ /
  \__ \/ /| |  / // /_  / /
 ___/ / ___ |_/ // __/ /_/
/____/_/  |_/___/_/   (_)
    POS Server
    "#
    );
}

/// 设置运行环境: dotenv + 日志
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在时静默忽略
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), None);

    Ok(())
}
