use std::sync::Arc;

use crate::auth::{permissions, JwtService, UserDirectory};
use crate::catalog::CatalogStore;
use crate::checkout::CheckoutEngine;
use crate::core::Config;
use crate::insights::InsightsService;
use crate::ledger::SaleLedger;
use crate::seed;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | catalog | 商品目录 (内存权威状态) |
/// | ledger | 销售账本 (redb) |
/// | engine | 结账事务引擎 |
/// | jwt_service | JWT 认证服务 |
/// | users | 用户目录 |
/// | insights | AI 分析服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub catalog: CatalogStore,
    pub ledger: SaleLedger,
    pub engine: CheckoutEngine,
    pub jwt_service: Arc<JwtService>,
    pub users: Arc<UserDirectory>,
    pub insights: InsightsService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据目录
    /// 2. 销售账本 (data_dir/ledger.redb)
    /// 3. 商品目录 + 演示数据
    /// 4. 结账引擎、认证、分析服务
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_data_dir()?;

        let ledger = SaleLedger::open(config.ledger_path())?;
        let catalog = CatalogStore::new();

        if config.seed_demo_data {
            catalog.seed(seed::demo_products());
            ledger.seed_if_empty(seed::demo_sales())?;
        }

        let engine = CheckoutEngine::new(catalog.clone(), ledger.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let users = Arc::new(UserDirectory::new(
            &config.admin_password,
            &config.cashier_password,
        )?);
        let insights = InsightsService::new(
            config.insights_api_url.clone(),
            config.insights_api_key.clone(),
        );

        Ok(Self {
            config: config.clone(),
            catalog,
            ledger,
            engine,
            jwt_service,
            users,
            insights,
        })
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 为用户生成访问令牌
    pub fn issue_token(
        &self,
        user: &shared::models::User,
    ) -> Result<String, crate::auth::JwtError> {
        let perms = permissions::permissions_for_role(user.role);
        self.jwt_service
            .generate_token(&user.id, &user.email, user.role, &perms)
    }
}
