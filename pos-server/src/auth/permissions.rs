//! Permission Definitions
//!
//! Simplified RBAC: basic POS operation (catalog browsing, checkout)
//! requires login only; everything that changes inventory or reads
//! aggregated data is gated on a permission.

use shared::models::Role;

/// 库存管理（商品 增删改）
pub const INVENTORY_MANAGE: &str = "inventory:manage";
/// 报表查看
pub const REPORTS_VIEW: &str = "reports:view";
/// AI 分析查询
pub const INSIGHTS_QUERY: &str = "insights:query";

/// Admin 拥有超级权限
pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

/// 收银员：POS 基础操作（登录即可），无管理权限
pub const DEFAULT_CASHIER_PERMISSIONS: &[&str] = &[];

/// Get permissions for a role
pub fn permissions_for_role(role: Role) -> Vec<String> {
    let perms = match role {
        Role::Admin => DEFAULT_ADMIN_PERMISSIONS,
        Role::Cashier => DEFAULT_CASHIER_PERMISSIONS,
    };
    perms.iter().map(|s| s.to_string()).collect()
}
