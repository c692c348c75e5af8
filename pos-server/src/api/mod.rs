//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`products`] - 商品管理接口
//! - [`checkout`] - 结账接口
//! - [`sales`] - 销售记录接口
//! - [`reports`] - 报表接口
//! - [`insights`] - AI 分析接口

pub mod auth;
pub mod checkout;
pub mod health;
pub mod insights;
pub mod products;
pub mod reports;
pub mod sales;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
