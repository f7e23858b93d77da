//! PassPrive 合作伙伴后端
//!
//! 面向商家、餐厅和企业账户的管理服务：
//! 预订、评价、订单结算、商品库存、礼品卡和员工导入。

pub mod analytics;
pub mod api;
pub mod core;
pub mod db;
pub mod import;
pub mod inventory;
pub mod settlement;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
