// ==========================================
// 发动机零部件成本移动看板 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 Tauri 命令调用
// ==========================================

pub mod comparison_api;
pub mod error;
pub mod import_api;
pub mod notification_api;
pub mod part_api;

// 重导出核心类型
pub use comparison_api::ComparisonApi;
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use notification_api::NotificationApi;
pub use part_api::PartApi;
