// ==========================================
// 发动机零部件成本移动看板 - 配置层
// ==========================================
// 职责: 系统配置读取与覆写
// ==========================================

pub mod config_manager;
pub mod dashboard_config_trait;

// 重导出核心类型
pub use config_manager::{config_keys, ConfigManager};
pub use dashboard_config_trait::DashboardConfigReader;
