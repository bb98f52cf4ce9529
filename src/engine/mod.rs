// ==========================================
// 发动机零部件成本移动看板 - 引擎层
// ==========================================
// 职责: 零件筛选与对比启动的业务规则
// 红线: 纯内存变换, 不含数据访问逻辑
// ==========================================

pub mod comparison;
pub mod filter;

// 重导出核心类型
pub use comparison::{start_comparison, ComparisonRoute, SelectionError};
pub use filter::{filter_by_prefix, PartSelection};
