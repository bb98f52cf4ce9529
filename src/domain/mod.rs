// ==========================================
// 发动机零部件成本移动看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、结构一致性规则
// 红线: 不含数据访问逻辑, 不含展示逻辑
// ==========================================

pub mod cost;
pub mod request;
pub mod types;

// 重导出核心类型
pub use cost::{
    CostBreakdown, CostComponent, EnginePart, LvaPurchase, NonLvaPurchase, PartSummary,
    ProcessingCost, SubPartCost, TotalMismatch,
};
pub use request::CostDataRequest;
pub use types::{ComponentKey, DiffTone, DqLevel, RequestStatus};
