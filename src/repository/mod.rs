// ==========================================
// 发动机零部件成本移动看板 - 数据仓储层
// ==========================================
// 职责: SQLite 数据访问, 装配领域实体
// 红线: 不含业务规则
// ==========================================

pub mod error;
pub mod part_repo;
pub mod request_repo;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use part_repo::{ComponentUpsert, PartCatalogRepository, PartCostUpsert, SubPartUpsert};
pub use request_repo::CostRequestRepository;
