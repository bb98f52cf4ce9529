// ==========================================
// 发动机零部件成本移动看板 - 导入层
// ==========================================
// 职责: 成本表文件 (CSV/XLSX) → DQ 校验 → 零件成本落库
// ==========================================

pub mod cost_importer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use cost_importer::{CostSheetImporter, DqViolation, ImportSummary, TOTAL_TOLERANCE};
pub use error::{ImportError, ImportModuleResult};
pub use field_mapper::RawCostRow;
pub use file_parser::UniversalFileParser;
