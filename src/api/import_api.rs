// ==========================================
// 发动机零部件成本移动看板 - 导入 API
// ==========================================
// 职责: 成本表导入入口, 返回导入汇总
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::importer::cost_importer::{CostSheetImporter, ImportSummary};
use crate::repository::part_repo::PartCatalogRepository;

// ==========================================
// ImportApi - 导入 API
// ==========================================
pub struct ImportApi {
    importer: CostSheetImporter,
}

impl ImportApi {
    pub fn new(part_repo: Arc<PartCatalogRepository>) -> Self {
        Self {
            importer: CostSheetImporter::new(part_repo),
        }
    }

    /// 导入一份成本表文件 (CSV/XLSX)
    pub fn import_cost_sheet(&self, file_path: &str) -> ApiResult<ImportSummary> {
        Ok(self.importer.import_file(file_path)?)
    }
}
