// ==========================================
// 发动机零部件成本移动看板 - 零件 API
// ==========================================
// 职责: 零件目录查询、前缀筛选、成本档案查询
// ==========================================

use std::sync::Arc;

use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, DashboardConfigReader};
use crate::domain::cost::{EnginePart, PartSummary};
use crate::engine::filter::filter_by_prefix;
use crate::repository::part_repo::PartCatalogRepository;

// ==========================================
// PartApi - 零件 API
// ==========================================

/// 零件API
///
/// 职责：
/// 1. 零件目录查询（含前缀筛选）
/// 2. 单零件成本档案查询
/// 3. 对比用批量查询
pub struct PartApi {
    part_repo: Arc<PartCatalogRepository>,
    config_manager: Arc<ConfigManager>,
}

impl PartApi {
    /// 创建新的PartApi实例
    ///
    /// # 参数
    /// - part_repo: 零件成本仓储
    /// - config_manager: 配置管理器（前缀匹配大小写口径）
    pub fn new(part_repo: Arc<PartCatalogRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            part_repo,
            config_manager,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询零件目录（可选前缀筛选, 保持目录顺序）
    pub async fn list_catalog(&self, prefix: Option<String>) -> ApiResult<Vec<PartSummary>> {
        let catalog = self.part_repo.list_catalog()?;

        let prefix = prefix.as_deref().map(str::trim).unwrap_or("");
        if prefix.is_empty() {
            return Ok(catalog);
        }

        let case_sensitive = self
            .config_manager
            .is_prefix_match_case_sensitive()
            .await
            .map_err(|e| ApiError::InternalError(format!("配置读取失败: {}", e)))?;

        let filtered = filter_by_prefix(&catalog, prefix, case_sensitive);
        debug!(
            prefix = %prefix,
            case_sensitive = case_sensitive,
            hit = filtered.len(),
            "目录前缀筛选"
        );
        Ok(filtered)
    }

    /// 查询单零件成本档案
    ///
    /// # 返回
    /// - Ok(EnginePart): 完整成本档案
    /// - Err(PartNotFound): 零件不存在（前端渲染空态, 不崩溃）
    pub fn get_part_detail(&self, part_no: &str) -> ApiResult<EnginePart> {
        if part_no.trim().is_empty() {
            return Err(ApiError::InvalidInput("零件号不能为空".to_string()));
        }

        self.part_repo
            .find_part(part_no)?
            .ok_or_else(|| ApiError::PartNotFound(part_no.to_string()))
    }

    /// 对比用批量查询（保持传入顺序, 任一缺失即报 PartNotFound）
    pub fn get_comparison_parts(&self, part_nos: &[String]) -> ApiResult<Vec<EnginePart>> {
        let mut parts = Vec::with_capacity(part_nos.len());
        for part_no in part_nos {
            parts.push(self.get_part_detail(part_no)?);
        }
        Ok(parts)
    }
}
