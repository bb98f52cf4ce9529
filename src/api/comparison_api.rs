// ==========================================
// 发动机零部件成本移动看板 - 对比 API
// ==========================================
// 职责: 启动对比 (选择校验 + 路由编码) 与对比解析 (路由解码 + 批量取数)
// 路由契约: decode(encode(list)) == list, 顺序保持
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::part_api::PartApi;
use crate::domain::cost::EnginePart;
use crate::engine::comparison::{
    start_comparison, ComparisonRoute, MIN_COMPARISON_PARTS,
};
use crate::engine::filter::PartSelection;

// ==========================================
// ComparisonApi - 对比 API
// ==========================================
pub struct ComparisonApi {
    part_api: Arc<PartApi>,
}

impl ComparisonApi {
    pub fn new(part_api: Arc<PartApi>) -> Self {
        Self { part_api }
    }

    /// 启动对比: 选中零件 ≥ 2 时生成可导航路由, 否则阻断
    pub fn start_comparison(&self, selected: &[String]) -> ApiResult<ComparisonRoute> {
        let selection: PartSelection = selected.iter().cloned().collect();
        Ok(start_comparison(&selection)?)
    }

    /// 解析对比路由并装配各零件成本档案（保持路由中的顺序）
    pub fn resolve_comparison(&self, route: &str) -> ApiResult<Vec<EnginePart>> {
        let part_nos = ComparisonRoute::from_raw(route).decode();

        if part_nos.len() < MIN_COMPARISON_PARTS {
            return Err(ApiError::InsufficientSelection {
                selected: part_nos.len(),
                required: MIN_COMPARISON_PARTS,
            });
        }

        self.part_api.get_comparison_parts(&part_nos)
    }
}
