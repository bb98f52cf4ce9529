use crate::app::state::AppState;

use super::common::map_api_error;

// ==========================================
// 零件相关命令
// ==========================================

/// 查询零件目录（可选前缀筛选）
#[tauri::command(rename_all = "snake_case")]
pub async fn list_parts(
    state: tauri::State<'_, AppState>,
    prefix: Option<String>,
) -> Result<String, String> {
    let result = state
        .part_api
        .list_catalog(prefix)
        .await
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 查询单零件成本档案
#[tauri::command(rename_all = "snake_case")]
pub async fn get_part_detail(
    state: tauri::State<'_, AppState>,
    part_no: String,
) -> Result<String, String> {
    let result = state
        .part_api
        .get_part_detail(&part_no)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
