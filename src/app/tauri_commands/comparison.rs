use crate::app::state::AppState;

use super::common::map_api_error;

// ==========================================
// 对比相关命令
// ==========================================

/// 启动对比: 校验选择集并生成对比路由
#[tauri::command(rename_all = "snake_case")]
pub async fn start_comparison(
    state: tauri::State<'_, AppState>,
    selected: Vec<String>,
) -> Result<String, String> {
    let route = state
        .comparison_api
        .start_comparison(&selected)
        .map_err(map_api_error)?;

    serde_json::to_string(&serde_json::json!({ "route": route.as_str() }))
        .map_err(|e| format!("序列化失败: {}", e))
}

/// 解析对比路由并返回各零件成本档案
#[tauri::command(rename_all = "snake_case")]
pub async fn resolve_comparison(
    state: tauri::State<'_, AppState>,
    route: String,
) -> Result<String, String> {
    let result = state
        .comparison_api
        .resolve_comparison(&route)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
