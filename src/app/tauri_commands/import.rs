use crate::app::state::AppState;

use super::common::map_api_error;

// ==========================================
// 成本表导入相关命令
// ==========================================

/// 导入成本表文件 (CSV/XLSX)
#[tauri::command(rename_all = "snake_case")]
pub async fn import_cost_sheet(
    state: tauri::State<'_, AppState>,
    file_path: String,
) -> Result<String, String> {
    // 文件解析可能较慢, 放入 blocking pool 避免阻塞命令线程
    let import_api = state.import_api.clone();
    let result = tauri::async_runtime::spawn_blocking(move || {
        import_api.import_cost_sheet(&file_path)
    })
    .await
    .map_err(|e| format!("任务执行失败: {}", e))?
    .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
