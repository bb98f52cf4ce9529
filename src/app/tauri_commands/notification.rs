use crate::app::state::AppState;

use super::common::map_api_error;

// ==========================================
// 成本数据请求相关命令
// ==========================================

/// 发送成本数据请求（结果状态见返回记录的 status）
#[tauri::command(rename_all = "snake_case")]
pub async fn send_cost_data_request(
    state: tauri::State<'_, AppState>,
    part_no: String,
    department: String,
    requested_data: String,
    message: String,
) -> Result<String, String> {
    let result = state
        .notification_api
        .send_cost_data_request(&part_no, &department, &requested_data, &message)
        .await
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 查询最近成本数据请求
#[tauri::command(rename_all = "snake_case")]
pub async fn list_cost_requests(
    state: tauri::State<'_, AppState>,
    limit: Option<i32>,
) -> Result<String, String> {
    let result = state
        .notification_api
        .list_requests(limit.unwrap_or(50))
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 按零件号查询成本数据请求
#[tauri::command(rename_all = "snake_case")]
pub async fn list_cost_requests_by_part(
    state: tauri::State<'_, AppState>,
    part_no: String,
) -> Result<String, String> {
    let result = state
        .notification_api
        .list_requests_by_part(&part_no)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
