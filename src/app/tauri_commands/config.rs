use crate::app::state::AppState;

// ==========================================
// 配置管理相关命令
// ==========================================

/// 查询全部配置
#[tauri::command(rename_all = "snake_case")]
pub async fn list_configs(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .config_manager
        .list_configs()
        .map_err(|e| format!("配置读取失败: {}", e))?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 查询单个配置值
#[tauri::command(rename_all = "snake_case")]
pub async fn get_config(
    state: tauri::State<'_, AppState>,
    key: String,
) -> Result<String, String> {
    let result = state
        .config_manager
        .get_global_config_value(&key)
        .map_err(|e| format!("配置读取失败: {}", e))?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 更新单个配置值
#[tauri::command(rename_all = "snake_case")]
pub async fn update_config(
    state: tauri::State<'_, AppState>,
    key: String,
    value: String,
) -> Result<String, String> {
    state
        .config_manager
        .update_config(&key, &value)
        .map_err(|e| format!("配置更新失败: {}", e))?;

    serde_json::to_string(&serde_json::json!({ "ok": true }))
        .map_err(|e| format!("序列化失败: {}", e))
}
