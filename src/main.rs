// ==========================================
// 发动机零部件成本移动看板 - Tauri 主入口
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use engine_cost_dashboard::app::{get_default_db_path, AppState};

#[cfg(feature = "tauri-app")]
fn main() {
    use engine_cost_dashboard::app::tauri_commands::*;

    // 初始化日志系统
    engine_cost_dashboard::logging::init();

    tracing::info!("==================================================");
    tracing::info!("发动机零部件成本移动看板");
    tracing::info!("系统版本: {}", engine_cost_dashboard::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let app_state = AppState::new(db_path).expect("无法初始化AppState");

    tracing::info!("AppState初始化成功");
    tracing::info!("启动Tauri应用...");

    // 启动Tauri应用
    tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // 零件相关命令 (2个)
            // ==========================================
            list_parts,
            get_part_detail,
            // ==========================================
            // 对比相关命令 (2个)
            // ==========================================
            start_comparison,
            resolve_comparison,
            // ==========================================
            // 成本数据请求相关命令 (3个)
            // ==========================================
            send_cost_data_request,
            list_cost_requests,
            list_cost_requests_by_part,
            // ==========================================
            // 成本表导入相关命令 (1个)
            // ==========================================
            import_cost_sheet,
            // ==========================================
            // 配置管理相关命令 (3个)
            // ==========================================
            list_configs,
            get_config,
            update_config,
        ])
        .run(tauri::generate_context!())
        .expect("启动Tauri应用失败");

    tracing::info!("Tauri应用已退出");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    engine_cost_dashboard::logging::init();

    println!("==================================================");
    println!("发动机零部件成本移动看板");
    println!("系统版本: {}", engine_cost_dashboard::VERSION);
    println!("==================================================");
    println!();

    // 库模式: 初始化数据库并打印目录规模, 便于冒烟检查
    let db_path = get_default_db_path();
    println!("使用数据库: {}", db_path);

    match AppState::new(db_path) {
        Ok(state) => {
            println!("AppState初始化成功");
            println!();
            println!("桌面端需要启用 tauri-app 特性:");
            println!("    cargo run --features tauri-app");
            println!();
            println!("数据库位置: {}", state.get_db_path());
        }
        Err(e) => {
            eprintln!("AppState初始化失败: {}", e);
            std::process::exit(1);
        }
    }
}
