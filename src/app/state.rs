// ==========================================
// 发动机零部件成本移动看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ComparisonApi, ImportApi, NotificationApi, PartApi};
use crate::config::config_manager::ConfigManager;
use crate::db;
use crate::notifier::{CostNotifier, OutboxNotifier};
use crate::repository::part_repo::PartCatalogRepository;
use crate::repository::request_repo::CostRequestRepository;

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 零件API
    pub part_api: Arc<PartApi>,

    /// 对比API
    pub comparison_api: Arc<ComparisonApi>,

    /// 通知API
    pub notification_api: Arc<NotificationApi>,

    /// 成本表导入API
    pub import_api: Arc<ImportApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享数据库连接并初始化 schema
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;

        db::init_schema(&conn).map_err(|e| format!("无法初始化数据库 schema: {}", e))?;

        // schema 版本只提示不自动迁移, 避免静默在旧库上运行
        match db::read_schema_version(&conn) {
            Ok(Some(version)) if version != db::CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    found = version,
                    expected = db::CURRENT_SCHEMA_VERSION,
                    "schema_version 与当前代码不一致"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("读取 schema_version 失败(将继续启动): {}", e);
            }
        }

        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let part_repo = Arc::new(PartCatalogRepository::from_connection(conn.clone()));
        let request_repo = Arc::new(CostRequestRepository::from_connection(conn.clone()));

        // 配置管理器
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================

        // 零件API
        let part_api = Arc::new(PartApi::new(part_repo.clone(), config_manager.clone()));

        // 对比API
        let comparison_api = Arc::new(ComparisonApi::new(part_api.clone()));

        // 通知API（缺省 outbox 投递通道）
        let notifier: Arc<dyn CostNotifier> = Arc::new(OutboxNotifier);
        let notification_api = Arc::new(NotificationApi::new(
            request_repo,
            notifier,
            config_manager.clone(),
        ));

        // 成本表导入API
        let import_api = Arc::new(ImportApi::new(part_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            part_api,
            comparison_api,
            notification_api,
            import_api,
            config_manager,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/engine-cost-dashboard-dev/engine_cost_dashboard.db
/// - 生产环境: 用户数据目录/engine-cost-dashboard/engine_cost_dashboard.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("ENGINE_COST_DASHBOARD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 使用用户数据目录，避免开发期 DB 文件变化触发 `tauri dev` 的文件监控重启。
    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖。
    let mut path = PathBuf::from("./engine_cost_dashboard.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("engine-cost-dashboard-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("engine-cost-dashboard");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("engine_cost_dashboard.db");
    }

    path.to_string_lossy().to_string()
}
