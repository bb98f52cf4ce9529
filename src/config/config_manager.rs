// ==========================================
// 发动机零部件成本移动看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::dashboard_config_trait::DashboardConfigReader;
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入/覆盖 global scope 配置值
    pub fn update_config(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置（key → value）
    pub fn list_configs(&self) -> Result<HashMap<String, String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn
            .prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(config_map)
    }
}

// ==========================================
// DashboardConfigReader Trait 实现
// ==========================================
#[async_trait]
impl DashboardConfigReader for ConfigManager {
    async fn is_prefix_match_case_sensitive(&self) -> Result<bool, Box<dyn Error>> {
        let value =
            self.get_config_or_default(config_keys::PREFIX_MATCH_CASE_SENSITIVE, "true")?;
        Ok(value.to_lowercase() != "false")
    }

    async fn get_default_month_key(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::DEFAULT_MONTH_KEY, "august-2025")
    }

    async fn get_display_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::DISPLAY_LOCALE, "zh-CN")
    }

    async fn get_department_recipients(
        &self,
    ) -> Result<HashMap<String, String>, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::DEPARTMENT_RECIPIENTS, "{}")?;
        let recipients: HashMap<String, String> =
            serde_json::from_str(&value).unwrap_or_else(|_| {
                tracing::warn!(
                    config_key = config_keys::DEPARTMENT_RECIPIENTS,
                    raw_value = %value,
                    "部门收件人配置格式错误，使用空配置"
                );
                HashMap::new()
            });
        Ok(recipients)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 筛选
    pub const PREFIX_MATCH_CASE_SENSITIVE: &str = "prefix_match_case_sensitive";

    // 展示
    pub const DEFAULT_MONTH_KEY: &str = "default_month_key";
    pub const DISPLAY_LOCALE: &str = "display_locale";

    // 通知
    pub const DEPARTMENT_RECIPIENTS: &str = "department_recipients";
}
