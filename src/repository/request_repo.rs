// ==========================================
// 发动机零部件成本移动看板 - 成本请求审计仓储
// ==========================================
// 职责: cost_request_log 表的数据访问 (审计追踪)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::request::CostDataRequest;
use crate::domain::types::RequestStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// CostRequestRepository - 成本请求仓储
// ==========================================
pub struct CostRequestRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CostRequestRepository {
    /// 创建新的 CostRequestRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<CostDataRequest> {
        Ok(CostDataRequest {
            request_id: row.get(0)?,
            part_no: row.get(1)?,
            department: row.get(2)?,
            requested_data: row.get(3)?,
            message: row.get(4)?,
            status: RequestStatus::from_str(&row.get::<_, String>(5)?),
            created_at: row
                .get::<_, String>(6)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    /// 登记一条请求
    pub fn insert(&self, request: &CostDataRequest) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cost_request_log (
                request_id, part_no, department, requested_data, message, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                request.request_id,
                request.part_no,
                request.department,
                request.requested_data,
                request.message,
                request.status.to_db_str(),
                request.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 更新发送状态
    pub fn update_status(&self, request_id: &str, status: RequestStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE cost_request_log SET status = ?2 WHERE request_id = ?1",
            params![request_id, status.to_db_str()],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CostDataRequest".to_string(),
                id: request_id.to_string(),
            });
        }
        Ok(())
    }

    /// 查询最近请求（按登记时间倒序）
    pub fn list_recent(&self, limit: i32) -> RepositoryResult<Vec<CostDataRequest>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT request_id, part_no, department, requested_data, message, status, created_at
            FROM cost_request_log
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )?;

        let requests = stmt
            .query_map(params![limit], Self::map_row)?
            .collect::<SqliteResult<Vec<CostDataRequest>>>()?;

        Ok(requests)
    }

    /// 按零件号查询请求
    pub fn list_by_part(&self, part_no: &str) -> RepositoryResult<Vec<CostDataRequest>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT request_id, part_no, department, requested_data, message, status, created_at
            FROM cost_request_log
            WHERE part_no = ?1
            ORDER BY created_at DESC
            "#,
        )?;

        let requests = stmt
            .query_map(params![part_no], Self::map_row)?
            .collect::<SqliteResult<Vec<CostDataRequest>>>()?;

        Ok(requests)
    }
}
