// ==========================================
// 发动机零部件成本移动看板 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 统一建表入口, 应用与测试共用同一份 DDL
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 应用启动与集成测试共用此入口, 避免两份 DDL 漂移
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_scope (
            scope_id TEXT PRIMARY KEY,
            scope_type TEXT NOT NULL,
            scope_key TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(scope_type, scope_key)
        );

        INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key)
        VALUES ('global', 'GLOBAL', 'global');

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL REFERENCES config_scope(scope_id) ON DELETE CASCADE,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        -- 零件主数据
        CREATE TABLE IF NOT EXISTS part_master (
            part_no TEXT PRIMARY KEY,
            part_name TEXT NOT NULL,
            model TEXT NOT NULL,
            destination TEXT NOT NULL,
            current_period TEXT NOT NULL,
            last_year_period TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- 成本构成行 (派生字段 difference/percentage_change 不落盘, 装配时重算)
        CREATE TABLE IF NOT EXISTS cost_component (
            part_no TEXT NOT NULL REFERENCES part_master(part_no) ON DELETE CASCADE,
            component_key TEXT NOT NULL,
            name TEXT NOT NULL,
            current_year REAL NOT NULL,
            last_year REAL NOT NULL,
            PRIMARY KEY (part_no, component_key)
        );

        -- 二级零件明细 (仅 JSP/MSP/本地制造费用)
        CREATE TABLE IF NOT EXISTS sub_part_cost (
            part_no TEXT NOT NULL,
            component_key TEXT NOT NULL,
            seq_no INTEGER NOT NULL,
            sub_part_no TEXT NOT NULL,
            sub_part_name TEXT NOT NULL,
            quantity REAL NOT NULL,
            amount REAL NOT NULL,
            PRIMARY KEY (part_no, component_key, seq_no),
            FOREIGN KEY (part_no, component_key)
                REFERENCES cost_component(part_no, component_key) ON DELETE CASCADE
        );

        -- 成本数据请求审计
        CREATE TABLE IF NOT EXISTS cost_request_log (
            request_id TEXT PRIMARY KEY,
            part_no TEXT NOT NULL,
            department TEXT NOT NULL,
            requested_data TEXT NOT NULL,
            message TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_request_created ON cost_request_log(created_at);
        CREATE INDEX IF NOT EXISTS idx_request_part ON cost_request_log(part_no, created_at);

        INSERT OR IGNORE INTO schema_version (version) VALUES (1);
        "#,
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }
}
