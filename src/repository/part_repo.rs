// ==========================================
// 发动机零部件成本移动看板 - 零件成本仓储
// ==========================================
// 职责: part_master / cost_component / sub_part_cost 的数据访问,
//       并装配 EnginePart 成本档案
// 红线: 不含业务逻辑, 只负责数据访问与装配
// 约定: 合计一致性由导入层保证, 装配只重算派生字段
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::cost::{CostBreakdown, CostComponent, EnginePart, PartSummary, SubPartCost};
use crate::domain::types::ComponentKey;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// 写入 DTO (导入层 → 仓储层)
// ==========================================

/// 一行成本构成的写入值
#[derive(Debug, Clone)]
pub struct ComponentUpsert {
    pub key: ComponentKey,
    pub name: String,
    pub current_year: f64,
    pub last_year: f64,
}

/// 一行二级零件明细的写入值
#[derive(Debug, Clone)]
pub struct SubPartUpsert {
    pub key: ComponentKey,
    pub sub_part_no: String,
    pub sub_part_name: String,
    pub quantity: f64,
    pub amount: f64,
}

/// 单个零件的完整成本表写入值
#[derive(Debug, Clone)]
pub struct PartCostUpsert {
    pub part_no: String,
    pub part_name: String,
    pub model: String,
    pub destination: String,
    pub current_period: String,
    pub last_year_period: String,
    pub components: Vec<ComponentUpsert>,
    pub sub_parts: Vec<SubPartUpsert>,
}

// ==========================================
// PartCatalogRepository - 零件成本仓储
// ==========================================
pub struct PartCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PartCatalogRepository {
    /// 创建新的 PartCatalogRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询零件目录（按零件号排序, 筛选在引擎层做）
    pub fn list_catalog(&self) -> RepositoryResult<Vec<PartSummary>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT part_no, part_name, model, destination
            FROM part_master
            ORDER BY part_no
            "#,
        )?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(PartSummary {
                    part_no: row.get(0)?,
                    part_name: row.get(1)?,
                    model: row.get(2)?,
                    destination: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<PartSummary>>>()?;

        Ok(summaries)
    }

    /// 按零件号装配完整成本档案
    ///
    /// # 返回
    /// - Ok(Some(EnginePart)): 找到并装配成功
    /// - Ok(None): 零件不存在
    /// - Err(ValidationError): 零件存在但成本构成不完整
    pub fn find_part(&self, part_no: &str) -> RepositoryResult<Option<EnginePart>> {
        let conn = self.get_conn()?;

        // ===== 主数据 =====
        let master = conn.query_row(
            r#"
            SELECT part_no, model, destination, current_period, last_year_period
            FROM part_master
            WHERE part_no = ?1
            "#,
            params![part_no],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        );

        let (part_no, model, destination, current_period, last_year_period) = match master {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // ===== 二级零件明细 (按 component_key 分组, 保持 seq_no 顺序) =====
        let mut sub_parts: HashMap<ComponentKey, Vec<SubPartCost>> = HashMap::new();
        {
            let mut stmt = conn.prepare(
                r#"
                SELECT component_key, sub_part_no, sub_part_name, quantity, amount
                FROM sub_part_cost
                WHERE part_no = ?1
                ORDER BY component_key, seq_no
                "#,
            )?;

            let rows = stmt.query_map(params![part_no], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    SubPartCost {
                        part_number: row.get(1)?,
                        part_name: row.get(2)?,
                        quantity: row.get(3)?,
                        amount: row.get(4)?,
                    },
                ))
            })?;

            for row in rows {
                let (key_str, sub_part) = row?;
                let key = ComponentKey::from_str(&key_str).ok_or_else(|| {
                    RepositoryError::FieldValueError {
                        field: "component_key".to_string(),
                        message: format!("未知成本构成键: {}", key_str),
                    }
                })?;
                sub_parts.entry(key).or_default().push(sub_part);
            }
        }

        // ===== 成本构成行 (装配时重算派生字段) =====
        let mut components: HashMap<ComponentKey, CostComponent> = HashMap::new();
        {
            let mut stmt = conn.prepare(
                r#"
                SELECT component_key, name, current_year, last_year
                FROM cost_component
                WHERE part_no = ?1
                "#,
            )?;

            let rows = stmt.query_map(params![part_no], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?;

            for row in rows {
                let (key_str, name, current_year, last_year) = row?;
                let key = ComponentKey::from_str(&key_str).ok_or_else(|| {
                    RepositoryError::FieldValueError {
                        field: "component_key".to_string(),
                        message: format!("未知成本构成键: {}", key_str),
                    }
                })?;

                let parts = sub_parts.remove(&key).filter(|v| !v.is_empty());
                components.insert(key, CostComponent::new(name, current_year, last_year, parts));
            }
        }

        let costs = CostBreakdown::from_components(&mut components).map_err(|missing| {
            RepositoryError::ValidationError(format!(
                "零件{}成本构成不完整: 缺少 {}",
                part_no, missing
            ))
        })?;

        Ok(Some(EnginePart {
            part_no,
            model,
            destination,
            current_date: current_period,
            last_year_date: last_year_period,
            costs,
        }))
    }

    /// 写入/覆盖单个零件的完整成本表
    ///
    /// # 说明
    /// - 使用事务确保原子性
    /// - 先清空该零件的旧成本行再写入 (sub_part_cost 级联删除)
    pub fn upsert_part(&self, sheet: &PartCostUpsert) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let now = Utc::now().to_rfc3339();

        tx.execute(
            r#"
            INSERT INTO part_master (
                part_no, part_name, model, destination,
                current_period, last_year_period, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            ON CONFLICT(part_no) DO UPDATE SET
                part_name = ?2, model = ?3, destination = ?4,
                current_period = ?5, last_year_period = ?6, updated_at = ?7
            "#,
            params![
                sheet.part_no,
                sheet.part_name,
                sheet.model,
                sheet.destination,
                sheet.current_period,
                sheet.last_year_period,
                now,
            ],
        )?;

        tx.execute(
            "DELETE FROM cost_component WHERE part_no = ?1",
            params![sheet.part_no],
        )?;

        for component in &sheet.components {
            tx.execute(
                r#"
                INSERT INTO cost_component (part_no, component_key, name, current_year, last_year)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    sheet.part_no,
                    component.key.to_db_str(),
                    component.name,
                    component.current_year,
                    component.last_year,
                ],
            )?;
        }

        let mut seq_by_key: HashMap<ComponentKey, i64> = HashMap::new();
        for sub_part in &sheet.sub_parts {
            let seq = seq_by_key.entry(sub_part.key).or_insert(0);
            *seq += 1;
            tx.execute(
                r#"
                INSERT INTO sub_part_cost (
                    part_no, component_key, seq_no,
                    sub_part_no, sub_part_name, quantity, amount
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    sheet.part_no,
                    sub_part.key.to_db_str(),
                    *seq,
                    sub_part.sub_part_no,
                    sub_part.sub_part_name,
                    sub_part.quantity,
                    sub_part.amount,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// 批量检查零件是否存在（用于导入冲突提示）
    pub fn batch_check_exists(&self, part_nos: &[String]) -> RepositoryResult<Vec<String>> {
        if part_nos.is_empty() {
            return Ok(vec![]);
        }

        let conn = self.get_conn()?;
        let placeholders = part_nos.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        let query = format!(
            "SELECT part_no FROM part_master WHERE part_no IN ({})",
            placeholders
        );

        let mut stmt = conn.prepare(&query)?;
        let params_vec: Vec<&dyn rusqlite::ToSql> = part_nos
            .iter()
            .map(|p| p as &dyn rusqlite::ToSql)
            .collect();

        let existing = stmt
            .query_map(params_vec.as_slice(), |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<String>>>()?;

        Ok(existing)
    }
}
