// ==========================================
// 发动机零部件成本移动看板 - 成本表导入器
// ==========================================
// 职责: 解析 → 字段映射 → DQ 校验 → 按零件落库
// 红线: 合计一致性在此处把关; 违规零件整体阻断, 不落半截数据
// ==========================================

use crate::domain::cost::{CostBreakdown, CostComponent};
use crate::domain::types::{ComponentKey, DqLevel};
use crate::importer::error::{ImportError, ImportModuleResult};
use crate::importer::field_mapper::{map_row, RawCostRow};
use crate::importer::file_parser::UniversalFileParser;
use crate::repository::part_repo::{
    ComponentUpsert, PartCatalogRepository, PartCostUpsert, SubPartUpsert,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// 合计一致性校验容差（金额口径）
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// 周期标签缺省值
const DEFAULT_CURRENT_PERIOD: &str = "august-2025";
const DEFAULT_LAST_YEAR_PERIOD: &str = "august-2024";

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,        // 原始文件行号（0 = 零件级校验）
    pub part_no: Option<String>,  // 零件号（如果可解析）
    pub level: DqLevel,           // 违规级别
    pub field: String,            // 违规字段
    pub message: String,          // 违规描述
}

// ==========================================
// ImportSummary - 导入结果汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,            // 批次 ID（UUID）
    pub file_name: String,           // 源文件名
    pub total_rows: usize,           // 数据行总数
    pub success_parts: Vec<String>,  // 落库成功的零件号
    pub blocked_parts: Vec<String>,  // 被阻断的零件号
    pub warning_count: usize,        // 警告数（允许导入）
    pub violations: Vec<DqViolation>, // 违规明细
    pub imported_at: DateTime<Utc>,  // 导入时间
}

// ==========================================
// PartDraft - 单零件聚合草稿（导入流程内）
// ==========================================
#[derive(Debug, Default)]
struct PartDraft {
    part_name: Option<String>,
    model: Option<String>,
    destination: Option<String>,
    current_period: Option<String>,
    last_year_period: Option<String>,
    components: HashMap<ComponentKey, ComponentUpsert>,
    sub_parts: Vec<SubPartUpsert>,
    blocked: bool,
}

// ==========================================
// CostSheetImporter - 成本表导入器
// ==========================================
pub struct CostSheetImporter {
    repo: Arc<PartCatalogRepository>,
}

impl CostSheetImporter {
    pub fn new(repo: Arc<PartCatalogRepository>) -> Self {
        Self { repo }
    }

    /// 导入一份成本表文件 (CSV/XLSX)
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入汇总（含 DQ 违规明细）
    /// - Err(ImportError): 文件级失败（不存在/格式不支持/解析失败）
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportModuleResult<ImportSummary> {
        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(file = %file_name, "开始导入成本表");

        let raw_rows = UniversalFileParser.parse(path)?;
        let total_rows = raw_rows.len();

        let mut violations: Vec<DqViolation> = Vec::new();
        let mut drafts: BTreeMap<String, PartDraft> = BTreeMap::new();

        // ===== 逐行映射与归集 =====
        for (idx, raw) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;

            let row = match map_row(row_number, raw) {
                Ok(row) => row,
                Err(ImportError::TypeConversionError { row, field, message }) => {
                    violations.push(DqViolation {
                        row_number: row,
                        part_no: raw.get("part_no").cloned().filter(|p| !p.is_empty()),
                        level: DqLevel::Error,
                        field,
                        message,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let part_no = match &row.part_no {
                Some(part_no) => part_no.clone(),
                None => {
                    violations.push(DqViolation {
                        row_number,
                        part_no: None,
                        level: DqLevel::Error,
                        field: "part_no".to_string(),
                        message: "主键缺失: part_no 为空".to_string(),
                    });
                    continue;
                }
            };

            let draft = drafts.entry(part_no.clone()).or_default();
            Self::merge_meta(draft, &row);
            Self::collect_row(draft, &part_no, &row, &mut violations);
        }

        // ===== 零件级校验与落库 =====
        let mut success_parts = Vec::new();
        let mut blocked_parts = Vec::new();

        for (part_no, mut draft) in drafts {
            Self::validate_part(&part_no, &mut draft, &mut violations);

            if draft.blocked {
                blocked_parts.push(part_no);
                continue;
            }

            let sheet = Self::build_upsert(&part_no, draft, &mut violations);
            match self.repo.upsert_part(&sheet) {
                Ok(()) => success_parts.push(part_no),
                Err(e) => {
                    violations.push(DqViolation {
                        row_number: 0,
                        part_no: Some(part_no.clone()),
                        level: DqLevel::Error,
                        field: "database".to_string(),
                        message: format!("落库失败: {}", e),
                    });
                    blocked_parts.push(part_no);
                }
            }
        }

        let warning_count = violations
            .iter()
            .filter(|v| v.level == DqLevel::Warning)
            .count();

        let summary = ImportSummary {
            batch_id: Uuid::new_v4().to_string(),
            file_name,
            total_rows,
            success_parts,
            blocked_parts,
            warning_count,
            violations,
            imported_at: Utc::now(),
        };

        tracing::info!(
            batch_id = %summary.batch_id,
            total_rows = summary.total_rows,
            success = summary.success_parts.len(),
            blocked = summary.blocked_parts.len(),
            warnings = summary.warning_count,
            "成本表导入完成"
        );

        Ok(summary)
    }

    /// 零件维度字段取首个非空值
    fn merge_meta(draft: &mut PartDraft, row: &RawCostRow) {
        if draft.part_name.is_none() {
            draft.part_name = row.part_name.clone();
        }
        if draft.model.is_none() {
            draft.model = row.model.clone();
        }
        if draft.destination.is_none() {
            draft.destination = row.destination.clone();
        }
        if draft.current_period.is_none() {
            draft.current_period = row.current_period.clone();
        }
        if draft.last_year_period.is_none() {
            draft.last_year_period = row.last_year_period.clone();
        }
    }

    /// 归集单行到零件草稿
    fn collect_row(
        draft: &mut PartDraft,
        part_no: &str,
        row: &RawCostRow,
        violations: &mut Vec<DqViolation>,
    ) {
        let block = |field: &str, message: String, violations: &mut Vec<DqViolation>| {
            violations.push(DqViolation {
                row_number: row.row_number,
                part_no: Some(part_no.to_string()),
                level: DqLevel::Error,
                field: field.to_string(),
                message,
            });
        };

        let key = match row.component_key.as_deref() {
            None => {
                block("component_key", "component_key 为空".to_string(), violations);
                draft.blocked = true;
                return;
            }
            Some(raw_key) => match ComponentKey::from_str(raw_key) {
                Some(key) => key,
                None => {
                    block(
                        "component_key",
                        format!("未知成本构成键: {}", raw_key),
                        violations,
                    );
                    draft.blocked = true;
                    return;
                }
            },
        };

        if row.is_sub_part_row() {
            // ===== 二级零件明细行 =====
            if !key.allows_sub_parts() {
                block(
                    "sub_part_no",
                    format!("{} 不携带二级零件明细", key),
                    violations,
                );
                draft.blocked = true;
                return;
            }

            let (quantity, amount) = match (row.quantity, row.amount) {
                (Some(q), Some(a)) => (q, a),
                _ => {
                    block(
                        "quantity/amount",
                        "二级零件行缺少 quantity 或 amount".to_string(),
                        violations,
                    );
                    draft.blocked = true;
                    return;
                }
            };

            draft.sub_parts.push(SubPartUpsert {
                key,
                sub_part_no: row.sub_part_no.clone().unwrap_or_default(),
                sub_part_name: row.sub_part_name.clone().unwrap_or_default(),
                quantity,
                amount,
            });
        } else {
            // ===== 成本构成行 =====
            let (current_year, last_year) = match (row.current_amount, row.last_year_amount) {
                (Some(c), Some(l)) => (c, l),
                _ => {
                    block(
                        "current_amount/last_year_amount",
                        "成本构成行缺少当期值或上年值".to_string(),
                        violations,
                    );
                    draft.blocked = true;
                    return;
                }
            };

            if current_year < 0.0 || last_year < 0.0 {
                violations.push(DqViolation {
                    row_number: row.row_number,
                    part_no: Some(part_no.to_string()),
                    level: DqLevel::Warning,
                    field: "amount".to_string(),
                    message: format!("负数金额: current={}, last={}", current_year, last_year),
                });
            }

            let name = row
                .component_name
                .clone()
                .unwrap_or_else(|| key.default_name().to_string());

            let duplicate = draft
                .components
                .insert(
                    key,
                    ComponentUpsert {
                        key,
                        name,
                        current_year,
                        last_year,
                    },
                )
                .is_some();

            if duplicate {
                block(
                    "component_key",
                    format!("重复的成本构成键: {}", key),
                    violations,
                );
                draft.blocked = true;
            }
        }
    }

    /// 零件级校验: 构成完整性 + 合计一致性
    fn validate_part(part_no: &str, draft: &mut PartDraft, violations: &mut Vec<DqViolation>) {
        // 构成完整性
        let missing: Vec<&'static str> = ComponentKey::ALL
            .into_iter()
            .filter(|k| !draft.components.contains_key(k))
            .map(|k| k.to_db_str())
            .collect();

        if !missing.is_empty() {
            violations.push(DqViolation {
                row_number: 0,
                part_no: Some(part_no.to_string()),
                level: DqLevel::Error,
                field: "component_key".to_string(),
                message: format!("成本构成不完整: 缺少 {}", missing.join(", ")),
            });
            draft.blocked = true;
            return;
        }

        // 合计一致性 (数据源必须保证, 展示层不重算)
        let mut map: HashMap<ComponentKey, CostComponent> = draft
            .components
            .values()
            .map(|c| {
                (
                    c.key,
                    CostComponent::new(c.name.clone(), c.current_year, c.last_year, None),
                )
            })
            .collect();

        // 键集合已校验完整, 这里不会再失败
        if let Ok(breakdown) = CostBreakdown::from_components(&mut map) {
            for mismatch in breakdown.verify_totals(TOTAL_TOLERANCE) {
                violations.push(DqViolation {
                    row_number: 0,
                    part_no: Some(part_no.to_string()),
                    level: DqLevel::Error,
                    field: format!("{}.{}", mismatch.key, mismatch.field),
                    message: format!(
                        "合计不一致: 明细求和={:.2}, 合计行={:.2}",
                        mismatch.expected, mismatch.actual
                    ),
                });
                draft.blocked = true;
            }
        }
    }

    /// 草稿 → 仓储写入 DTO（缺省值补齐记 Warning）
    fn build_upsert(
        part_no: &str,
        draft: PartDraft,
        violations: &mut Vec<DqViolation>,
    ) -> PartCostUpsert {
        let default_warn = |field: &str, violations: &mut Vec<DqViolation>| {
            violations.push(DqViolation {
                row_number: 0,
                part_no: Some(part_no.to_string()),
                level: DqLevel::Warning,
                field: field.to_string(),
                message: format!("{} 为空, 使用缺省值", field),
            });
        };

        let part_name = draft.part_name.unwrap_or_else(|| {
            default_warn("part_name", violations);
            part_no.to_string()
        });
        let model = draft.model.unwrap_or_else(|| {
            default_warn("model", violations);
            "-".to_string()
        });
        let destination = draft.destination.unwrap_or_else(|| {
            default_warn("destination", violations);
            "-".to_string()
        });
        let current_period = draft.current_period.unwrap_or_else(|| {
            default_warn("current_period", violations);
            DEFAULT_CURRENT_PERIOD.to_string()
        });
        let last_year_period = draft.last_year_period.unwrap_or_else(|| {
            default_warn("last_year_period", violations);
            DEFAULT_LAST_YEAR_PERIOD.to_string()
        });

        // 固定形态顺序输出, 便于排查
        let mut components: Vec<ComponentUpsert> = Vec::with_capacity(ComponentKey::ALL.len());
        let mut by_key = draft.components;
        for key in ComponentKey::ALL {
            if let Some(component) = by_key.remove(&key) {
                components.push(component);
            }
        }

        PartCostUpsert {
            part_no: part_no.to_string(),
            part_name,
            model,
            destination,
            current_period,
            last_year_period,
            components,
            sub_parts: draft.sub_parts,
        }
    }
}
