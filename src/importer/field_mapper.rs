// ==========================================
// 发动机零部件成本移动看板 - 字段映射
// ==========================================
// 职责: 表头行映射 → 类型化的原始成本行
// 列约定 (英文表头, 与成本表模板一致):
//   part_no / part_name / model / destination
//   current_period / last_year_period
//   component_key / component_name / current_amount / last_year_amount
//   sub_part_no / sub_part_name / quantity / amount
// ==========================================

use crate::importer::error::{ImportError, ImportModuleResult};
use std::collections::HashMap;

// ==========================================
// RawCostRow - 导入中间结构体
// ==========================================
// 生命周期: 仅在导入流程内
// 一行要么是成本构成行 (sub_part_no 为空), 要么是二级零件行
#[derive(Debug, Clone, Default)]
pub struct RawCostRow {
    pub row_number: usize, // 原始文件行号（用于 DQ 报告, 1 = 首个数据行）

    // ===== 零件维度 =====
    pub part_no: Option<String>,
    pub part_name: Option<String>,
    pub model: Option<String>,
    pub destination: Option<String>,
    pub current_period: Option<String>,
    pub last_year_period: Option<String>,

    // ===== 成本构成维度 =====
    pub component_key: Option<String>,
    pub component_name: Option<String>,
    pub current_amount: Option<f64>,
    pub last_year_amount: Option<f64>,

    // ===== 二级零件维度 =====
    pub sub_part_no: Option<String>,
    pub sub_part_name: Option<String>,
    pub quantity: Option<f64>,
    pub amount: Option<f64>,
}

impl RawCostRow {
    /// 是否二级零件明细行
    pub fn is_sub_part_row(&self) -> bool {
        self.sub_part_no.is_some()
    }
}

/// 取非空字符串单元格
fn string_cell(row: &HashMap<String, String>, field: &str) -> Option<String> {
    row.get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// 取数值单元格（空值 → None, 非法数值 → 类型转换错误）
fn numeric_cell(
    row: &HashMap<String, String>,
    field: &str,
    row_number: usize,
) -> ImportModuleResult<Option<f64>> {
    match string_cell(row, field) {
        None => Ok(None),
        Some(raw) => raw
            .replace(',', "") // 允许千分位
            .parse::<f64>()
            .map(Some)
            .map_err(|e| ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("'{}' 不是数值: {}", raw, e),
            }),
    }
}

/// 单行映射
pub fn map_row(
    row_number: usize,
    row: &HashMap<String, String>,
) -> ImportModuleResult<RawCostRow> {
    Ok(RawCostRow {
        row_number,
        part_no: string_cell(row, "part_no"),
        part_name: string_cell(row, "part_name"),
        model: string_cell(row, "model"),
        destination: string_cell(row, "destination"),
        current_period: string_cell(row, "current_period"),
        last_year_period: string_cell(row, "last_year_period"),
        component_key: string_cell(row, "component_key"),
        component_name: string_cell(row, "component_name"),
        current_amount: numeric_cell(row, "current_amount", row_number)?,
        last_year_amount: numeric_cell(row, "last_year_amount", row_number)?,
        sub_part_no: string_cell(row, "sub_part_no"),
        sub_part_name: string_cell(row, "sub_part_name"),
        quantity: numeric_cell(row, "quantity", row_number)?,
        amount: numeric_cell(row, "amount", row_number)?,
    })
}
