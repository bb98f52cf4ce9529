// ==========================================
// 发动机零部件成本移动看板 - 成本领域模型
// ==========================================
// 成本分解树为固定形态记录, 不用动态键 Map
// 合计一致性由数据源保证 (导入层校验), 展示层不重算
// ==========================================

use crate::domain::types::ComponentKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// SubPartCost - 二级零件成本
// ==========================================
// 用途: JSP/MSP/本地制造费用的零件级明细, 不再继续嵌套
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPartCost {
    pub part_number: String, // 零件号
    pub part_name: String,   // 零件名称
    pub quantity: f64,       // 装配数量
    pub amount: f64,         // 金额 (与父项同币种)
}

// ==========================================
// CostComponent - 成本构成行
// ==========================================
// difference / percentage_change 为派生字段:
// 任一期值变化时必须重算, 存储层不落盘
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub name: String,                    // 行名称
    pub current_year: f64,               // 当期值
    pub last_year: f64,                  // 上年同期值
    pub difference: f64,                 // 差额 = current_year - last_year
    pub percentage_change: f64,          // 变化率 (%) = difference / last_year * 100
    pub parts: Option<Vec<SubPartCost>>, // 二级零件明细 (仅 JSP/MSP/本地制造费用)
}

impl CostComponent {
    /// 构造成本行并计算派生字段
    ///
    /// last_year 为 0 时变化率记为 0%（0 基数没有有意义的比率,
    /// 且 NaN 无法序列化为 JSON）
    pub fn new(
        name: impl Into<String>,
        current_year: f64,
        last_year: f64,
        parts: Option<Vec<SubPartCost>>,
    ) -> Self {
        let difference = current_year - last_year;
        let percentage_change = if last_year == 0.0 {
            0.0
        } else {
            difference / last_year * 100.0
        };

        Self {
            name: name.into(),
            current_year,
            last_year,
            difference,
            percentage_change,
            parts,
        }
    }

    /// 重算派生字段 (任一期值被修改后调用)
    pub fn recompute(&mut self) {
        let recomputed = CostComponent::new(
            std::mem::take(&mut self.name),
            self.current_year,
            self.last_year,
            self.parts.take(),
        );
        *self = recomputed;
    }
}

// ==========================================
// NonLvaPurchase - 采购成本 (非LVA)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonLvaPurchase {
    pub jsp: CostComponent,   // JSP (带零件明细)
    pub msp: CostComponent,   // MSP (带零件明细)
    pub total: CostComponent, // 小计 = jsp + msp
}

// ==========================================
// LvaPurchase - 采购成本 (LVA)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LvaPurchase {
    pub local_overhead: CostComponent, // 本地制造费用 (带零件明细)
    pub raw_material: CostComponent,   // 原材料
    pub total: CostComponent,          // 小计 = local_overhead + raw_material
}

// ==========================================
// ProcessingCost - 加工成本
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingCost {
    pub labor: CostComponent,                 // 人工费
    pub fixed_foh: CostComponent,             // 固定制造费用
    pub variable_foh: CostComponent,          // 变动制造费用
    pub machine_depreciation: CostComponent,  // 设备折旧
    pub building_depreciation: CostComponent, // 厂房折旧
    pub total: CostComponent,                 // 小计 = 以上五项之和
}

// ==========================================
// CostBreakdown - 成本分解树
// ==========================================
// 层级固定:
//   非LVA (JSP+MSP) / LVA (本地制造费用+原材料) / 模具外制
//   → 采购成本合计
//   加工成本五项 → 加工成本合计
//   → 总成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub non_lva: NonLvaPurchase,
    pub lva: LvaPurchase,
    pub tooling_outhouse: CostComponent,
    pub total_purchase_cost: CostComponent, // = non_lva.total + lva.total + tooling_outhouse
    pub processing: ProcessingCost,
    pub total_cost: CostComponent, // = total_purchase_cost + processing.total
}

// ==========================================
// TotalMismatch - 合计一致性违规
// ==========================================
// 导入层 DQ 校验输出; 展示层从不重算合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalMismatch {
    pub key: ComponentKey, // 不一致的合计行
    pub field: String,     // current_year / last_year
    pub expected: f64,     // 明细行求和
    pub actual: f64,       // 合计行实际值
}

impl CostBreakdown {
    /// 从键值映射装配成本分解树
    ///
    /// # 返回
    /// - Err(key): 缺失的成本构成键
    pub fn from_components(
        map: &mut HashMap<ComponentKey, CostComponent>,
    ) -> Result<Self, ComponentKey> {
        let mut take = |key: ComponentKey| map.remove(&key).ok_or(key);

        Ok(Self {
            non_lva: NonLvaPurchase {
                jsp: take(ComponentKey::NonLvaJsp)?,
                msp: take(ComponentKey::NonLvaMsp)?,
                total: take(ComponentKey::NonLvaTotal)?,
            },
            lva: LvaPurchase {
                local_overhead: take(ComponentKey::LvaLocalOverhead)?,
                raw_material: take(ComponentKey::LvaRawMaterial)?,
                total: take(ComponentKey::LvaTotal)?,
            },
            tooling_outhouse: take(ComponentKey::ToolingOuthouse)?,
            total_purchase_cost: take(ComponentKey::PurchaseTotal)?,
            processing: ProcessingCost {
                labor: take(ComponentKey::ProcLabor)?,
                fixed_foh: take(ComponentKey::ProcFixedFoh)?,
                variable_foh: take(ComponentKey::ProcVariableFoh)?,
                machine_depreciation: take(ComponentKey::ProcMachineDepreciation)?,
                building_depreciation: take(ComponentKey::ProcBuildingDepreciation)?,
                total: take(ComponentKey::ProcTotal)?,
            },
            total_cost: take(ComponentKey::TotalCost)?,
        })
    }

    /// 按键访问成本行 (对比视图按同一行项横向渲染)
    pub fn component(&self, key: ComponentKey) -> &CostComponent {
        match key {
            ComponentKey::NonLvaJsp => &self.non_lva.jsp,
            ComponentKey::NonLvaMsp => &self.non_lva.msp,
            ComponentKey::NonLvaTotal => &self.non_lva.total,
            ComponentKey::LvaLocalOverhead => &self.lva.local_overhead,
            ComponentKey::LvaRawMaterial => &self.lva.raw_material,
            ComponentKey::LvaTotal => &self.lva.total,
            ComponentKey::ToolingOuthouse => &self.tooling_outhouse,
            ComponentKey::PurchaseTotal => &self.total_purchase_cost,
            ComponentKey::ProcLabor => &self.processing.labor,
            ComponentKey::ProcFixedFoh => &self.processing.fixed_foh,
            ComponentKey::ProcVariableFoh => &self.processing.variable_foh,
            ComponentKey::ProcMachineDepreciation => &self.processing.machine_depreciation,
            ComponentKey::ProcBuildingDepreciation => &self.processing.building_depreciation,
            ComponentKey::ProcTotal => &self.processing.total,
            ComponentKey::TotalCost => &self.total_cost,
        }
    }

    /// 校验合计一致性: 每个合计行等于其兄弟明细行之和
    ///
    /// # 参数
    /// - tolerance: 浮点求和容差 (金额口径, 建议 0.01)
    pub fn verify_totals(&self, tolerance: f64) -> Vec<TotalMismatch> {
        let mut mismatches = Vec::new();

        let mut check = |key: ComponentKey, total: &CostComponent, parts: &[&CostComponent]| {
            let sum_current: f64 = parts.iter().map(|c| c.current_year).sum();
            let sum_last: f64 = parts.iter().map(|c| c.last_year).sum();

            if (total.current_year - sum_current).abs() > tolerance {
                mismatches.push(TotalMismatch {
                    key,
                    field: "current_year".to_string(),
                    expected: sum_current,
                    actual: total.current_year,
                });
            }
            if (total.last_year - sum_last).abs() > tolerance {
                mismatches.push(TotalMismatch {
                    key,
                    field: "last_year".to_string(),
                    expected: sum_last,
                    actual: total.last_year,
                });
            }
        };

        check(
            ComponentKey::NonLvaTotal,
            &self.non_lva.total,
            &[&self.non_lva.jsp, &self.non_lva.msp],
        );
        check(
            ComponentKey::LvaTotal,
            &self.lva.total,
            &[&self.lva.local_overhead, &self.lva.raw_material],
        );
        check(
            ComponentKey::PurchaseTotal,
            &self.total_purchase_cost,
            &[&self.non_lva.total, &self.lva.total, &self.tooling_outhouse],
        );
        check(
            ComponentKey::ProcTotal,
            &self.processing.total,
            &[
                &self.processing.labor,
                &self.processing.fixed_foh,
                &self.processing.variable_foh,
                &self.processing.machine_depreciation,
                &self.processing.building_depreciation,
            ],
        );
        check(
            ComponentKey::TotalCost,
            &self.total_cost,
            &[&self.total_purchase_cost, &self.processing.total],
        );

        mismatches
    }
}

// ==========================================
// EnginePart - 零件成本档案
// ==========================================
// 生命周期: 数据源按查询装配, 渲染期内不可变, 展示层只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnginePart {
    pub part_no: String,        // 零件号
    pub model: String,          // 机型
    pub destination: String,    // 投向地
    pub current_date: String,   // 当期标签 (month-key)
    pub last_year_date: String, // 上年同期标签 (month-key)
    pub costs: CostBreakdown,   // 成本分解树
}

// ==========================================
// PartSummary - 零件目录条目
// ==========================================
// 用途: 列表筛选与对比选择
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSummary {
    pub part_no: String,     // 零件号
    pub part_name: String,   // 零件名称
    pub model: String,       // 机型
    pub destination: String, // 投向地
}
