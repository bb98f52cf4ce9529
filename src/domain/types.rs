// ==========================================
// 发动机零部件成本移动看板 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 成本差异色调 (Difference Tone)
// ==========================================
// 符号约定: 成本上升=不利(红), 成本下降=有利(绿), 持平=中性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffTone {
    Adverse,   // 不利 (成本上升)
    Favorable, // 有利 (成本下降)
    Neutral,   // 中性 (无变化)
}

impl DiffTone {
    /// 前端样式标记
    pub fn css_class(&self) -> &'static str {
        match self {
            DiffTone::Adverse => "text-red-600",
            DiffTone::Favorable => "text-green-600",
            DiffTone::Neutral => "text-gray-500",
        }
    }
}

impl fmt::Display for DiffTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffTone::Adverse => write!(f, "ADVERSE"),
            DiffTone::Favorable => write!(f, "FAVORABLE"),
            DiffTone::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

// ==========================================
// 成本构成键 (Component Key)
// ==========================================
// 成本分解树为固定形态: 键集合封闭, 不允许动态扩展
// JSP/MSP/本地制造费用 三项带二级零件明细
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKey {
    // ===== 采购成本 (非LVA) =====
    NonLvaJsp,
    NonLvaMsp,
    NonLvaTotal,

    // ===== 采购成本 (LVA) =====
    LvaLocalOverhead,
    LvaRawMaterial,
    LvaTotal,

    // ===== 采购成本 (其他) =====
    ToolingOuthouse,
    PurchaseTotal,

    // ===== 加工成本 =====
    ProcLabor,
    ProcFixedFoh,
    ProcVariableFoh,
    ProcMachineDepreciation,
    ProcBuildingDepreciation,
    ProcTotal,

    // ===== 合计 =====
    TotalCost,
}

impl ComponentKey {
    /// 全部键 (导入校验/装配遍历用)
    pub const ALL: [ComponentKey; 15] = [
        ComponentKey::NonLvaJsp,
        ComponentKey::NonLvaMsp,
        ComponentKey::NonLvaTotal,
        ComponentKey::LvaLocalOverhead,
        ComponentKey::LvaRawMaterial,
        ComponentKey::LvaTotal,
        ComponentKey::ToolingOuthouse,
        ComponentKey::PurchaseTotal,
        ComponentKey::ProcLabor,
        ComponentKey::ProcFixedFoh,
        ComponentKey::ProcVariableFoh,
        ComponentKey::ProcMachineDepreciation,
        ComponentKey::ProcBuildingDepreciation,
        ComponentKey::ProcTotal,
        ComponentKey::TotalCost,
    ];

    /// 从字符串解析成本构成键
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NONLVA_JSP" => Some(ComponentKey::NonLvaJsp),
            "NONLVA_MSP" => Some(ComponentKey::NonLvaMsp),
            "NONLVA_TOTAL" => Some(ComponentKey::NonLvaTotal),
            "LVA_LOCAL_OVERHEAD" => Some(ComponentKey::LvaLocalOverhead),
            "LVA_RAW_MATERIAL" => Some(ComponentKey::LvaRawMaterial),
            "LVA_TOTAL" => Some(ComponentKey::LvaTotal),
            "TOOLING_OUTHOUSE" => Some(ComponentKey::ToolingOuthouse),
            "PURCHASE_TOTAL" => Some(ComponentKey::PurchaseTotal),
            "PROC_LABOR" => Some(ComponentKey::ProcLabor),
            "PROC_FIXED_FOH" => Some(ComponentKey::ProcFixedFoh),
            "PROC_VARIABLE_FOH" => Some(ComponentKey::ProcVariableFoh),
            "PROC_MACHINE_DEPRECIATION" => Some(ComponentKey::ProcMachineDepreciation),
            "PROC_BUILDING_DEPRECIATION" => Some(ComponentKey::ProcBuildingDepreciation),
            "PROC_TOTAL" => Some(ComponentKey::ProcTotal),
            "TOTAL_COST" => Some(ComponentKey::TotalCost),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ComponentKey::NonLvaJsp => "NONLVA_JSP",
            ComponentKey::NonLvaMsp => "NONLVA_MSP",
            ComponentKey::NonLvaTotal => "NONLVA_TOTAL",
            ComponentKey::LvaLocalOverhead => "LVA_LOCAL_OVERHEAD",
            ComponentKey::LvaRawMaterial => "LVA_RAW_MATERIAL",
            ComponentKey::LvaTotal => "LVA_TOTAL",
            ComponentKey::ToolingOuthouse => "TOOLING_OUTHOUSE",
            ComponentKey::PurchaseTotal => "PURCHASE_TOTAL",
            ComponentKey::ProcLabor => "PROC_LABOR",
            ComponentKey::ProcFixedFoh => "PROC_FIXED_FOH",
            ComponentKey::ProcVariableFoh => "PROC_VARIABLE_FOH",
            ComponentKey::ProcMachineDepreciation => "PROC_MACHINE_DEPRECIATION",
            ComponentKey::ProcBuildingDepreciation => "PROC_BUILDING_DEPRECIATION",
            ComponentKey::ProcTotal => "PROC_TOTAL",
            ComponentKey::TotalCost => "TOTAL_COST",
        }
    }

    /// 展示用缺省名称 (导入时 component_name 为空则补此值)
    pub fn default_name(&self) -> &'static str {
        match self {
            ComponentKey::NonLvaJsp => "JSP",
            ComponentKey::NonLvaMsp => "MSP",
            ComponentKey::NonLvaTotal => "Total (non-LVA)",
            ComponentKey::LvaLocalOverhead => "Local Overhead",
            ComponentKey::LvaRawMaterial => "Raw Material",
            ComponentKey::LvaTotal => "Total (LVA)",
            ComponentKey::ToolingOuthouse => "Tooling Outhouse",
            ComponentKey::PurchaseTotal => "Total Purchase Cost",
            ComponentKey::ProcLabor => "Labor Cost",
            ComponentKey::ProcFixedFoh => "Fixed FOH",
            ComponentKey::ProcVariableFoh => "Variable FOH",
            ComponentKey::ProcMachineDepreciation => "Machine Depreciation",
            ComponentKey::ProcBuildingDepreciation => "Building Depreciation",
            ComponentKey::ProcTotal => "Total Processing Cost",
            ComponentKey::TotalCost => "Total Cost",
        }
    }

    /// 是否携带二级零件明细 (仅 JSP/MSP/本地制造费用)
    pub fn allows_sub_parts(&self) -> bool {
        matches!(
            self,
            ComponentKey::NonLvaJsp | ComponentKey::NonLvaMsp | ComponentKey::LvaLocalOverhead
        )
    }

    /// 是否为合计行 (由明细行求和得出, 导入时做一致性校验)
    pub fn is_total(&self) -> bool {
        matches!(
            self,
            ComponentKey::NonLvaTotal
                | ComponentKey::LvaTotal
                | ComponentKey::PurchaseTotal
                | ComponentKey::ProcTotal
                | ComponentKey::TotalCost
        )
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 请求状态 (Request Status)
// ==========================================
// 成本数据请求的发送状态; 单次调用, 无重试
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending, // 已登记未发送
    Sent,    // 发送成功
    Failed,  // 发送失败
}

impl RequestStatus {
    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "SENT" => RequestStatus::Sent,
            "FAILED" => RequestStatus::Failed,
            _ => RequestStatus::Pending, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Sent => "SENT",
            RequestStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 数据质量级别 (DQ Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,   // 错误（阻断导入）
    Warning, // 警告（允许导入）
    Info,    // 提示（仅记录）
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_key_roundtrip() {
        for key in ComponentKey::ALL {
            assert_eq!(ComponentKey::from_str(key.to_db_str()), Some(key));
        }
        assert_eq!(ComponentKey::from_str("nonlva_jsp"), Some(ComponentKey::NonLvaJsp));
        assert_eq!(ComponentKey::from_str("NO_SUCH_KEY"), None);
    }

    #[test]
    fn test_sub_part_carriers() {
        let carriers: Vec<ComponentKey> = ComponentKey::ALL
            .into_iter()
            .filter(|k| k.allows_sub_parts())
            .collect();
        assert_eq!(
            carriers,
            vec![
                ComponentKey::NonLvaJsp,
                ComponentKey::NonLvaMsp,
                ComponentKey::LvaLocalOverhead
            ]
        );
    }

    #[test]
    fn test_request_status_default() {
        assert_eq!(RequestStatus::from_str("garbage"), RequestStatus::Pending);
        assert_eq!(RequestStatus::from_str("sent"), RequestStatus::Sent);
    }
}
