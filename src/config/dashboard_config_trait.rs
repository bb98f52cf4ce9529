// ==========================================
// 发动机零部件成本移动看板 - 看板配置读取接缝
// ==========================================
// 职责: 引擎层/应用层按接口读取配置, 便于测试替换
// ==========================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;

// ==========================================
// Trait: DashboardConfigReader
// ==========================================
#[async_trait]
pub trait DashboardConfigReader: Send + Sync {
    // ===== 筛选配置 =====

    /// 前缀匹配是否大小写敏感（缺省: true, 沿用既有口径）
    async fn is_prefix_match_case_sensitive(&self) -> Result<bool, Box<dyn Error>>;

    // ===== 展示配置 =====

    /// 缺省月份键（缺省: "august-2025"）
    async fn get_default_month_key(&self) -> Result<String, Box<dyn Error>>;

    /// 展示语言（缺省: "zh-CN"）
    async fn get_display_locale(&self) -> Result<String, Box<dyn Error>>;

    // ===== 通知配置 =====

    /// 部门 → 收件地址 映射（JSON 配置, 缺省为空表）
    async fn get_department_recipients(&self) -> Result<HashMap<String, String>, Box<dyn Error>>;
}
