// ==========================================
// 发动机零部件成本移动看板 - 成本数据请求
// ==========================================
// 用途: 记录向其他部门发出的成本数据请求 (审计追踪)
// ==========================================

use crate::domain::types::RequestStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// CostDataRequest - 成本数据请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDataRequest {
    pub request_id: String,        // 请求 ID（UUID）
    pub part_no: String,           // 关联零件号
    pub department: String,        // 接收部门
    pub requested_data: String,    // 请求的数据项
    pub message: String,           // 附言
    pub status: RequestStatus,     // 发送状态
    pub created_at: DateTime<Utc>, // 登记时间
}

impl CostDataRequest {
    /// 登记一条待发送请求
    pub fn new(
        part_no: impl Into<String>,
        department: impl Into<String>,
        requested_data: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            part_no: part_no.into(),
            department: department.into(),
            requested_data: requested_data.into(),
            message: message.into(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let req = CostDataRequest::new("12100-0101", "采购部", "JSP明细", "请提供最新JSP分解");
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.part_no, "12100-0101");
        assert!(!req.request_id.is_empty());
    }
}
