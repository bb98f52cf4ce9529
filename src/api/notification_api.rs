// ==========================================
// 发动机零部件成本移动看板 - 通知 API
// ==========================================
// 职责: 登记成本数据请求 → 单次外呼 → 记录发送结局
// 约定: 发送失败不是 API 错误 (请求已留痕), 以状态 FAILED 呈现
// ==========================================

use std::sync::Arc;

use tracing::warn;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, DashboardConfigReader};
use crate::domain::request::CostDataRequest;
use crate::domain::types::RequestStatus;
use crate::notifier::CostNotifier;
use crate::repository::request_repo::CostRequestRepository;

// ==========================================
// NotificationApi - 通知 API
// ==========================================
pub struct NotificationApi {
    request_repo: Arc<CostRequestRepository>,
    notifier: Arc<dyn CostNotifier>,
    config_manager: Arc<ConfigManager>,
}

impl NotificationApi {
    /// 创建新的NotificationApi实例
    ///
    /// # 参数
    /// - request_repo: 成本请求审计仓储
    /// - notifier: 投递通道实现
    /// - config_manager: 配置管理器（部门收件人映射）
    pub fn new(
        request_repo: Arc<CostRequestRepository>,
        notifier: Arc<dyn CostNotifier>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            request_repo,
            notifier,
            config_manager,
        }
    }

    /// 发送成本数据请求
    ///
    /// 流程: 登记(PENDING) → 外呼一次 → 更新状态(SENT/FAILED)
    /// 返回带最终状态的请求记录; 投递失败体现在状态上而不是 Err
    pub async fn send_cost_data_request(
        &self,
        part_no: &str,
        department: &str,
        requested_data: &str,
        message: &str,
    ) -> ApiResult<CostDataRequest> {
        if part_no.trim().is_empty() {
            return Err(ApiError::InvalidInput("零件号不能为空".to_string()));
        }
        if department.trim().is_empty() {
            return Err(ApiError::InvalidInput("接收部门不能为空".to_string()));
        }

        // 部门收件人未配置时仍允许发送, 仅留痕提示
        let recipients = self
            .config_manager
            .get_department_recipients()
            .await
            .unwrap_or_default();
        if !recipients.contains_key(department) {
            warn!(department = %department, "部门收件人未配置, 由投递通道决定去向");
        }

        let mut request = CostDataRequest::new(part_no, department, requested_data, message);
        self.request_repo.insert(&request)?;

        match self.notifier.send(&request).await {
            Ok(()) => {
                request.status = RequestStatus::Sent;
            }
            Err(e) => {
                warn!(request_id = %request.request_id, error = %e, "成本数据请求发送失败");
                request.status = RequestStatus::Failed;
            }
        }

        self.request_repo
            .update_status(&request.request_id, request.status)?;

        Ok(request)
    }

    /// 查询最近请求（审计视图）
    pub fn list_requests(&self, limit: i32) -> ApiResult<Vec<CostDataRequest>> {
        let limit = if limit <= 0 { 50 } else { limit };
        Ok(self.request_repo.list_recent(limit)?)
    }

    /// 按零件号查询请求
    pub fn list_requests_by_part(&self, part_no: &str) -> ApiResult<Vec<CostDataRequest>> {
        if part_no.trim().is_empty() {
            return Err(ApiError::InvalidInput("零件号不能为空".to_string()));
        }
        Ok(self.request_repo.list_by_part(part_no)?)
    }
}
