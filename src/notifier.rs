// ==========================================
// 发动机零部件成本移动看板 - 邮件通知接缝
// ==========================================
// 职责: 向其他部门发送成本数据请求
// 约定: 单次外呼, 成功/失败两种结局; 无重试、无背压、无顺序保证
// ==========================================

use crate::domain::request::CostDataRequest;
use async_trait::async_trait;
use thiserror::Error;

// ==========================================
// NotifyError - 通知错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("收件部门无效: {0}")]
    InvalidRecipient(String),

    #[error("发送失败: {0}")]
    SendFailure(String),
}

/// Result 类型别名
pub type NotifyResult<T> = Result<T, NotifyError>;

// ==========================================
// Trait: CostNotifier
// ==========================================
// 外部协作方接缝: 实现方负责真正的投递通道
#[async_trait]
pub trait CostNotifier: Send + Sync {
    /// 发送一条成本数据请求
    async fn send(&self, request: &CostDataRequest) -> NotifyResult<()>;
}

// ==========================================
// OutboxNotifier - 缺省实现
// ==========================================
// 桌面端默认不直连邮件服务器: 记录结构化日志,
// 由外围集成 (企业邮件网关) 消费 outbox 日志流
pub struct OutboxNotifier;

#[async_trait]
impl CostNotifier for OutboxNotifier {
    async fn send(&self, request: &CostDataRequest) -> NotifyResult<()> {
        if request.department.trim().is_empty() {
            return Err(NotifyError::InvalidRecipient("部门为空".to_string()));
        }

        tracing::info!(
            request_id = %request.request_id,
            part_no = %request.part_no,
            department = %request.department,
            requested_data = %request.requested_data,
            "成本数据请求已写入 outbox"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outbox_notifier_accepts_valid_request() {
        let request = CostDataRequest::new("12100-0101", "采购部", "JSP明细", "请提供");
        assert!(OutboxNotifier.send(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_outbox_notifier_rejects_empty_department() {
        let request = CostDataRequest::new("12100-0101", "  ", "JSP明细", "请提供");
        let err = OutboxNotifier.send(&request).await.unwrap_err();
        assert!(matches!(err, NotifyError::InvalidRecipient(_)));
    }
}
