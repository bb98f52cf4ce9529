// ==========================================
// 发动机零部件成本移动看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户友好的错误消息
// 约定: 用户可见的失败是渲染消息或禁用操作, 绝不是未处理崩溃
// ==========================================

use crate::engine::comparison::SelectionError;
use crate::importer::error::ImportError;
use crate::notifier::NotifyError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    /// 对比选择不足: 必须阻断跳转并提示用户
    #[error("选中零件不足: 已选{selected}个, 至少需要{required}个")]
    InsufficientSelection { selected: usize, required: usize },

    /// 零件不存在: 详情/对比视图渲染空态
    #[error("零件不存在: {0}")]
    PartNotFound(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 导入/通知错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportFailure(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("通知发送失败: {0}")]
    NotifyFailure(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从下层错误转换
// 目的: 将技术错误转换为用户友好的业务错误
// ==========================================

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::PartNotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<SelectionError> for ApiError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::InsufficientSelection { selected, required } => {
                ApiError::InsufficientSelection { selected, required }
            }
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Repository(repo_err) => repo_err.into(),
            other => ApiError::ImportFailure(other.to_string()),
        }
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        ApiError::NotifyFailure(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
