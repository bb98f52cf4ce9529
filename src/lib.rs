// ==========================================
// 发动机零部件成本移动看板 - 核心库
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 系统定位: 成本分析看板 (只读展示 + 部门协同请求)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 展示格式化层 - 纯函数
pub mod format;

// 引擎层 - 筛选与对比规则
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 成本表导入
pub mod importer;

// 邮件通知 - 部门成本数据请求
pub mod notifier;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ComponentKey, DiffTone, DqLevel, RequestStatus};

// 领域实体
pub use domain::{
    CostBreakdown, CostComponent, CostDataRequest, EnginePart, LvaPurchase, NonLvaPurchase,
    PartSummary, ProcessingCost, SubPartCost,
};

// 引擎
pub use engine::{ComparisonRoute, PartSelection, SelectionError};

// API
pub use api::{ComparisonApi, ImportApi, NotificationApi, PartApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "发动机零部件成本移动看板";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================
