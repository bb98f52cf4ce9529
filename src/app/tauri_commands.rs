// ==========================================
// 发动机零部件成本移动看板 - Tauri 命令层
// ==========================================
// 职责: 将 API 层操作暴露为前端可调用的命令
// 约定: 返回 JSON 字符串; 错误统一为 {code, message, details}
// ==========================================

#![cfg(feature = "tauri-app")]

mod common;
mod comparison;
mod config;
mod import;
mod notification;
mod part;

pub use comparison::*;
pub use config::*;
pub use import::*;
pub use notification::*;
pub use part::*;
