// ==========================================
// 发动机零部件成本移动看板 - 对比启动
// ==========================================
// 职责: 校验选择集规模, 编码/解码对比路由
// 路由契约: 逗号连接 + 百分号转义, decode(encode(list)) == list
// ==========================================

use crate::engine::filter::PartSelection;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 对比至少需要的零件数
pub const MIN_COMPARISON_PARTS: usize = 2;

// ==========================================
// SelectionError - 选择校验错误
// ==========================================
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// 选中零件不足, 必须阻断跳转而不是静默放行
    #[error("选中零件不足: 已选{selected}个, 至少需要{required}个")]
    InsufficientSelection { selected: usize, required: usize },
}

// ==========================================
// ComparisonRoute - 对比路由标识
// ==========================================
/// 可导航的对比标识: 按勾选顺序逗号连接、百分号转义的零件号列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRoute {
    value: String,
}

impl ComparisonRoute {
    /// 编码零件号列表 (顺序保持)
    pub fn encode(part_nos: &[String]) -> Self {
        let value = part_nos
            .iter()
            .map(|p| percent_encode(p))
            .collect::<Vec<_>>()
            .join(",");
        Self { value }
    }

    /// 从路由字符串还原
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// 解码为零件号列表 (顺序保持, 与 encode 严格互逆)
    pub fn decode(&self) -> Vec<String> {
        if self.value.is_empty() {
            return Vec::new();
        }
        self.value.split(',').map(percent_decode).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ComparisonRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// 启动对比: 至少选中 2 个零件才生成路由
pub fn start_comparison(selection: &PartSelection) -> Result<ComparisonRoute, SelectionError> {
    if selection.len() < MIN_COMPARISON_PARTS {
        return Err(SelectionError::InsufficientSelection {
            selected: selection.len(),
            required: MIN_COMPARISON_PARTS,
        });
    }
    Ok(ComparisonRoute::encode(selection.as_slice()))
}

/// 详情路由: 单个零件号的转义标识
pub fn detail_route(part_no: &str) -> String {
    percent_encode(part_no)
}

// ==========================================
// 百分号转义
// ==========================================
// 保留字符集 [A-Za-z0-9-_.~], 其余按 UTF-8 字节转 %XX。
// 逗号被转义, 因此 split(',') 还原是无损的。

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(hex) = s.get(i + 1..i + 3) {
                if let Ok(value) = u8::from_str_radix(hex, 16) {
                    out.push(value);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection_of(parts: &[&str]) -> PartSelection {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_start_comparison_requires_two_parts() {
        let route = start_comparison(&selection_of(&["A", "B"])).unwrap();
        assert_eq!(route.as_str(), "A,B");

        let err = start_comparison(&selection_of(&["A"])).unwrap_err();
        assert_eq!(
            err,
            SelectionError::InsufficientSelection {
                selected: 1,
                required: 2
            }
        );

        let err = start_comparison(&PartSelection::new()).unwrap_err();
        assert_eq!(
            err,
            SelectionError::InsufficientSelection {
                selected: 0,
                required: 2
            }
        );
    }

    #[test]
    fn test_route_preserves_order() {
        let route = start_comparison(&selection_of(&["999Z", "120A", "555M"])).unwrap();
        assert_eq!(route.decode(), vec!["999Z", "120A", "555M"]);
    }

    #[test]
    fn test_roundtrip_with_reserved_characters() {
        let parts = vec![
            "12100-0101".to_string(),
            "AB,CD".to_string(),
            "X Y/Z".to_string(),
            "50%off".to_string(),
            "部品-01".to_string(),
        ];
        let route = ComparisonRoute::encode(&parts);
        // 逗号已被转义, 路由内的逗号只作分隔符
        assert_eq!(route.decode(), parts);
    }

    #[test]
    fn test_encode_escapes_commas() {
        let route = ComparisonRoute::encode(&["A,B".to_string(), "C".to_string()]);
        assert_eq!(route.as_str(), "A%2CB,C");
    }

    #[test]
    fn test_decode_empty_route() {
        assert!(ComparisonRoute::from_raw("").decode().is_empty());
    }

    #[test]
    fn test_decode_tolerates_malformed_escape() {
        // 非法转义序列按字面保留, 解码仍是全函数
        assert_eq!(percent_decode("A%ZZB"), "A%ZZB");
        assert_eq!(percent_decode("A%2"), "A%2");
    }

    #[test]
    fn test_detail_route() {
        assert_eq!(detail_route("12100-0101"), "12100-0101");
        assert_eq!(detail_route("A B"), "A%20B");
    }
}
