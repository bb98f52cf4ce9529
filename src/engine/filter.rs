// ==========================================
// 发动机零部件成本移动看板 - 零件筛选
// ==========================================
// 职责: 按零件号前缀筛选目录 + 维护对比选择集
// ==========================================

use crate::domain::PartSummary;
use serde::{Deserialize, Serialize};

/// 按零件号前缀筛选目录
///
/// # 参数
/// - catalog: 零件目录 (顺序即展示顺序)
/// - prefix: 零件号前缀 (空前缀命中全部)
/// - case_sensitive: 是否大小写敏感 (配置项, 缺省敏感)
///
/// # 说明
/// 结果保持目录原始顺序
pub fn filter_by_prefix(
    catalog: &[PartSummary],
    prefix: &str,
    case_sensitive: bool,
) -> Vec<PartSummary> {
    if case_sensitive {
        catalog
            .iter()
            .filter(|p| p.part_no.starts_with(prefix))
            .cloned()
            .collect()
    } else {
        let prefix_lower = prefix.to_lowercase();
        catalog
            .iter()
            .filter(|p| p.part_no.to_lowercase().starts_with(&prefix_lower))
            .cloned()
            .collect()
    }
}

// ==========================================
// PartSelection - 对比选择集
// ==========================================
// 集合语义 + 插入序: 对比路由要求保持用户勾选顺序,
// 因此不用 HashSet 而用有序向量
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartSelection {
    part_nos: Vec<String>,
}

impl PartSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 勾选/取消勾选一个零件号
    ///
    /// 已存在则移除, 不存在则追加到末尾
    pub fn toggle(&mut self, part_no: &str) {
        if let Some(pos) = self.part_nos.iter().position(|p| p == part_no) {
            self.part_nos.remove(pos);
        } else {
            self.part_nos.push(part_no.to_string());
        }
    }

    pub fn contains(&self, part_no: &str) -> bool {
        self.part_nos.iter().any(|p| p == part_no)
    }

    pub fn len(&self) -> usize {
        self.part_nos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.part_nos.is_empty()
    }

    /// 按勾选顺序返回零件号
    pub fn as_slice(&self) -> &[String] {
        &self.part_nos
    }
}

impl FromIterator<String> for PartSelection {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut selection = PartSelection::new();
        for part_no in iter {
            if !selection.contains(&part_no) {
                selection.part_nos.push(part_no);
            }
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(part_no: &str) -> PartSummary {
        PartSummary {
            part_no: part_no.to_string(),
            part_name: format!("零件 {}", part_no),
            model: "1GD".to_string(),
            destination: "国内".to_string(),
        }
    }

    #[test]
    fn test_filter_by_prefix_order_preserving() {
        let catalog = vec![summary("120A"), summary("120B"), summary("999Z")];
        let filtered = filter_by_prefix(&catalog, "120", true);
        let nos: Vec<&str> = filtered.iter().map(|p| p.part_no.as_str()).collect();
        assert_eq!(nos, vec!["120A", "120B"]);
    }

    #[test]
    fn test_filter_by_prefix_case_sensitivity() {
        let catalog = vec![summary("abc-1"), summary("ABC-2")];

        let sensitive = filter_by_prefix(&catalog, "ABC", true);
        assert_eq!(sensitive.len(), 1);
        assert_eq!(sensitive[0].part_no, "ABC-2");

        let insensitive = filter_by_prefix(&catalog, "ABC", false);
        assert_eq!(insensitive.len(), 2);
    }

    #[test]
    fn test_filter_empty_prefix_returns_all() {
        let catalog = vec![summary("120A"), summary("999Z")];
        assert_eq!(filter_by_prefix(&catalog, "", true).len(), 2);
    }

    #[test]
    fn test_selection_toggle() {
        let mut selection = PartSelection::new();
        selection.toggle("120A");
        selection.toggle("120B");
        assert_eq!(selection.len(), 2);
        assert!(selection.contains("120A"));

        // 再次勾选即取消
        selection.toggle("120A");
        assert_eq!(selection.len(), 1);
        assert!(!selection.contains("120A"));
        assert_eq!(selection.as_slice(), ["120B".to_string()]);
    }

    #[test]
    fn test_selection_preserves_insertion_order() {
        let mut selection = PartSelection::new();
        selection.toggle("999Z");
        selection.toggle("120A");
        selection.toggle("555M");
        assert_eq!(
            selection.as_slice(),
            ["999Z".to_string(), "120A".to_string(), "555M".to_string()]
        );
    }

    #[test]
    fn test_from_iterator_dedups() {
        let selection: PartSelection =
            vec!["A".to_string(), "B".to_string(), "A".to_string()].into_iter().collect();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.as_slice(), ["A".to_string(), "B".to_string()]);
    }
}
