// ==========================================
// 发动机零部件成本移动看板 - 展示格式化层
// ==========================================
// 职责: 原始数值/日期 → 展示字符串与样式标记
// 红线: 全部为全函数, 不抛错, 无副作用 (未知月份键仅记 warn)
// ==========================================

use crate::domain::types::DiffTone;

/// 货币符号 (固定口径: 日元, 无小数位)
pub const CURRENCY_SYMBOL: &str = "¥";

/// 格式化货币金额
///
/// 四舍五入到整数, 千分位分组, 固定货币符号, 无小数位
///
/// # 示例
/// - `format_currency(1500000.0)` → `"¥1,500,000"`
/// - `format_currency(-1234.5)` → `"-¥1,235"`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    // 千分位分组
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}{}", CURRENCY_SYMBOL, grouped)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, grouped)
    }
}

/// 成本差异 → 样式色调
///
/// 符号约定 (必须保持): 上升=不利(红), 下降=有利(绿), 持平=中性
pub fn difference_tone(change: f64) -> DiffTone {
    if change > 0.0 {
        DiffTone::Adverse
    } else if change < 0.0 {
        DiffTone::Favorable
    } else {
        DiffTone::Neutral
    }
}

/// 月份键 → 展示标签
///
/// 封闭查找表 (2025 财年 8 月回溯到 3 月); 未知键回退到缺省标签
/// "August 2025"。回退行为沿用既有口径, 但未知键属于潜在缺陷,
/// 在此记一条 warn 日志便于排查。
pub fn display_date(month_key: &str) -> &'static str {
    match month_key {
        "august-2025" => "August 2025",
        "july-2025" => "July 2025",
        "june-2025" => "June 2025",
        "may-2025" => "May 2025",
        "april-2025" => "April 2025",
        "march-2025" => "March 2025",
        _ => {
            tracing::warn!(month_key = %month_key, "未知月份键, 回退到缺省标签");
            "August 2025"
        }
    }
}

/// 对比期标签: 取首个连字符前的月份词, 首字母大写, 拼接给定年份
///
/// # 示例
/// - `comparison_date("july-2025", "2024")` → `"July 2024"`
pub fn comparison_date(month_value: &str, comp_year: &str) -> String {
    let month_token = month_value.split('-').next().unwrap_or("");

    let mut chars = month_token.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    format!("{} {}", capitalized, comp_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(1500000.0), "¥1,500,000");
        assert_eq!(format_currency(0.0), "¥0");
        assert_eq!(format_currency(999.0), "¥999");
        assert_eq!(format_currency(1000.0), "¥1,000");
        assert_eq!(format_currency(12345678.0), "¥12,345,678");
    }

    #[test]
    fn test_format_currency_rounds_to_integer() {
        assert_eq!(format_currency(1234.49), "¥1,234");
        assert_eq!(format_currency(1234.5), "¥1,235");
        assert_eq!(format_currency(-1234.5), "-¥1,235");
    }

    #[test]
    fn test_difference_tone_sign_convention() {
        // 成本上升 → 不利; 下降 → 有利; 持平 → 中性
        assert_eq!(difference_tone(42.0), DiffTone::Adverse);
        assert_eq!(difference_tone(0.01), DiffTone::Adverse);
        assert_eq!(difference_tone(-42.0), DiffTone::Favorable);
        assert_eq!(difference_tone(-0.01), DiffTone::Favorable);
        assert_eq!(difference_tone(0.0), DiffTone::Neutral);
    }

    #[test]
    fn test_difference_tone_css_classes() {
        assert_eq!(difference_tone(1.0).css_class(), "text-red-600");
        assert_eq!(difference_tone(-1.0).css_class(), "text-green-600");
        assert_eq!(difference_tone(0.0).css_class(), "text-gray-500");
    }

    #[test]
    fn test_display_date_known_keys() {
        assert_eq!(display_date("august-2025"), "August 2025");
        assert_eq!(display_date("july-2025"), "July 2025");
        assert_eq!(display_date("june-2025"), "June 2025");
        assert_eq!(display_date("may-2025"), "May 2025");
        assert_eq!(display_date("april-2025"), "April 2025");
        assert_eq!(display_date("march-2025"), "March 2025");
    }

    #[test]
    fn test_display_date_unknown_key_falls_back() {
        assert_eq!(display_date("december-2030"), "August 2025");
        assert_eq!(display_date(""), "August 2025");
        assert_eq!(display_date("August 2025"), "August 2025");
    }

    #[test]
    fn test_comparison_date() {
        assert_eq!(comparison_date("july-2025", "2024"), "July 2024");
        assert_eq!(comparison_date("march-2025", "2023"), "March 2023");
        // 无连字符时整串作为月份词
        assert_eq!(comparison_date("august", "2025"), "August 2025");
    }
}
