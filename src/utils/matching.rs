//! 列表过滤用的文本匹配

/// 忽略大小写的子串匹配；过滤条件为空时视为匹配
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 可选过滤条件
pub fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| contains_ignore_case(value, f))
}
