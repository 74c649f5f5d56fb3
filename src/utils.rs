//! 包含抽取层共用的文本与 URL 工具函数。

use regex::Regex;
use std::sync::LazyLock;

/// 上游站点的固定源。抽取规则中的绝对链接也以此为前缀。
pub const BASE_URL: &str = "https://pagalnew.com";

static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("编译 HTML_TAG_REGEX 失败"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("编译 WHITESPACE_REGEX 失败"));

static SLUG_INVALID_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("编译 SLUG_INVALID_CHARS_REGEX 失败"));

static SLUG_HYPHEN_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("编译 SLUG_HYPHEN_RUN_REGEX 失败"));

/// 抽取层的统一文本规范化：去除标签、解码固定的几种实体、合并空白并去除首尾空白。
pub fn clean_text(text: &str) -> String {
    let without_tags = HTML_TAG_REGEX.replace_all(text, "");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    WHITESPACE_REGEX.replace_all(&decoded, " ").trim().to_string()
}

/// 把站内的相对路径或图片地址改写为固定源下的绝对 URL。
///
/// 已经是绝对地址的输入原样返回，因此对结果再次调用是幂等的。
/// 空字符串保持为空，表示“没有这个字段”。
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http") {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("/../") {
        format!("{BASE_URL}/{rest}")
    } else if let Some(rest) = url.strip_prefix("../") {
        format!("{BASE_URL}/{rest}")
    } else if let Some(rest) = url.strip_prefix("./") {
        format!("{BASE_URL}/{rest}")
    } else if url.starts_with('/') {
        format!("{BASE_URL}{url}")
    } else {
        format!("{BASE_URL}/{url}")
    }
}

/// 将空字符串转换为 `None`。
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// 从 `start` 开始截取最多 `max_len` 字节的窗口，边界对齐到字符边界。
pub fn bounded_window(text: &str, start: usize, max_len: usize) -> &str {
    if start >= text.len() {
        return "";
    }
    let mut start = start;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    let mut end = start.saturating_add(max_len).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[start..end]
}

/// 把歌手名转换为站点使用的 slug，例如 `"Arijit Singh"` -> `"arijit-singh"`。
pub fn artist_name_to_slug(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let filtered = SLUG_INVALID_CHARS_REGEX.replace_all(&lower, "");
    let hyphenated = WHITESPACE_REGEX.replace_all(&filtered, "-");
    SLUG_HYPHEN_RUN_REGEX
        .replace_all(&hyphenated, "-")
        .trim_matches('-')
        .to_string()
}

/// 由分类名生成分类列表路径，例如 `"Punjabi"` -> `"/category/punjabi-mp3-tracks"`。
///
/// 从面包屑中取出的分类名本身可能已经带有 `tracks` 后缀（如 `"bollywood tracks"`），
/// 这时不再追加。
pub fn category_label_to_path(label: &str) -> Option<String> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let slug = WHITESPACE_REGEX
        .replace_all(&label.to_lowercase(), "-")
        .into_owned();
    if slug.ends_with("-tracks") {
        Some(format!("/category/{slug}"))
    } else {
        Some(format!("/category/{slug}-mp3-tracks"))
    }
}
