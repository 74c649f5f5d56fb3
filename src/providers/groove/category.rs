//! 站点首页上的分类标签及分类路径解析。

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// 站点导航栏上固定的几个分类。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Category {
    /// 英文歌曲。
    English,
    /// 哈里亚纳语歌曲。
    Haryanvi,
    /// 宝莱坞电影歌曲。
    Bollywood,
    /// 旁遮普语歌曲。
    Punjabi,
    /// 印度流行。
    Indipop,
    /// 泰米尔语歌曲。
    Tamil,
}

impl Category {
    /// 该分类列表的站内路径。
    pub fn path(self) -> &'static str {
        match self {
            Category::English => "/category/english-mp3-tracks",
            Category::Haryanvi => "/category/haryanvi-mp3-tracks",
            Category::Bollywood => "/category/bollywood-tracks",
            Category::Punjabi => "/category/punjabi-mp3-tracks",
            Category::Indipop => "/category/indipop-mp3-tracks",
            Category::Tamil => "/category/tamil-mp3-tracks",
        }
    }

    /// 展示用的标题。
    pub fn title(self) -> &'static str {
        match self {
            Category::English => "English",
            Category::Haryanvi => "Haryanvi",
            Category::Bollywood => "Bollywood",
            Category::Punjabi => "Punjabi",
            Category::Indipop => "Indipop",
            Category::Tamil => "Tamil",
        }
    }

    /// 所有分类，按导航栏顺序。
    pub fn all() -> Vec<Category> {
        Category::iter().collect()
    }
}

/// 把宿主传入的分类标识解析为站内路径或绝对 URL。
///
/// 接受分类 slug（如 `tamil`）、以 `/` 开头的站内路径或完整 URL；
/// 其他字符串 `s` 视为 `/category/s`。
pub fn resolve_category_path(category: &str) -> String {
    let category = category.trim();
    if let Ok(tab) = category.parse::<Category>() {
        return tab.path().to_string();
    }
    if category.starts_with('/') || category.starts_with("http") {
        return category.to_string();
    }
    format!("/category/{category}")
}
