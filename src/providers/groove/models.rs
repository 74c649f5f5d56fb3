//! 抽取层从页面中解析出的原始记录。
//!
//! 这些结构体只在一次抓取中存在：由解析函数生成，被引擎消费，
//! 转换成 `model::generic` 中的通用模型后即被丢弃。
//! 其中所有路径与图片地址都已经过 `utils::normalize_url` 规范化。

use serde::{Deserialize, Serialize};

// =================================================================
// 搜索页 (`/search.php?find=`) 的模型
// =================================================================

/// 搜索结果页中两个互相独立的区块。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// “Albums Result” 区块中的专辑，按页面顺序。
    pub albums: Vec<AlbumResult>,
    /// “Songs Result” 区块中的歌曲，按页面顺序。
    pub songs: Vec<SongResult>,
}

/// 轻量的歌曲条目，用于搜索与相似歌曲。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongResult {
    /// 站内 ID（搜索结果中为 slug，相似歌曲中为完整 URL）。
    pub id: String,
    /// 歌曲名。
    pub title: String,
    /// 专辑名；在相似歌曲区块中为演唱者。
    pub album: String,
    /// 分类名。
    pub category: String,
    /// 封面图片 URL。
    pub cover_image: String,
    /// 规范化后的歌曲页 URL。
    pub url: String,
}

/// 轻量的专辑条目。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumResult {
    /// 站内 slug。
    pub id: String,
    /// 专辑名。
    pub title: String,
    /// 分类名。
    pub category: String,
    /// 封面图片 URL。
    pub cover_image: String,
    /// 规范化后的专辑页 URL。
    pub url: String,
}

// =================================================================
// 详情页的模型
// =================================================================

/// 歌曲详情页。
///
/// 两个码率链接都可能缺失；都缺失时记录仍然有效，只是没有可播放的音频流。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongDetail {
    /// 歌曲页 URL，同时作为 ID。
    pub id: String,
    /// 歌曲名。页面上找不到时整条记录不存在。
    pub title: String,
    /// 逗号分隔的演唱者。
    pub singers: String,
    /// 主演。
    pub lead_stars: String,
    /// 作曲。
    pub composer: String,
    /// 作词。
    pub lyricist: String,
    /// 所属专辑名。
    pub album: String,
    /// 所属专辑页链接（如果页面上有）。
    pub album_url: Option<String>,
    /// 发行日期的原始文本。
    pub release_date: String,
    /// 分类名。
    pub category: String,
    /// 四位年份。
    pub year: String,
    /// 封面图片 URL。
    pub cover_image: String,
    /// 128kbps 下载链接。
    pub url_128kbps: Option<String>,
    /// 320kbps 下载链接。
    pub url_320kbps: Option<String>,
    /// 歌曲页 URL。
    pub url: String,
}

/// 专辑详情页。
///
/// 跨多页的专辑，`songs` 只包含当前页；调用方需要请求 `pagination_pages` 中的所有页。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetail {
    /// 专辑页 URL，同时作为 ID。
    pub id: String,
    /// 专辑名。页面上找不到时整条记录不存在。
    pub name: String,
    /// 封面图片 URL。
    pub cover_image: String,
    /// 逗号分隔的歌手。
    pub artists: String,
    /// 演员阵容。
    pub starcast: String,
    /// 作曲。
    pub composers: String,
    /// 四位年份。
    pub year: String,
    /// 分类名。
    pub category: String,
    /// 当前页的歌曲，按路径去重。
    pub songs: Vec<AlbumSong>,
    /// 专辑页 URL。
    pub url: String,
    /// 页面上是否存在分页标记。
    pub has_pagination: bool,
    /// 严格递增、无重复的页码。
    pub pagination_pages: Vec<u32>,
}

/// 专辑中的一首歌。`url` 是专辑内的去重键。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumSong {
    /// 歌曲名。
    pub title: String,
    /// 逗号分隔的歌手。
    pub artists: String,
    /// 歌曲页 URL。
    pub url: String,
}

// =================================================================
// 列表页（首页、分类、歌手）的模型
// =================================================================

/// 列表条目的类型。
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Song,
    Album,
}

/// 首页内容，顺序即页面顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeContent {
    /// 最新歌曲。
    pub latest_songs: Vec<HomeItem>,
    /// 最近专辑。
    pub recent_albums: Vec<HomeItem>,
}

/// 首页上的一个条目。
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeItem {
    pub title: String,
    pub subtitle: String,
    pub cover_image: String,
    pub url: String,
    pub kind: ItemKind,
}

/// 分类列表的一页。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContent {
    /// 歌曲在前、专辑在后的混合条目。
    pub items: Vec<CategoryItem>,
    /// 当前页码。
    pub current_page: u32,
    /// 页面上是否存在指向下一页的链接。
    pub has_next_page: bool,
}

/// 分类列表中的一个条目。
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub title: String,
    pub subtitle: String,
    pub cover_image: String,
    pub url: String,
    pub kind: ItemKind,
}

/// 歌手作品列表的一页。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSongs {
    /// 页面标题中的歌手名。
    pub artist_name: String,
    /// 当前页的歌曲。
    pub songs: Vec<ArtistSong>,
    /// 页面上是否有 “Next” 链接。
    pub has_next_page: bool,
    /// 当前页码。
    pub current_page: u32,
}

/// 歌手作品列表中的一首歌。
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistSong {
    pub title: String,
    pub artists: String,
    pub cover_image: String,
    pub url: String,
}
