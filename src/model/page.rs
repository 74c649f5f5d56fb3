//! 分页查询与聚合结果的容器。

use serde::{Deserialize, Serialize};

use crate::model::generic::{Album, MediaItem, Track};

/// 分页查询返回的一页结果。
///
/// `continuation` 对调用方是不透明的：只能原样传回以获取下一页，
/// 为 `None` 时表示序列结束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// 本页的条目。
    pub items: Vec<T>,
    /// 获取下一页所需的续页标记。
    pub continuation: Option<String>,
}

impl<T> Page<T> {
    /// 一个没有条目、也没有后续的页。
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            continuation: None,
        }
    }

    /// 是否还有下一页。
    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// 搜索结果。两个列表分别保持页面中的顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFeed {
    /// 匹配的歌曲。
    pub songs: Vec<Track>,
    /// 匹配的专辑。
    pub albums: Vec<Album>,
}

impl SearchFeed {
    /// 按 “先歌曲、后专辑” 的顺序展开为混合条目。
    pub fn into_items(self) -> Vec<MediaItem> {
        self.songs
            .into_iter()
            .map(MediaItem::Track)
            .chain(self.albums.into_iter().map(MediaItem::Album))
            .collect()
    }
}

/// 首页内容。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    /// 最新歌曲。
    pub latest_songs: Vec<Track>,
    /// 最近专辑。
    pub recent_albums: Vec<Album>,
}
