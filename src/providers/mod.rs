//! 提供商模块
//!
//! 该模块定义了两个核心抽象：负责取回原始页面的 [`Fetcher`]，
//! 以及面向宿主应用的分页查询接口 [`Provider`]。

use async_trait::async_trait;

use crate::{
    error::Result,
    model::{
        generic::{Album, Artist, MediaItem, Radio, RadioSeed, StreamSource, Streamable, Track},
        page::{HomeFeed, Page, SearchFeed},
    },
};

pub mod groove;

/// 取回页面原文的抽象。
///
/// 实现必须可以被多个进行中的请求同时使用。
#[async_trait]
pub trait Fetcher: Send + Sync {
    ///
    /// 以 GET 方式请求 `url` 并返回响应体。
    ///
    /// # 返回
    /// 非 2xx 状态码返回 `GrooveError::Transport`，空响应体返回 `GrooveError::EmptyBody`。
    ///
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// 定义了音乐站点适配器需要向宿主应用提供的全部查询。
#[async_trait]
pub trait Provider: Send + Sync {
    ///
    /// 返回提供商的唯一名称。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 按关键词搜索歌曲与专辑。
    ///
    /// # 参数
    /// * `query` - 搜索关键词。空白关键词直接返回空结果。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含按页面顺序排列的歌曲与专辑。
    ///
    async fn search(&self, query: &str) -> Result<SearchFeed>;

    ///
    /// 快速搜索：与 `search` 相同，但每类结果只保留前几项。
    ///
    async fn quick_search(&self, query: &str) -> Result<SearchFeed>;

    ///
    /// 加载首页的最新歌曲与最近专辑。
    ///
    async fn load_home(&self) -> Result<HomeFeed>;

    ///
    /// 分页列出某个分类下的歌曲与专辑。
    ///
    /// # 参数
    /// * `category` - 分类 slug、站内路径或完整 URL。
    /// * `continuation` - 上一页返回的续页标记，首页传 `None`。
    ///
    /// # 返回
    /// 一页混合条目。页面抓取失败时返回空页，而不是错误。
    ///
    async fn list_category(
        &self,
        category: &str,
        continuation: Option<&str>,
    ) -> Result<Page<MediaItem>>;

    ///
    /// 根据歌曲 URL 或路径加载歌曲详情。
    ///
    /// # 返回
    /// 页面无法识别为歌曲时返回 `GrooveError::NotFound`。
    ///
    async fn load_track(&self, track_id: &str) -> Result<Track>;

    ///
    /// 将一个可播放选项解析为最终音频源。
    ///
    /// # 返回
    /// 非 `Server` 类型的资源返回 `GrooveError::UnsupportedOperation`。
    ///
    async fn load_stream(&self, streamable: &Streamable) -> Result<StreamSource>;

    ///
    /// 根据专辑 URL 或路径加载专辑概要。
    ///
    async fn load_album(&self, album_id: &str) -> Result<Album>;

    ///
    /// 加载专辑的全部歌曲，自动请求所有分页。
    ///
    async fn load_album_tracks(&self, album_id: &str) -> Result<Vec<Track>>;

    ///
    /// 根据歌手 URL、路径、slug 或姓名加载歌手概要。
    ///
    async fn load_artist(&self, artist: &str) -> Result<Artist>;

    ///
    /// 加载歌手的作品列表，最多请求配置中规定的页数。
    ///
    async fn load_artist_discography(&self, artist: &str) -> Result<Vec<Track>>;

    ///
    /// 由种子实体创建电台。
    ///
    /// 该操作不会失败：找不到任何歌曲时返回一个空电台。
    ///
    async fn create_radio(&self, seed: &RadioSeed) -> Result<Radio>;

    ///
    /// 拉取电台的下一页歌曲。
    ///
    /// # 参数
    /// * `radio` - `create_radio` 返回的电台。
    /// * `continuation` - 上一页返回的续页标记，首页传 `None`。
    ///
    async fn pull_radio(&self, radio: &Radio, continuation: Option<&str>) -> Result<Page<Track>>;
}
