//! 实现了与 pagalnew.com 进行交互的 `Provider`。
//!
//! 该站点没有公开 API，所有数据都来自对 HTML 页面的抽取。
//!
//! # 使用流程
//!
//! 1. 使用 `search` 或 `list_category` 找到歌曲或专辑，它们的 `id` 即页面 URL。
//! 2. 将 `id` 作为参数调用其他函数：
//!    - `load_track(id)` 获取歌曲详情与可播放选项。
//!    - `load_album(id)` / `load_album_tracks(id)` 获取专辑信息与完整歌曲列表。
//!    - `create_radio(seed)` 创建电台，再用 `pull_radio` 逐页拉取。

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::GrooveConfig,
    error::{GrooveError, Result},
    model::{
        generic::{
            Album, Artist, MediaItem, Radio, RadioSeed, StreamKind, StreamSource, Streamable,
            Track,
        },
        page::{HomeFeed, Page, SearchFeed},
    },
    providers::{Fetcher, Provider},
};

pub mod api;
pub mod category;
pub mod converters;
pub mod models;
pub mod parser;
pub mod radio;

use api::HttpFetcher;
use models::{AlbumDetail, ArtistSongs, CategoryContent, SongDetail};

const PROVIDER_NAME: &str = "groove";

/// pagalnew.com 的 Provider 实现。
///
/// 除了续页标记之外不保存任何跨调用状态；`fetcher` 是唯一共享的资源。
#[derive(Debug, Clone)]
pub struct GrooveMusic<F: Fetcher = HttpFetcher> {
    fetcher: F,
    config: GrooveConfig,
}

impl GrooveMusic<HttpFetcher> {
    /// 使用默认配置创建实例。
    pub fn new() -> Result<Self> {
        Self::from_config(GrooveConfig::default())
    }

    /// 使用给定配置创建实例，请求头与超时也取自该配置。
    pub fn from_config(config: GrooveConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: Fetcher> GrooveMusic<F> {
    /// 使用自定义的 [`Fetcher`] 创建实例。
    pub fn with_fetcher(fetcher: F, config: GrooveConfig) -> Self {
        Self { fetcher, config }
    }

    /// 当前使用的配置。
    pub fn config(&self) -> &GrooveConfig {
        &self.config
    }

    /// 抓取并解析歌曲详情页。页面无法识别为歌曲时返回 `NotFound`。
    async fn fetch_song_detail(&self, track_id: &str) -> Result<SongDetail> {
        let url = api::detail_url(track_id);
        let html = self.fetcher.fetch(&url).await?;
        parser::parse_song_detail(&html, &url)
            .ok_or_else(|| GrooveError::NotFound(format!("歌曲 {url}")))
    }

    /// 抓取并解析专辑详情页。页面无法识别为专辑时返回 `NotFound`。
    async fn fetch_album_detail(&self, album_id: &str) -> Result<AlbumDetail> {
        let url = api::detail_url(album_id);
        let html = self.fetcher.fetch(&url).await?;
        parser::parse_album_detail(&html, &url)
            .ok_or_else(|| GrooveError::NotFound(format!("专辑 {url}")))
    }

    /// 抓取分类列表的一页。失败时记录日志并返回 `None`。
    async fn fetch_category_page(&self, category_path: &str, page: u32) -> Option<CategoryContent> {
        let url = api::category_page_url(category_path, page);
        match self.fetcher.fetch(&url).await {
            Ok(html) => Some(parser::parse_category_content(
                &html,
                page,
                &self.config.category_slugs,
            )),
            Err(e) => {
                warn!("获取分类页 {url} 失败: {e}");
                None
            }
        }
    }

    /// 逐页抓取歌手作品列表，最多 `page_cap` 页。
    ///
    /// 某页抓取失败、没有歌曲或没有下一页时停止，已取得的页面照常返回。
    async fn fetch_artist_pages(&self, artist_url: &str, page_cap: u32) -> Vec<ArtistSongs> {
        let mut pages = Vec::new();

        for page in 1..=page_cap {
            let url = api::artist_page_url(artist_url, page);
            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("获取歌手第 {page} 页失败: {e}");
                    break;
                }
            };

            let songs = parser::parse_artist_songs(&html, page);
            if songs.songs.is_empty() {
                debug!("歌手第 {page} 页没有歌曲，停止翻页。");
                break;
            }
            let has_next_page = songs.has_next_page;
            pages.push(songs);
            if !has_next_page {
                break;
            }
        }

        pages
    }

    /// 专辑的全部歌曲，按路径去重。额外分页抓取失败时跳过该页。
    async fn collect_album_songs(&self, album_id: &str) -> Result<(Album, Vec<Track>)> {
        let detail = self.fetch_album_detail(album_id).await?;
        let album_url = detail.url.clone();
        let extra_pages: Vec<u32> = if detail.has_pagination {
            detail
                .pagination_pages
                .iter()
                .copied()
                .filter(|&page| page != 1)
                .collect()
        } else {
            Vec::new()
        };

        let mut seen = HashSet::new();
        let mut songs: Vec<_> = detail
            .songs
            .iter()
            .filter(|song| seen.insert(song.url.clone()))
            .cloned()
            .collect();
        let album = Album::from(detail);

        for page in extra_pages {
            let page_url = api::album_page_url(&album_url, page);
            let html = match self.fetcher.fetch(&page_url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("获取专辑第 {page} 页失败: {e}");
                    continue;
                }
            };
            match parser::parse_album_detail(&html, &page_url) {
                Some(page_detail) => {
                    let before = songs.len();
                    songs.extend(
                        page_detail
                            .songs
                            .into_iter()
                            .filter(|song| seen.insert(song.url.clone())),
                    );
                    debug!("专辑第 {page} 页新增 {} 首歌曲", songs.len() - before);
                }
                None => warn!("无法解析专辑第 {page} 页"),
            }
        }

        let tracks = songs
            .into_iter()
            .map(|song| converters::album_song_to_track(song, &album))
            .collect();
        Ok((album, tracks))
    }
}

#[async_trait]
impl<F: Fetcher> Provider for GrooveMusic<F> {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<SearchFeed> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchFeed::default());
        }

        let html = self.fetcher.fetch(&api::search_url(query)).await?;
        let results = parser::parse_search_results(&html);
        info!(
            "搜索 '{query}' 得到 {} 首歌曲、{} 张专辑",
            results.songs.len(),
            results.albums.len()
        );

        Ok(SearchFeed {
            songs: results.songs.into_iter().map(Track::from).collect(),
            albums: results.albums.into_iter().map(Album::from).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn quick_search(&self, query: &str) -> Result<SearchFeed> {
        let mut feed = self.search(query).await?;
        feed.songs.truncate(self.config.quick_search_limit);
        feed.albums.truncate(self.config.quick_search_limit);
        Ok(feed)
    }

    #[instrument(skip(self))]
    async fn load_home(&self) -> Result<HomeFeed> {
        let html = self.fetcher.fetch(&api::home_url()).await?;
        let content = parser::parse_home_content(&html);
        debug!(
            "首页: {} 首最新歌曲, {} 张最近专辑",
            content.latest_songs.len(),
            content.recent_albums.len()
        );

        Ok(HomeFeed {
            latest_songs: content.latest_songs.into_iter().map(Track::from).collect(),
            recent_albums: content.recent_albums.into_iter().map(Album::from).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn list_category(
        &self,
        category: &str,
        continuation: Option<&str>,
    ) -> Result<Page<MediaItem>> {
        let page = match continuation {
            None => 1,
            Some(token) => token
                .parse::<u32>()
                .ok()
                .filter(|&page| page >= 1 && page < u32::MAX)
                .ok_or_else(|| GrooveError::InvalidContinuation(token.to_string()))?,
        };

        let path = category::resolve_category_path(category);
        let Some(content) = self.fetch_category_page(&path, page).await else {
            return Ok(Page::empty());
        };
        if content.items.is_empty() {
            debug!("分类 {path} 第 {page} 页没有条目，序列结束。");
            return Ok(Page::empty());
        }

        let continuation = content
            .current_page
            .checked_add(1)
            .filter(|_| content.has_next_page)
            .map(|next_page| next_page.to_string());
        Ok(Page {
            items: content.items.into_iter().map(MediaItem::from).collect(),
            continuation,
        })
    }

    #[instrument(skip(self))]
    async fn load_track(&self, track_id: &str) -> Result<Track> {
        let detail = self.fetch_song_detail(track_id).await?;
        Ok(Track::from(detail))
    }

    #[instrument(skip(self))]
    async fn load_stream(&self, streamable: &Streamable) -> Result<StreamSource> {
        match streamable.kind {
            StreamKind::Server => Ok(StreamSource {
                url: streamable.url.clone(),
                quality: streamable.quality,
                title: format!("{}kbps", streamable.quality),
            }),
            StreamKind::Background => Err(GrooveError::UnsupportedOperation(
                "不支持背景资源".to_string(),
            )),
            StreamKind::Subtitle => Err(GrooveError::UnsupportedOperation(
                "不支持字幕".to_string(),
            )),
        }
    }

    #[instrument(skip(self))]
    async fn load_album(&self, album_id: &str) -> Result<Album> {
        let detail = self.fetch_album_detail(album_id).await?;

        let first_page_songs = detail.songs.len() as u64;
        let paginated = detail.has_pagination && !detail.pagination_pages.is_empty();
        let total_tracks = if paginated {
            first_page_songs * detail.pagination_pages.len() as u64
        } else {
            first_page_songs
        };
        let count_label = if detail.has_pagination {
            format!("{total_tracks}+ tracks")
        } else {
            format!("{total_tracks} tracks")
        };

        let mut album = Album::from(detail);
        album.subtitle = Some(match album.subtitle.take() {
            Some(prefix) => format!("{prefix} • {count_label}"),
            None => count_label,
        });
        album.track_count = Some(total_tracks);
        Ok(album)
    }

    #[instrument(skip(self))]
    async fn load_album_tracks(&self, album_id: &str) -> Result<Vec<Track>> {
        let (album, tracks) = self.collect_album_songs(album_id).await?;
        info!("专辑 '{}' 共 {} 首歌曲", album.title, tracks.len());
        Ok(tracks)
    }

    #[instrument(skip(self))]
    async fn load_artist(&self, artist: &str) -> Result<Artist> {
        let url = api::resolve_artist_url(artist);
        let html = self.fetcher.fetch(&api::artist_page_url(&url, 1)).await?;
        let songs = parser::parse_artist_songs(&html, 1);

        Ok(Artist {
            name: songs.artist_name,
            slug: api::artist_slug_from_url(&url),
            subtitle: Some(format!("{} songs available", songs.songs.len())),
            id: url,
        })
    }

    #[instrument(skip(self))]
    async fn load_artist_discography(&self, artist: &str) -> Result<Vec<Track>> {
        let url = api::resolve_artist_url(artist);
        let pages = self
            .fetch_artist_pages(&url, self.config.discography_page_cap)
            .await;

        let tracks: Vec<Track> = pages
            .into_iter()
            .flat_map(|page| page.songs)
            .map(Track::from)
            .collect();
        info!("歌手 {url} 共加载 {} 首歌曲", tracks.len());
        Ok(tracks)
    }

    #[instrument(skip(self))]
    async fn create_radio(&self, seed: &RadioSeed) -> Result<Radio> {
        Ok(self.build_radio(seed).await)
    }

    #[instrument(skip(self, radio), fields(radio_id = %radio.id))]
    async fn pull_radio(&self, radio: &Radio, continuation: Option<&str>) -> Result<Page<Track>> {
        self.next_radio_page(radio, continuation).await
    }
}
