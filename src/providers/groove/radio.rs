//! # 电台
//!
//! 电台是一个没有服务端状态的无限歌曲序列。创建时只确定一组初始歌曲路径，
//! 之后所有的扩展结果都编码在续页标记 `"<页索引>:<逗号分隔的路径>"` 中，
//! 随每一页返回给调用方。
//!
//! 拉取时如果当前页的起点已经超出路径列表，会先尝试扩展：
//!
//! 1. 抓取最后一首歌的详情页，追加其 “More Songs From” 区块中的新路径；
//! 2. 如果没有任何新路径、且电台记录了分类路径，则从分类列表中补充歌曲。
//!
//! 扩展之后仍然没有可用歌曲时，序列结束。

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::{
    error::{GrooveError, Result},
    model::{
        generic::{Radio, RadioSeed, Track},
        page::Page,
    },
    providers::{
        Fetcher,
        groove::{GrooveMusic, api, models::ItemKind, parser},
    },
    utils::{category_label_to_path, non_empty},
};

const RADIO_UNAVAILABLE: &str = "Radio unavailable";
const NO_SIMILAR_TRACKS: &str = "No similar tracks available";

/// 在两次拉取之间传递的电台状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioState {
    /// 下一次要返回的页索引，从 0 开始。
    pub page_index: usize,
    /// 目前已知的全部歌曲路径，无重复。
    pub paths: Vec<String>,
}

impl RadioState {
    /// 编码为续页标记。
    pub fn encode(&self) -> String {
        format!("{}:{}", self.page_index, self.paths.join(","))
    }

    /// 从续页标记解码。
    ///
    /// 页索引部分必须是非负整数；路径部分中的空项会被忽略。
    pub fn decode(token: &str) -> Result<Self> {
        let invalid = || GrooveError::InvalidContinuation(token.to_string());

        let (index, paths) = token.split_once(':').ok_or_else(invalid)?;
        let page_index = index.trim().parse::<usize>().map_err(|_| invalid())?;
        let paths = paths
            .split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self { page_index, paths })
    }
}

/// 按首次出现的顺序去重。
fn dedup_paths(paths: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// 把 `candidates` 中尚未出现过的路径追加到 `paths`，返回新增数量。
fn append_new_paths(paths: &mut Vec<String>, candidates: impl IntoIterator<Item = String>) -> usize {
    let mut seen: HashSet<String> = paths.iter().cloned().collect();
    let before = paths.len();
    paths.extend(
        candidates
            .into_iter()
            .filter(|path| seen.insert(path.clone())),
    );
    paths.len() - before
}

fn unavailable_radio(seed: &RadioSeed) -> Radio {
    Radio {
        id: format!("radio_{}", seed.value()),
        title: format!("{} Radio", seed.value()),
        subtitle: Some(RADIO_UNAVAILABLE.to_string()),
        ..Default::default()
    }
}

impl<F: Fetcher> GrooveMusic<F> {
    /// 由种子创建电台。任何失败都只会得到一个没有歌曲的电台。
    pub(super) async fn build_radio(&self, seed: &RadioSeed) -> Radio {
        let result = match seed {
            RadioSeed::Track(id) => self.radio_from_track(id).await,
            RadioSeed::Album(id) => self.radio_from_album(id).await,
            RadioSeed::Artist(id) => self.radio_from_artist(id).await,
        };

        match result {
            Ok(radio) => {
                info!(
                    "电台 {} 创建完成，初始歌曲 {} 首",
                    radio.id,
                    radio.track_paths.len()
                );
                radio
            }
            Err(e) => {
                warn!("创建电台失败: {e}");
                unavailable_radio(seed)
            }
        }
    }

    /// 歌曲种子：依次尝试相似歌曲、所属专辑、所属分类，使用第一个有结果的来源。
    async fn radio_from_track(&self, track_id: &str) -> Result<Radio> {
        let url = api::detail_url(track_id);
        let html = self.fetcher.fetch(&url).await?;
        let detail = parser::parse_song_detail(&html, &url);

        let mut paths: Vec<String> = parser::parse_similar_songs(&html)
            .into_iter()
            .map(|song| song.url)
            .collect();
        if !paths.is_empty() {
            debug!("从相似歌曲区块得到 {} 首歌曲", paths.len());
        }

        let album_url = detail.as_ref().and_then(|song| song.album_url.clone());
        if paths.is_empty()
            && let Some(album_url) = album_url
        {
            match self.fetch_album_detail(&album_url).await {
                Ok(album) => {
                    paths = album.songs.into_iter().map(|song| song.url).collect();
                    debug!("从所属专辑得到 {} 首歌曲", paths.len());
                }
                Err(e) => warn!("获取所属专辑失败: {e}"),
            }
        }

        let category_path = detail
            .as_ref()
            .and_then(|song| category_label_to_path(&song.category));
        if paths.is_empty()
            && let Some(category_path) = &category_path
            && let Some(content) = self.fetch_category_page(category_path, 1).await
        {
            paths = content
                .items
                .into_iter()
                .filter(|item| item.kind == ItemKind::Song)
                .map(|item| item.url)
                .collect();
            debug!("从分类列表得到 {} 首歌曲", paths.len());
        }

        let paths = dedup_paths(paths);
        let title = detail
            .as_ref()
            .map_or_else(|| url.clone(), |song| song.title.clone());
        let subtitle = if paths.is_empty() {
            NO_SIMILAR_TRACKS.to_string()
        } else {
            format!("Similar tracks ({}+ songs)", paths.len())
        };

        Ok(Radio {
            id: format!("radio_{url}"),
            title: format!("{title} Radio"),
            subtitle: Some(subtitle),
            cover_url: detail.and_then(|song| non_empty(song.cover_image)),
            track_paths: paths,
            category_path,
        })
    }

    /// 专辑种子：专辑的歌曲列表加上专辑所属分类。
    async fn radio_from_album(&self, album_id: &str) -> Result<Radio> {
        let album = self.fetch_album_detail(album_id).await?;
        let paths = dedup_paths(album.songs.into_iter().map(|song| song.url));

        Ok(Radio {
            id: format!("radio_{}", album.url),
            title: format!("{} Radio", album.name),
            subtitle: Some(format!(
                "Songs from {} ({}+ songs)",
                album.name,
                paths.len()
            )),
            cover_url: non_empty(album.cover_image),
            track_paths: paths,
            category_path: category_label_to_path(&album.category),
        })
    }

    /// 歌手种子：最多若干页的歌手作品。
    async fn radio_from_artist(&self, artist: &str) -> Result<Radio> {
        let url = api::resolve_artist_url(artist);
        let pages = self
            .fetch_artist_pages(&url, self.config.radio_artist_page_cap)
            .await;

        let name = pages
            .first()
            .map_or_else(|| artist.to_string(), |page| page.artist_name.clone());
        let cover_url = pages
            .iter()
            .flat_map(|page| page.songs.iter())
            .find_map(|song| non_empty(song.cover_image.clone()));
        let paths = dedup_paths(
            pages
                .into_iter()
                .flat_map(|page| page.songs)
                .map(|song| song.url),
        );

        Ok(Radio {
            id: format!("radio_{url}"),
            title: format!("{name} Radio"),
            subtitle: Some(format!("Songs by {name} ({}+ songs)", paths.len())),
            cover_url,
            track_paths: paths,
            category_path: None,
        })
    }

    /// 拉取电台的一页歌曲。
    pub(super) async fn next_radio_page(
        &self,
        radio: &Radio,
        continuation: Option<&str>,
    ) -> Result<Page<Track>> {
        let mut state = match continuation {
            Some(token) => RadioState::decode(token)?,
            None if radio.track_paths.is_empty() => {
                debug!("电台没有任何初始歌曲");
                return Ok(Page::empty());
            }
            None => RadioState {
                page_index: 0,
                paths: radio.track_paths.clone(),
            },
        };

        let page_size = self.config.radio_page_size.max(1);
        let start = state.page_index.checked_mul(page_size).ok_or_else(|| {
            GrooveError::InvalidContinuation(continuation.unwrap_or_default().to_string())
        })?;

        if start >= state.paths.len() {
            debug!(
                "第 {} 页超出已知的 {} 首歌曲，尝试扩展",
                state.page_index,
                state.paths.len()
            );
            self.expand_radio(&mut state, radio.category_path.as_deref())
                .await;
        }

        if start >= state.paths.len() {
            info!("电台 {} 没有更多歌曲", radio.id);
            return Ok(Page::empty());
        }

        let end = start.saturating_add(page_size).min(state.paths.len());
        let mut tracks = Vec::with_capacity(end - start);
        for path in &state.paths[start..end] {
            match self.fetch_song_detail(path).await {
                Ok(detail) => tracks.push(Track::from(detail)),
                Err(e) => warn!("跳过电台歌曲 {path}: {e}"),
            }
        }
        debug!(
            "电台第 {} 页得到 {} 首歌曲",
            state.page_index,
            tracks.len()
        );

        let continuation = (end < state.paths.len() || !tracks.is_empty()).then(|| {
            RadioState {
                page_index: state.page_index + 1,
                paths: state.paths,
            }
            .encode()
        });

        Ok(Page {
            items: tracks,
            continuation,
        })
    }

    /// 扩展路径列表。相似歌曲抓取失败时直接停止；没有新路径时回退到分类列表。
    async fn expand_radio(&self, state: &mut RadioState, category_path: Option<&str>) {
        if let Some(last) = state.paths.last() {
            let url = api::detail_url(last);
            match self.fetcher.fetch(&url).await {
                Ok(html) => {
                    let added = append_new_paths(
                        &mut state.paths,
                        parser::parse_similar_songs(&html)
                            .into_iter()
                            .map(|song| song.url),
                    );
                    if added > 0 {
                        debug!("从相似歌曲新增 {added} 首");
                        return;
                    }
                }
                Err(e) => {
                    warn!("获取相似歌曲失败，停止扩展: {e}");
                    return;
                }
            }
        }

        let Some(category_path) = category_path else {
            return;
        };
        let Some(page) = self.config.category_fallback_page(state.page_index) else {
            warn!("第 {} 页对应的分类页码超出范围", state.page_index);
            return;
        };
        if let Some(content) = self.fetch_category_page(category_path, page).await {
            let added = append_new_paths(
                &mut state.paths,
                content
                    .items
                    .into_iter()
                    .filter(|item| item.kind == ItemKind::Song)
                    .map(|item| item.url),
            );
            debug!("从分类第 {page} 页新增 {added} 首");
        }
    }
}
