#![warn(missing_docs)]

//! # Groove Helper RS
//!
//! 一个把 pagalnew.com 这类纯 HTML 音乐站点转换为结构化音乐目录的 Rust 库。
//!
//! ## 主要功能
//!
//! - **搜索与浏览**: 搜索歌曲和专辑，浏览首页与分类列表。
//! - **详情**: 加载歌曲详情（含 128/320kbps 下载链接）、专辑（自动合并所有分页）和歌手作品。
//! - **电台**: 以歌曲、专辑或歌手为种子生成无限歌曲序列，
//!   所有跨页状态都编码在不透明的续页标记中。
//!
//! ## 搜索并播放
//!
//! ```rust,no_run
//! use groove_helper_rs::GrooveHelper;
//!
//! async {
//!     let helper = GrooveHelper::new().unwrap();
//!     let feed = helper.provider().search("tum hi ho").await.unwrap();
//!     if let Some(song) = feed.songs.first() {
//!         let track = helper.provider().load_track(&song.id).await.unwrap();
//!         match helper.best_stream(&track).await {
//!             Ok(Some(source)) => println!("{} -> {}", track.title, source.url),
//!             Ok(None) => println!("该歌曲没有可播放的链接。"),
//!             Err(e) => eprintln!("发生错误: {}", e),
//!         }
//!     }
//! };
//! ```
//!
//! ## 电台
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use groove_helper_rs::{GrooveHelper, model::generic::RadioSeed};
//!
//! async {
//!     let helper = GrooveHelper::new().unwrap();
//!     let seed = RadioSeed::Track("/songs/tum-hi-ho.html".to_string());
//!     let radio = helper.provider().create_radio(&seed).await.unwrap();
//!
//!     let mut pages = Box::pin(helper.radio_stream(&radio).take(3));
//!     while let Some(page) = pages.next().await {
//!         for track in page.unwrap().items {
//!             println!("{}", track.title);
//!         }
//!     }
//! };
//! ```
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod utils;

use futures::{Stream, stream};

pub use crate::{
    config::GrooveConfig,
    error::{GrooveError, Result},
    providers::groove::{GrooveMusic, category::Category},
};

use crate::{
    model::{
        generic::{MediaItem, Radio, StreamSource, Track},
        page::Page,
    },
    providers::Provider,
};

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层客户端，封装了一个 `Provider`，并在其分页查询之上提供流式接口。
///
/// 这是与本库交互的主要入口点。
pub struct GrooveHelper {
    provider: Box<dyn Provider>,
}

impl GrooveHelper {
    /// 从用户配置目录加载配置并创建客户端。
    ///
    /// 配置文件不存在时使用默认值；存在但无法解析时返回错误。
    pub fn new() -> Result<Self> {
        Self::from_config(config::load_config()?)
    }

    /// 使用给定配置创建客户端。
    pub fn from_config(config: GrooveConfig) -> Result<Self> {
        let provider = GrooveMusic::from_config(config)?;
        tracing::info!("[Main] Provider '{}' 初始化成功。", provider.name());
        Ok(Self::with_provider(provider))
    }

    /// 使用任意 `Provider` 创建客户端。
    pub fn with_provider(provider: impl Provider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// 底层的 `Provider`，所有单次查询都通过它完成。
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// 站点导航栏上的固定分类。
    pub fn categories(&self) -> Vec<Category> {
        Category::all()
    }

    /// 解析一首歌中码率最高的可播放选项。
    ///
    /// # 返回
    /// 歌曲没有任何下载链接时返回 `Ok(None)`。
    pub async fn best_stream(&self, track: &Track) -> Result<Option<StreamSource>> {
        let Some(best) = track.streamables.iter().max_by_key(|s| s.quality) else {
            return Ok(None);
        };
        self.provider.load_stream(best).await.map(Some)
    }

    /// 以流的形式逐页拉取电台歌曲，直到没有续页标记为止。
    ///
    /// 某一页失败时先产出该错误，然后流结束。
    pub fn radio_stream<'a>(
        &'a self,
        radio: &'a Radio,
    ) -> impl Stream<Item = Result<Page<Track>>> + 'a {
        stream::unfold(Some(None::<String>), move |state| async move {
            let continuation = state?;
            match self
                .provider
                .pull_radio(radio, continuation.as_deref())
                .await
            {
                Ok(page) => {
                    let next = page.continuation.clone().map(Some);
                    Some((Ok(page), next))
                }
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// 以流的形式逐页列出分类条目，直到没有续页标记为止。
    pub fn category_stream<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Stream<Item = Result<Page<MediaItem>>> + 'a {
        stream::unfold(Some(None::<String>), move |state| async move {
            let continuation = state?;
            match self
                .provider
                .list_category(category, continuation.as_deref())
                .await
            {
                Ok(page) => {
                    let next = page.continuation.clone().map(Some);
                    Some((Ok(page), next))
                }
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
