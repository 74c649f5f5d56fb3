//! 定义了整个库通用的、与具体站点页面结构无关的目录模型。
//!
//! 抽取层得到的原始记录（见 `providers::groove::models`）最终都会被转换成
//! 这里的结构体，再交给宿主应用展示。

use serde::{Deserialize, Serialize};

/// 代表一位艺术家的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// 艺术家的唯一 ID。对于已解析的歌手页为其完整 URL，其余情况下为姓名。
    pub id: String,
    /// 艺术家姓名。
    pub name: String,
    /// 站点上的 slug，例如 `arijit-singh`。
    pub slug: Option<String>,
    /// 展示用的副标题，例如 “25 songs available”。
    pub subtitle: Option<String>,
}

impl Artist {
    /// 仅凭姓名构造一个艺术家。
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            ..Default::default()
        }
    }

    /// 将逗号分隔的姓名列表拆分为多个艺术家，忽略空白项。
    pub fn split_names(names: &str) -> Vec<Self> {
        names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Self::from_name)
            .collect()
    }
}

/// 可播放资源的类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamKind {
    /// 直接由站点提供的音频文件。
    Server,
    /// 背景视频等附加资源。
    Background,
    /// 字幕。
    Subtitle,
}

/// 一首歌的一个可播放选项（某个码率的下载链接）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streamable {
    /// 资源 ID，即下载链接本身。
    pub id: String,
    /// 码率（kbps）。
    pub quality: u32,
    /// 展示用的标题，例如 “320kbps”。
    pub title: String,
    /// 下载链接。
    pub url: String,
    /// 资源类型。
    pub kind: StreamKind,
}

/// 解析 `Streamable` 后得到的最终音频源。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSource {
    /// 可直接请求的音频 URL。
    pub url: String,
    /// 码率（kbps）。
    pub quality: u32,
    /// 展示用的标题。
    pub title: String,
}

/// 代表一首歌曲的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// 歌曲的唯一 ID，即歌曲页的绝对 URL。
    pub id: String,
    /// 歌曲名。
    pub title: String,
    /// 演唱者列表。
    pub artists: Vec<Artist>,
    /// 歌曲所属专辑名。
    pub album: Option<String>,
    /// 所属专辑页的 URL。
    pub album_id: Option<String>,
    /// 封面图片 URL。
    pub cover_url: Option<String>,
    /// 分类名。
    pub category: Option<String>,
    /// 发行年份。
    pub year: Option<String>,
    /// 发行日期的原始文本。
    pub release_date: Option<String>,
    /// 作曲、作词、主演等附加信息。
    pub description: Option<String>,
    /// 展示用的副标题。
    pub subtitle: Option<String>,
    /// 可播放选项，码率从高到低。没有任何下载链接时为空。
    pub streamables: Vec<Streamable>,
}

/// 代表一张专辑的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// 专辑的唯一 ID，即专辑页的绝对 URL。
    pub id: String,
    /// 专辑名。
    pub title: String,
    /// 专辑的艺术家列表。
    pub artists: Vec<Artist>,
    /// 封面图片 URL。
    pub cover_url: Option<String>,
    /// 分类名。
    pub category: Option<String>,
    /// 发行年份。
    pub year: Option<String>,
    /// 演员阵容、作曲等附加信息。
    pub description: Option<String>,
    /// 展示用的副标题。
    pub subtitle: Option<String>,
    /// 歌曲数量。专辑跨多页时是按页数估算的值。
    pub track_count: Option<u64>,
    /// 专辑歌曲是否分布在多页上。
    pub has_more_pages: bool,
}

/// 列表中混合出现的条目。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaItem {
    /// 一首歌。
    Track(Track),
    /// 一张专辑。
    Album(Album),
}

impl MediaItem {
    /// 条目的 ID。
    pub fn id(&self) -> &str {
        match self {
            MediaItem::Track(track) => &track.id,
            MediaItem::Album(album) => &album.id,
        }
    }

    /// 条目的标题。
    pub fn title(&self) -> &str {
        match self {
            MediaItem::Track(track) => &track.title,
            MediaItem::Album(album) => &album.title,
        }
    }
}

/// 电台的种子实体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadioSeed {
    /// 以一首歌为种子，值为歌曲 URL 或路径。
    Track(String),
    /// 以一张专辑为种子，值为专辑 URL 或路径。
    Album(String),
    /// 以一位歌手为种子，值为歌手 URL、路径或姓名。
    Artist(String),
}

impl RadioSeed {
    /// 种子的标识值。
    pub fn value(&self) -> &str {
        match self {
            RadioSeed::Track(id) | RadioSeed::Album(id) | RadioSeed::Artist(id) => id,
        }
    }
}

/// 电台句柄。
///
/// 只包含创建时发现的初始歌曲路径；之后的扩展状态全部编码在续页标记中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Radio {
    /// `radio_<种子>`。
    pub id: String,
    /// 电台标题。
    pub title: String,
    /// 展示用的副标题。
    pub subtitle: Option<String>,
    /// 封面图片 URL。
    pub cover_url: Option<String>,
    /// 初始的歌曲路径列表，已去重。
    pub track_paths: Vec<String>,
    /// 路径耗尽时用于补充歌曲的分类列表路径。
    pub category_path: Option<String>,
}
