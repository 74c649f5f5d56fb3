//! 上游站点的 HTTP 访问层与 URL 构造。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT},
};
use tracing::{debug, instrument, warn};

use crate::{
    config::GrooveConfig,
    error::{GrooveError, Result},
    providers::Fetcher,
    utils::{BASE_URL, artist_name_to_slug, normalize_url},
};

/// 基于 `reqwest` 的 [`Fetcher`] 实现。
///
/// 内部只有一个 `Client`，克隆时共享同一个连接池。
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http_client: Client,
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| anyhow::anyhow!("无效的请求头 {name}: {e}").into())
}

impl HttpFetcher {
    /// 按配置中的请求头与超时构建客户端。
    pub fn new(config: &GrooveConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&USER_AGENT, &config.user_agent)?);
        headers.insert(ACCEPT, header_value(&ACCEPT, &config.accept)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value(&ACCEPT_LANGUAGE, &config.accept_language)?,
        );

        let http_client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("请求页面");
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("上游返回了状态码 {status}");
            return Err(GrooveError::Transport {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            warn!("上游返回了空的响应体");
            return Err(GrooveError::EmptyBody(url.to_string()));
        }

        debug!("收到 {} 字节", body.len());
        Ok(body)
    }
}

// =================================================================
// URL 构造
// =================================================================

/// 搜索页 URL。
pub fn search_url(query: &str) -> String {
    format!("{BASE_URL}/search.php?find={}", urlencoding::encode(query))
}

/// 首页 URL。
pub fn home_url() -> String {
    BASE_URL.to_string()
}

/// 歌曲或专辑详情页 URL。绝对地址原样返回，站内路径补全为绝对地址。
pub fn detail_url(id_or_path: &str) -> String {
    normalize_url(id_or_path)
}

/// 分类列表第 `page` 页的 URL。第 1 页即分类路径本身。
pub fn category_page_url(category_path: &str, page: u32) -> String {
    let base = detail_url(category_path);
    if page <= 1 {
        base
    } else {
        format!("{}/{page}", base.trim_end_matches('/'))
    }
}

/// 专辑第 `page` 页的 URL：`…/x.html` 变为 `…/x/<page>`，否则直接追加 `/<page>`。
pub fn album_page_url(album_url: &str, page: u32) -> String {
    let base = detail_url(album_url);
    match base.strip_suffix(".html") {
        Some(stem) => format!("{stem}/{page}"),
        None => format!("{}/{page}", base.trim_end_matches('/')),
    }
}

/// 歌手作品列表第 `page` 页的 URL。第 1 页即歌手页本身。
pub fn artist_page_url(artist_url: &str, page: u32) -> String {
    if page <= 1 {
        artist_url.to_string()
    } else {
        format!("{}/{page}", artist_url.replace(".html", ""))
    }
}

/// 将歌手 URL、站内路径、slug 或姓名解析为歌手页的绝对 URL。
pub fn resolve_artist_url(artist: &str) -> String {
    let artist = artist.trim();
    if artist.starts_with("http") {
        artist.to_string()
    } else if artist.starts_with('/') {
        format!("{BASE_URL}{artist}")
    } else {
        let slug = artist_name_to_slug(artist.trim_end_matches(".html"));
        format!("{BASE_URL}/singer/{slug}.html")
    }
}

/// 从歌手页 URL 中取出 slug，例如 `…/singer/arijit-singh.html` -> `arijit-singh`。
pub fn artist_slug_from_url(artist_url: &str) -> Option<String> {
    artist_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(|last| last.trim_end_matches(".html").to_string())
        .filter(|slug| !slug.is_empty())
}
