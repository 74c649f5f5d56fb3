//! 负责加载应用配置。
//!
//! 站点结构相关的经验常量（电台分页大小、分类回退页间隔、已知分类 slug 等）
//! 都集中在这里，默认值即为实际站点上验证过的取值。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::error::{GrooveError, Result};

const CONFIG_DIR_NAME: &str = "groove-helper";
const CONFIG_FILE_NAME: &str = "config.json";

/// 适配器的全部可调参数。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GrooveConfig {
    /// 请求时使用的浏览器 User-Agent。
    pub user_agent: String,
    /// `Accept` 请求头。
    pub accept: String,
    /// `Accept-Language` 请求头。
    pub accept_language: String,
    /// 连接超时（秒）。
    pub connect_timeout_secs: u64,
    /// 整个请求的超时（秒）。
    pub timeout_secs: u64,
    /// 电台每页的歌曲数量。
    pub radio_page_size: usize,
    /// 电台回退到分类列表时，由页索引推算分类页码的除数。
    pub category_fallback_divisor: usize,
    /// 电台回退到分类列表时，分类页码的偏移量。
    pub category_fallback_offset: usize,
    /// 用于判断分类列表是否有下一页的已知分类 slug。
    pub category_slugs: Vec<String>,
    /// “加载全部歌曲”时最多抓取的歌手页数。
    pub discography_page_cap: u32,
    /// 以歌手为种子创建电台时最多抓取的页数。
    pub radio_artist_page_cap: u32,
    /// 快速搜索中每类结果保留的数量。
    pub quick_search_limit: usize,
}

impl Default for GrooveConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            connect_timeout_secs: 30,
            timeout_secs: 30,
            radio_page_size: 20,
            category_fallback_divisor: 2,
            category_fallback_offset: 2,
            category_slugs: [
                "haryanvi", "bollywood", "indipop", "punjabi", "tamil", "english", "dj-mix",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            discography_page_cap: 3,
            radio_artist_page_cap: 2,
            quick_search_limit: 5,
        }
    }
}

impl GrooveConfig {
    /// 电台从分类列表补充歌曲时应抓取的分类页码。
    ///
    /// 页码超出 `u32` 范围时返回 `None`。
    pub fn category_fallback_page(&self, page_index: usize) -> Option<u32> {
        let divisor = self.category_fallback_divisor.max(1);
        (page_index / divisor)
            .checked_add(self.category_fallback_offset)
            .and_then(|page| u32::try_from(page).ok())
    }
}

/// 获取应用配置目录下配置文件的完整路径。
pub(crate) fn get_config_file_path() -> Result<PathBuf> {
    let mut config_dir = dirs::config_dir().ok_or_else(|| {
        GrooveError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "无法找到用户配置目录",
        ))
    })?;
    config_dir.push(CONFIG_DIR_NAME);
    config_dir.push(CONFIG_FILE_NAME);
    Ok(config_dir)
}

/// 从用户配置目录加载配置，文件不存在时使用默认值。
pub fn load_config() -> Result<GrooveConfig> {
    let path = match get_config_file_path() {
        Ok(path) => path,
        Err(_) => {
            info!("未找到用户配置目录，使用默认配置。");
            return Ok(GrooveConfig::default());
        }
    };
    load_config_from(&path)
}

/// 从指定路径加载配置，文件不存在时使用默认值。
pub fn load_config_from(path: &std::path::Path) -> Result<GrooveConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let config: GrooveConfig = serde_json::from_str(&content)?;
            info!("已从 {} 加载配置。", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("配置文件不存在，使用默认配置。");
            Ok(GrooveConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
