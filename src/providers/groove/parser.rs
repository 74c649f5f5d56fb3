//! # 页面抽取器
//!
//! 上游页面没有版本、结构也不规整，所以这里不用 DOM 解析，而是对原始 HTML
//! 应用一组互相独立的正则规则。每个字段单独抽取，匹配失败时取空值；
//! 只有标识字段（歌曲名、专辑名）缺失时整条记录才返回 `None`，
//! 调用方应把它理解为“该页面不是这种实体”，而不是错误。
//!
//! 所有函数都是纯函数，不会 panic，也不会返回错误。

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::providers::groove::models::{
    AlbumDetail, AlbumResult, AlbumSong, ArtistSong, ArtistSongs, CategoryContent, CategoryItem,
    HomeContent, HomeItem, ItemKind, SearchResults, SongDetail, SongResult,
};
use crate::utils::{bounded_window, clean_text, normalize_url};

/// 搜索结果区块的最大扫描窗口（字节）。
const SEARCH_SECTION_WINDOW: usize = 10_000;
/// 相似歌曲区块的最大扫描窗口（字节）。
const SIMILAR_SECTION_WINDOW: usize = 30_000;
/// 首页每个链接之后检查的窗口（字节）。
const HOME_ITEM_WINDOW: usize = 1_000;
/// 首页每类链接最多处理的数量。
const HOME_LINK_LIMIT: usize = 12;
/// 首页歌曲条目至少需要的描述段落数。
const HOME_MIN_PARAGRAPHS: usize = 3;
/// 专辑最宽松规则中，链接内容的最大长度（字节）。
const LOOSE_ALBUM_SONG_WINDOW: usize = 500;

const ALBUMS_SECTION_MARKER: &str = "Albums Result";
const SONGS_SECTION_MARKER: &str = "Songs Result";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new($pattern).expect(concat!("编译 ", stringify!($name), " 失败"))
        });
    };
}

// 搜索页
lazy_regex!(
    SEARCH_ALBUM_REGEX,
    r#"<a href="/album/([^"]+)">\s*<div[^>]*>\s*<div[^>]*>\s*<img src="([^"]+)"[^>]*>\s*<div[^>]*>\s*<div><b>([^<]+)</b></div>\s*<div><i>([^<]+)</i>"#
);
lazy_regex!(
    SEARCH_SONG_REGEX,
    r#"<a href="/songs/([^"]+)">\s*<div[^>]*>\s*<div[^>]*>\s*<img src="([^"]+)"[^>]*>\s*<div[^>]*>\s*<div><b>([^<]+)</b><br><span>([^<]*)</span></div>\s*<div><i>([^<]+)</i>"#
);

// 歌曲详情页
lazy_regex!(SONG_NAME_REGEX, r"<b>Song Name:\s*</b>\s*([^<\n]+)");
lazy_regex!(SONG_SINGERS_REGEX, r"<b>Singer\(s\):\s*</b>\s*([^<\n]+)");
lazy_regex!(SONG_LEAD_STARS_REGEX, r"<b>Lead Star\(s\):\s*</b>\s*([^<\n]+)");
lazy_regex!(SONG_COMPOSER_REGEX, r"<b>Music Composer:\s*</b>\s*([^<\n]+)");
lazy_regex!(SONG_RELEASE_DATE_REGEX, r"<b>Released On:\s*</b>\s*([^<\n]+)");
lazy_regex!(SONG_LYRICIST_REGEX, r"Lyrics (?:beautifully )?penned by\s+([^<,\n]+)");
lazy_regex!(SONG_CATEGORY_REGEX, r#"<li[^>]*><a href="[^"]*category/([^"]+)""#);
lazy_regex!(
    SONG_ALBUM_REGEX,
    r#"<li[^>]*><a href="([^"]*/album/[^"]*)">([^<]+)</a></li>"#
);
lazy_regex!(SONG_YEAR_REGEX, r"Songs\s+(\d{4})\s+year");
lazy_regex!(
    COVER_ABSOLUTE_DATA_SRC_REGEX,
    r#"data-src="(https://pagalnew\.com/coverimages/[^"]+)""#
);
lazy_regex!(
    COVER_ABSOLUTE_SRC_REGEX,
    r#"src="(https://pagalnew\.com/coverimages/[^"]+)""#
);
lazy_regex!(COVER_RELATIVE_DATA_SRC_REGEX, r#"data-src="(\.\.?/coverimages/[^"]+)""#);
lazy_regex!(COVER_RELATIVE_SRC_REGEX, r#"src="(\.\.?/coverimages/[^"]+)""#);
lazy_regex!(
    STREAM_128_ABSOLUTE_REGEX,
    r#"<a[^>]+href="(https://pagalnew\.com/128-downloads/[^"]+)""#
);
lazy_regex!(STREAM_128_PATH_REGEX, r#"href="(/128-downloads/\d+)""#);
lazy_regex!(
    STREAM_320_ABSOLUTE_REGEX,
    r#"<a[^>]+href="(https://pagalnew\.com/320-download/[^"]+)""#
);
lazy_regex!(STREAM_320_PATH_REGEX, r#"href="(/320-download/\d+)""#);

// 专辑详情页
lazy_regex!(ALBUM_NAME_REGEX, r"<b>\s*Album:\s*</b>\s*([^<\n]+)");
lazy_regex!(
    ALBUM_COVER_ABSOLUTE_DATA_SRC_REGEX,
    r#"data-src="(https://pagalnew\.com/coverimages/album/[^"]+)""#
);
lazy_regex!(
    ALBUM_COVER_ABSOLUTE_SRC_REGEX,
    r#"src="(https://pagalnew\.com/coverimages/album/[^"]+)""#
);
lazy_regex!(
    ALBUM_COVER_RELATIVE_DATA_SRC_REGEX,
    r#"data-src="(\.\.?/coverimages/album/[^"]+)""#
);
lazy_regex!(ALBUM_COVER_RELATIVE_SRC_REGEX, r#"src="(\.\.?/coverimages/album/[^"]+)""#);
lazy_regex!(ALBUM_ARTISTS_REGEX, r"<b>\s*Artists?:\s*</b>\s*([^\n<]+)");
lazy_regex!(ALBUM_STARCAST_REGEX, r"<b>\s*Starcast:\s*</b>\s*([^\n<]*)");
lazy_regex!(ALBUM_COMPOSERS_REGEX, r"<b>\s*Composed by:\s*</b>\s*([^\n<]*)");
lazy_regex!(ALBUM_YEAR_REGEX, r"<b>\s*Year:\s*</b>\s*(\d{4})");
lazy_regex!(ALBUM_CATEGORY_REGEX, r#"<li[^>]*><a href="[^"]*category/([^"/]+)"#);
lazy_regex!(
    ALBUM_SONG_STRICT_REGEX,
    r#"<a\s+href="(https://pagalnew\.com/songs/[^"]+)"[^>]*>[\s\S]*?<div[^>]*style="color:#000000;\s*font-weight:700;">\s*([^<]+)\s*</div>[\s\S]*?<div[^>]*>\s*([^<\n]+)"#
);
lazy_regex!(
    ALBUM_SONG_NESTED_REGEX,
    r#"<a\s+href="(https://pagalnew\.com/songs/[^"]+)"[^>]*>\s*<div[^>]*>\s*<div[^>]*>\s*<img[^>]*>\s*</div>\s*<div[^>]*>\s*<div[^>]*>\s*([^<]+?)\s*</div>\s*<div[^>]*>\s*([^<\n]*)"#
);
lazy_regex!(
    ALBUM_SONG_ANCHOR_REGEX,
    r#"<a\s+href="(https://pagalnew\.com/songs/[^"]+)"[^>]*>"#
);
lazy_regex!(
    LOOSE_TITLE_STYLED_REGEX,
    r#"<div[^>]*(?:font-weight:700|class="[^"]*title[^"]*")[^>]*>\s*([^<]+)\s*</div>"#
);
lazy_regex!(
    LOOSE_TITLE_SUFFIX_REGEX,
    r"<div[^>]*>\s*([^<]+?)\s*(?:Mp3 Song|Song)\s*</div>"
);
lazy_regex!(LOOSE_ARTIST_REGEX, r"<div[^>]*>\s*([^<\n]+?)(?:<br|<p|</div>)");
lazy_regex!(
    PAGINATION_LINK_REGEX,
    r#"<a\s+href\s*=\s*["']([^"']+/(\d+))["']\s*>(\d+)\s*</a>"#
);

// 相似歌曲
lazy_regex!(
    SIMILAR_MARKER_REGEX,
    r#"<div class="lyricname">More Songs From ([^<]+)</div>"#
);
lazy_regex!(
    SIMILAR_SONG_REGEX,
    r#"<a href="(/songs/[^"]+)">\s*<img[^>]+src="([^"]+)"[^>]*>\s*([^<]+?)\s*-\s*([^<]+?)\s*</a>"#
);

// 首页
lazy_regex!(HOME_SONG_LINK_REGEX, r#"<a\s+href="(https://pagalnew\.com/songs/[^"]+)""#);
lazy_regex!(HOME_ALBUM_LINK_REGEX, r#"<a\s+href="(https://pagalnew\.com/album/[^"]+)""#);
lazy_regex!(HOME_SONG_TITLE_REGEX, r"<h2[^>]*>([^<]+)</h2>");
lazy_regex!(HOME_IMAGE_REGEX, r#"data-src="([^"]+)""#);
lazy_regex!(HOME_PARAGRAPH_REGEX, r"<p[^>]*>([^<]+)</p>");
lazy_regex!(
    HOME_ALBUM_TITLE_REGEX,
    r"color:#000000;\s*font-weight:700[^>]*>\s*([^<]+)\s*<"
);
lazy_regex!(HOME_ALBUM_ARTIST_REGEX, r"font-weight:500[^>]*>\s*([^<]+?)(?:\s*<|$)");

// 分类页
lazy_regex!(
    CATEGORY_SONG_BLOCK_REGEX,
    r#"<div class="col-lg-6[^"]*main_page_category_music">[\s\S]*?<a href="([^"]*/songs/[^"]*)"[\s\S]*?<img src="([^"]*)"[\s\S]*?<div[^>]*>([^<]*)</div>[\s\S]*?<div[^>]*>([^<]*)</div>[\s\S]*?</div>[\s\S]*?</a>[\s\S]*?</div>"#
);
lazy_regex!(
    CATEGORY_ALBUM_BLOCK_REGEX,
    r#"<div class="col-lg-6[^"]*main_page_category_music">[\s\S]*?<a href="([^"]*/album/[^"]*)"[\s\S]*?<img src="([^"]*)"[\s\S]*?<div[^>]*>([^<]*)</div>[\s\S]*?<div[^>]*>([^<]*)</div>[\s\S]*?</div>[\s\S]*?</a>[\s\S]*?</div>"#
);
lazy_regex!(TRAILING_YEAR_REGEX, r"\s*\(\d{4}\)\s*$");
lazy_regex!(TRAILING_MP3_SONG_REGEX, r"\s+Mp3 Song\s*$");
lazy_regex!(TRAILING_MP3_SONGS_REGEX, r"\s+Mp3 Songs?\s*$");

// 歌手页
lazy_regex!(
    ARTIST_NAME_REGEX,
    r"<div[^>]*main_page_category_div[^>]*>Songs By ([^<]*)</div>"
);
lazy_regex!(
    ARTIST_SONG_BLOCK_REGEX,
    r#"<a href="([^"]*/songs/[^"]*)">[\s\S]*?<div class="col-lg-6[^"]*main_page_category_music">[\s\S]*?<img src="([^"]*)[\s\S]*?<b>\s*([^<]*?)\s*</b>[\s\S]*?<div>\s*([^<]*?)\s*</div>[\s\S]*?</div>[\s\S]*?</div>[\s\S]*?</a>"#
);
lazy_regex!(ARTIST_TITLE_SUFFIX_REGEX, r"\s*-\s*[^-]*$");
lazy_regex!(
    ARTIST_NEXT_PAGE_REGEX,
    r#"<a href=['"]([^'"]*/singer/[^'"/]+/(\d+))['"]>\s*Next\s*</a>"#
);

/// 返回第一个捕获组的原始文本。
fn capture<'h>(regex: &Regex, html: &'h str) -> Option<&'h str> {
    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 返回第一个捕获组规范化后的文本，找不到时为空字符串。
fn capture_text(regex: &Regex, html: &str) -> String {
    capture(regex, html).map(clean_text).unwrap_or_default()
}

/// 按顺序尝试多条规则，返回第一条命中的第一个捕获组。
fn first_capture<'h>(regexes: &[&Regex], html: &'h str) -> Option<&'h str> {
    regexes.iter().find_map(|regex| capture(regex, html))
}

fn group<'h>(caps: &regex::Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// 解析搜索结果页。
///
/// 页面中有两个按字面标题定位的区块：先是 “Albums Result”，然后是 “Songs Result”。
/// 每个区块都先被截取出来（最多 10000 字节），再应用各自的条目规则。
pub fn parse_search_results(html: &str) -> SearchResults {
    let mut results = SearchResults::default();

    if let Some(albums_start) = html.find(ALBUMS_SECTION_MARKER) {
        let window = bounded_window(html, albums_start, SEARCH_SECTION_WINDOW);
        let album_section = match window.find(SONGS_SECTION_MARKER) {
            Some(offset) => &window[..offset],
            None => window,
        };

        results.albums = SEARCH_ALBUM_REGEX
            .captures_iter(album_section)
            .map(|caps| {
                let id = group(&caps, 1).to_string();
                AlbumResult {
                    title: clean_text(group(&caps, 3)),
                    category: clean_text(group(&caps, 4)),
                    cover_image: normalize_url(group(&caps, 2)),
                    url: normalize_url(&format!("/album/{id}")),
                    id,
                }
            })
            .collect();
    }

    if let Some(songs_start) = html.find(SONGS_SECTION_MARKER) {
        let song_section = bounded_window(html, songs_start, SEARCH_SECTION_WINDOW);

        results.songs = SEARCH_SONG_REGEX
            .captures_iter(song_section)
            .map(|caps| {
                let id = group(&caps, 1).to_string();
                SongResult {
                    title: clean_text(group(&caps, 3)),
                    album: clean_text(group(&caps, 4)),
                    category: clean_text(group(&caps, 5)),
                    cover_image: normalize_url(group(&caps, 2)),
                    url: normalize_url(&format!("/songs/{id}")),
                    id,
                }
            })
            .collect();
    }

    debug!(
        "搜索页解析完成：{} 张专辑，{} 首歌曲。",
        results.albums.len(),
        results.songs.len()
    );
    results
}

/// 解析歌曲详情页。
///
/// 页面上没有歌曲名时返回 `None`。
pub fn parse_song_detail(html: &str, song_url: &str) -> Option<SongDetail> {
    let title = capture_text(&SONG_NAME_REGEX, html);
    if title.is_empty() {
        debug!("页面 {song_url} 中未找到歌曲名。");
        return None;
    }

    let cover_image = first_capture(
        &[
            &*COVER_ABSOLUTE_DATA_SRC_REGEX,
            &*COVER_ABSOLUTE_SRC_REGEX,
            &*COVER_RELATIVE_DATA_SRC_REGEX,
            &*COVER_RELATIVE_SRC_REGEX,
        ],
        html,
    )
    .map(normalize_url)
    .unwrap_or_default();

    let category = capture(&SONG_CATEGORY_REGEX, html)
        .map(|slug| clean_text(&slug.replace('-', " ")))
        .unwrap_or_default();

    let (album, album_url) = match SONG_ALBUM_REGEX.captures(html) {
        Some(caps) => (
            clean_text(group(&caps, 2)),
            Some(normalize_url(group(&caps, 1))),
        ),
        None => (String::new(), None),
    };

    let url_128kbps = first_capture(&[&*STREAM_128_ABSOLUTE_REGEX, &*STREAM_128_PATH_REGEX], html)
        .map(normalize_url);
    let url_320kbps = first_capture(&[&*STREAM_320_ABSOLUTE_REGEX, &*STREAM_320_PATH_REGEX], html)
        .map(normalize_url);

    let url = normalize_url(song_url);
    Some(SongDetail {
        id: url.clone(),
        title,
        singers: capture_text(&SONG_SINGERS_REGEX, html),
        lead_stars: capture_text(&SONG_LEAD_STARS_REGEX, html),
        composer: capture_text(&SONG_COMPOSER_REGEX, html),
        lyricist: capture_text(&SONG_LYRICIST_REGEX, html),
        album,
        album_url,
        release_date: capture_text(&SONG_RELEASE_DATE_REGEX, html),
        category,
        year: capture(&SONG_YEAR_REGEX, html)
            .unwrap_or_default()
            .to_string(),
        cover_image,
        url_128kbps,
        url_320kbps,
        url,
    })
}

/// 解析专辑详情页。
///
/// 歌曲列表依次尝试三条越来越宽松的规则，只有前面的规则一首都没找到时才会用下一条。
/// 三次尝试共用同一个去重集合，先出现的路径优先。
/// 页面上没有专辑名时返回 `None`。
pub fn parse_album_detail(html: &str, album_url: &str) -> Option<AlbumDetail> {
    let name = capture_text(&ALBUM_NAME_REGEX, html);
    if name.is_empty() {
        debug!("页面 {album_url} 中未找到专辑名。");
        return None;
    }

    let cover_image = first_capture(
        &[
            &*ALBUM_COVER_ABSOLUTE_DATA_SRC_REGEX,
            &*ALBUM_COVER_ABSOLUTE_SRC_REGEX,
            &*ALBUM_COVER_RELATIVE_DATA_SRC_REGEX,
            &*ALBUM_COVER_RELATIVE_SRC_REGEX,
        ],
        html,
    )
    .map(normalize_url)
    .unwrap_or_default();

    let category = capture(&ALBUM_CATEGORY_REGEX, html)
        .map(|slug| clean_text(&slug.replace('-', " ")))
        .unwrap_or_default();

    let songs = extract_album_songs(html);

    let has_pagination =
        html.contains(r#"class="pagination""#) || html.contains("class='pagination'");
    let pagination_pages = if has_pagination {
        PAGINATION_LINK_REGEX
            .captures_iter(html)
            .filter_map(|caps| group(&caps, 2).parse::<u32>().ok())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        Vec::new()
    };

    let url = normalize_url(album_url);
    Some(AlbumDetail {
        id: url.clone(),
        name,
        cover_image,
        artists: capture_text(&ALBUM_ARTISTS_REGEX, html),
        starcast: capture_text(&ALBUM_STARCAST_REGEX, html),
        composers: capture_text(&ALBUM_COMPOSERS_REGEX, html),
        year: capture(&ALBUM_YEAR_REGEX, html)
            .unwrap_or_default()
            .to_string(),
        category,
        songs,
        url,
        has_pagination,
        pagination_pages,
    })
}

fn extract_album_songs(html: &str) -> Vec<AlbumSong> {
    let mut songs = Vec::new();
    let mut seen_urls = HashSet::new();

    let mut push = |songs: &mut Vec<AlbumSong>, url: &str, title: &str, artists: &str| {
        if seen_urls.insert(url.to_string()) {
            songs.push(AlbumSong {
                title: clean_text(title),
                artists: clean_text(artists),
                url: url.to_string(),
            });
        }
    };

    for caps in ALBUM_SONG_STRICT_REGEX.captures_iter(html) {
        push(&mut songs, group(&caps, 1), group(&caps, 2), group(&caps, 3));
    }

    if songs.is_empty() {
        for caps in ALBUM_SONG_NESTED_REGEX.captures_iter(html) {
            push(&mut songs, group(&caps, 1), group(&caps, 2), group(&caps, 3));
        }
    }

    if songs.is_empty() {
        for caps in ALBUM_SONG_ANCHOR_REGEX.captures_iter(html) {
            let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let window = bounded_window(html, whole.end(), LOOSE_ALBUM_SONG_WINDOW + 4);
            let Some(content) = window
                .find("</a>")
                .filter(|&pos| pos <= LOOSE_ALBUM_SONG_WINDOW)
                .map(|pos| &window[..pos])
            else {
                continue;
            };

            let Some(title) = first_capture(
                &[&*LOOSE_TITLE_STYLED_REGEX, &*LOOSE_TITLE_SUFFIX_REGEX],
                content,
            ) else {
                continue;
            };
            let artists = capture(&LOOSE_ARTIST_REGEX, content).unwrap_or_default();
            push(&mut songs, url.as_str(), title, artists);
        }
    }

    songs
}

/// 解析歌曲详情页底部 “More Songs From X” 区块中的相似歌曲。
///
/// 标记中的 X 作为这些歌曲的分类；只扫描标记之后最多 30000 字节。
pub fn parse_similar_songs(html: &str) -> Vec<SongResult> {
    let Some(marker) = SIMILAR_MARKER_REGEX.captures(html) else {
        debug!("页面中没有 'More Songs From' 区块。");
        return Vec::new();
    };
    let (Some(whole), Some(label)) = (marker.get(0), marker.get(1)) else {
        return Vec::new();
    };
    let category = clean_text(label.as_str());
    let section = bounded_window(html, whole.end(), SIMILAR_SECTION_WINDOW);

    let songs: Vec<SongResult> = SIMILAR_SONG_REGEX
        .captures_iter(section)
        .map(|caps| {
            let url = normalize_url(group(&caps, 1));
            SongResult {
                id: url.clone(),
                title: clean_text(group(&caps, 3)),
                album: clean_text(group(&caps, 4)),
                category: category.clone(),
                cover_image: normalize_url(group(&caps, 2)),
                url,
            }
        })
        .collect();

    debug!("从 'More Songs From {category}' 区块解析出 {} 首歌曲。", songs.len());
    songs
}

/// 解析首页的最新歌曲与最近专辑。
///
/// 分别扫描前 12 个歌曲链接和专辑链接，并在每个链接之后的 1000 字节内寻找标题、
/// 副标题和图片。歌曲条目周围至少要有 3 段描述文本才会被接受。
pub fn parse_home_content(html: &str) -> HomeContent {
    let mut content = HomeContent::default();

    for link in HOME_SONG_LINK_REGEX.captures_iter(html).take(HOME_LINK_LIMIT) {
        let (Some(whole), Some(url)) = (link.get(0), link.get(1)) else {
            continue;
        };
        let chunk = bounded_window(html, whole.start(), HOME_ITEM_WINDOW);

        let Some(title) = capture(&HOME_SONG_TITLE_REGEX, chunk) else {
            continue;
        };
        let paragraphs: Vec<String> = HOME_PARAGRAPH_REGEX
            .captures_iter(chunk)
            .take(HOME_MIN_PARAGRAPHS)
            .map(|caps| clean_text(group(&caps, 1)))
            .collect();
        if paragraphs.len() < HOME_MIN_PARAGRAPHS {
            continue;
        }

        content.latest_songs.push(HomeItem {
            title: clean_text(title),
            subtitle: paragraphs[0].clone(),
            cover_image: normalize_url(capture(&HOME_IMAGE_REGEX, chunk).unwrap_or_default()),
            url: url.as_str().to_string(),
            kind: ItemKind::Song,
        });
    }

    for link in HOME_ALBUM_LINK_REGEX.captures_iter(html).take(HOME_LINK_LIMIT) {
        let (Some(whole), Some(url)) = (link.get(0), link.get(1)) else {
            continue;
        };
        let chunk = bounded_window(html, whole.start(), HOME_ITEM_WINDOW);

        let Some(title) = capture(&HOME_ALBUM_TITLE_REGEX, chunk) else {
            continue;
        };
        content.recent_albums.push(HomeItem {
            title: clean_text(title),
            subtitle: capture_text(&HOME_ALBUM_ARTIST_REGEX, chunk),
            cover_image: normalize_url(capture(&HOME_IMAGE_REGEX, chunk).unwrap_or_default()),
            url: url.as_str().to_string(),
            kind: ItemKind::Album,
        });
    }

    content
}

/// 去掉分类标题末尾的 “(2024)” 年份与 “Mp3 Song(s)” 后缀。
fn strip_category_title(raw: &str, suffix: &Regex) -> String {
    let cleaned = clean_text(raw);
    let without_year = TRAILING_YEAR_REGEX.replace(&cleaned, "");
    let without_suffix = suffix.replace(&without_year, "");
    TRAILING_YEAR_REGEX
        .replace(&without_suffix, "")
        .trim()
        .to_string()
}

/// 判断页面上是否有指向 `<已知分类 slug>-mp3-…/<next_page>` 的链接。
///
/// 这是一条依赖站点当前结构的经验规则，只对固定的几个分类有效。
fn has_category_next_page(html: &str, next_page: u32, category_slugs: &[String]) -> bool {
    let alternatives = category_slugs
        .iter()
        .map(|slug| regex::escape(slug))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"href='[^']*/(?:{alternatives})-mp3-[^']*/{next_page}'");
    match Regex::new(&pattern) {
        Ok(regex) => regex.is_match(html),
        Err(e) => {
            warn!("无法编译分类翻页规则: {e}");
            false
        }
    }
}

/// 解析分类列表的一页。
///
/// 歌曲与专辑使用各自的区块规则扫描整页；没有任何条目时返回空列表，
/// 且 `has_next_page` 为 `false`。
pub fn parse_category_content(
    html: &str,
    current_page: u32,
    category_slugs: &[String],
) -> CategoryContent {
    let block_items = |regex: &Regex, suffix: &Regex, kind: ItemKind| {
        regex
            .captures_iter(html)
            .map(|caps| CategoryItem {
                title: strip_category_title(group(&caps, 3), suffix),
                subtitle: clean_text(group(&caps, 4)),
                cover_image: normalize_url(group(&caps, 2)),
                url: normalize_url(group(&caps, 1)),
                kind,
            })
            .collect::<Vec<_>>()
    };

    let mut items = block_items(
        &CATEGORY_SONG_BLOCK_REGEX,
        &TRAILING_MP3_SONG_REGEX,
        ItemKind::Song,
    );
    items.extend(block_items(
        &CATEGORY_ALBUM_BLOCK_REGEX,
        &TRAILING_MP3_SONGS_REGEX,
        ItemKind::Album,
    ));

    let has_next_page = !items.is_empty()
        && current_page
            .checked_add(1)
            .is_some_and(|next_page| has_category_next_page(html, next_page, category_slugs));

    CategoryContent {
        items,
        current_page,
        has_next_page,
    }
}

/// 解析歌手作品列表的一页。
///
/// 歌曲标题末尾的 “ - xxx” 片段会被去掉；是否有下一页由 “Next” 链接判断。
pub fn parse_artist_songs(html: &str, current_page: u32) -> ArtistSongs {
    let artist_name = capture(&ARTIST_NAME_REGEX, html)
        .map(clean_text)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let songs: Vec<ArtistSong> = ARTIST_SONG_BLOCK_REGEX
        .captures_iter(html)
        .map(|caps| {
            let title = clean_text(group(&caps, 3));
            let stripped = ARTIST_TITLE_SUFFIX_REGEX
                .replace(&title, "")
                .trim()
                .to_string();
            ArtistSong {
                title: if stripped.is_empty() { title } else { stripped },
                artists: clean_text(group(&caps, 4)),
                cover_image: normalize_url(group(&caps, 2)),
                url: normalize_url(group(&caps, 1)),
            }
        })
        .collect();

    let has_next_page = ARTIST_NEXT_PAGE_REGEX.is_match(html);
    debug!(
        "歌手 '{artist_name}' 第 {current_page} 页：{} 首歌曲，下一页: {has_next_page}",
        songs.len()
    );

    ArtistSongs {
        artist_name,
        songs,
        has_next_page,
        current_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_slugs() -> Vec<String> {
        crate::config::GrooveConfig::default().category_slugs
    }

    fn search_album_block(id: &str, title: &str, category: &str) -> String {
        format!(
            r#"<a href="/album/{id}">
  <div class="col-md-6">
    <div class="row">
      <img src="../coverimages/album/{id}.jpg" alt="">
      <div class="col">
        <div><b>{title}</b></div>
        <div><i>{category}</i></div>
      </div>
    </div>
  </div>
</a>"#
        )
    }

    fn search_song_block(id: &str, title: &str, album: &str, category: &str) -> String {
        format!(
            r#"<a href="/songs/{id}">
  <div class="col-md-6">
    <div class="row">
      <img src="/coverimages/{id}.jpg" alt="">
      <div class="col">
        <div><b>{title}</b><br><span>{album}</span></div>
        <div><i>{category}</i></div>
      </div>
    </div>
  </div>
</a>"#
        )
    }

    #[test]
    fn test_parse_search_results_sections() {
        let html = format!(
            "<html><h2>Albums Result</h2>{}{}<h2>Songs Result</h2>{}{}{}</html>",
            search_album_block("aashiqui-2.html", "Aashiqui 2", "Bollywood"),
            search_album_block("rockstar.html", "Rockstar", "Bollywood"),
            search_song_block("tum-hi-ho.html", "Tum Hi Ho", "Aashiqui 2", "Bollywood"),
            search_song_block("sadda-haq.html", "Sadda Haq", "Rockstar", "Bollywood"),
            search_song_block("kun-faya.html", "Kun Faya &amp; Kun", "Rockstar", "Bollywood"),
        );

        let results = parse_search_results(&html);
        assert_eq!(results.albums.len(), 2);
        assert_eq!(results.songs.len(), 3);

        assert_eq!(results.albums[0].title, "Aashiqui 2");
        assert_eq!(results.albums[1].title, "Rockstar");
        assert_eq!(
            results.albums[0].url,
            "https://pagalnew.com/album/aashiqui-2.html"
        );
        assert_eq!(
            results.albums[0].cover_image,
            "https://pagalnew.com/coverimages/album/aashiqui-2.html.jpg"
        );

        let titles: Vec<_> = results.songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Tum Hi Ho", "Sadda Haq", "Kun Faya & Kun"]);
        assert_eq!(results.songs[0].album, "Aashiqui 2");
        assert_eq!(results.songs[0].category, "Bollywood");
        assert_eq!(results.songs[0].url, "https://pagalnew.com/songs/tum-hi-ho.html");
    }

    #[test]
    fn test_album_section_is_bounded() {
        let html = format!(
            "<h2>Albums Result</h2>{}{}{}<h2>Songs Result</h2>{}",
            search_album_block("near.html", "Near", "Punjabi"),
            " ".repeat(SEARCH_SECTION_WINDOW),
            search_album_block("far.html", "Far", "Punjabi"),
            search_song_block("one.html", "One", "Near", "Punjabi"),
        );

        let results = parse_search_results(&html);
        let titles: Vec<_> = results.albums.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Near"]);
        assert_eq!(results.songs.len(), 1);
    }

    #[test]
    fn test_parse_search_results_without_sections() {
        let results = parse_search_results("<html><body>No results</body></html>");
        assert!(results.albums.is_empty());
        assert!(results.songs.is_empty());
    }

    const SONG_DETAIL_HTML: &str = r#"
<ul class="breadcrumb">
  <li><a href="https://pagalnew.com/">Home</a></li>
  <li class="item"><a href="https://pagalnew.com/category/bollywood-tracks">Bollywood</a></li>
  <li class="item"><a href="https://pagalnew.com/album/aashiqui-2.html">Aashiqui 2</a></li>
</ul>
<img class="lazy" data-src="../coverimages/tum-hi-ho.jpg" alt="">
<div class="info">
  <b>Song Name: </b> Tum Hi Ho<br>
  <b>Singer(s): </b> Arijit Singh, Mithoon<br>
  <b>Lead Star(s): </b> Aditya Roy Kapur<br>
  <b>Music Composer: </b> Mithoon<br>
  <b>Released On: </b> 05 April 2013<br>
</div>
<p>Lyrics beautifully penned by Mithoon, sung by Arijit Singh.</p>
<p>Aashiqui 2 Songs 2013 year</p>
<a class="dbutton" href="https://pagalnew.com/128-downloads/4521">Download 128kbps</a>
<a class="dbutton" href="/320-download/4521">Download 320kbps</a>
"#;

    #[test]
    fn test_parse_song_detail_fields() {
        let song = parse_song_detail(SONG_DETAIL_HTML, "/songs/tum-hi-ho.html").unwrap();

        assert_eq!(song.title, "Tum Hi Ho");
        assert_eq!(song.singers, "Arijit Singh, Mithoon");
        assert_eq!(song.lead_stars, "Aditya Roy Kapur");
        assert_eq!(song.composer, "Mithoon");
        assert_eq!(song.lyricist, "Mithoon");
        assert_eq!(song.release_date, "05 April 2013");
        assert_eq!(song.category, "bollywood tracks");
        assert_eq!(song.album, "Aashiqui 2");
        assert_eq!(
            song.album_url.as_deref(),
            Some("https://pagalnew.com/album/aashiqui-2.html")
        );
        assert_eq!(song.year, "2013");
        assert_eq!(
            song.cover_image,
            "https://pagalnew.com/coverimages/tum-hi-ho.jpg"
        );
        assert_eq!(
            song.url_128kbps.as_deref(),
            Some("https://pagalnew.com/128-downloads/4521")
        );
        assert_eq!(
            song.url_320kbps.as_deref(),
            Some("https://pagalnew.com/320-download/4521")
        );
        assert_eq!(song.url, "https://pagalnew.com/songs/tum-hi-ho.html");
    }

    #[test]
    fn test_parse_song_detail_without_streams() {
        let html = "<div><b>Song Name:</b> Lonely Track<br></div>";
        let song = parse_song_detail(html, "https://pagalnew.com/songs/lonely.html").unwrap();
        assert_eq!(song.title, "Lonely Track");
        assert!(song.url_128kbps.is_none());
        assert!(song.url_320kbps.is_none());
        assert!(song.singers.is_empty());
        assert!(song.cover_image.is_empty());
    }

    #[test]
    fn test_parse_song_detail_prefers_absolute_cover() {
        let html = r#"<b>Song Name:</b> A
<img src="./coverimages/relative.jpg">
<img data-src="https://pagalnew.com/coverimages/absolute.jpg">"#;
        let song = parse_song_detail(html, "/songs/a.html").unwrap();
        assert_eq!(song.cover_image, "https://pagalnew.com/coverimages/absolute.jpg");
    }

    #[test]
    fn test_parse_song_detail_without_title() {
        assert!(parse_song_detail("<html>404</html>", "/songs/x.html").is_none());
    }

    fn strict_album_block(slug: &str, title: &str, artists: &str) -> String {
        format!(
            r#"<a href="https://pagalnew.com/songs/{slug}.html" class="song">
  <div class="row">
    <div style="color:#000000; font-weight:700;">{title}</div>
    <div class="artist">{artists}</div>
  </div>
</a>"#
        )
    }

    fn nested_album_block(slug: &str, title: &str, artists: &str) -> String {
        format!(
            r#"<a href="https://pagalnew.com/songs/{slug}.html">
  <div class="row">
    <div class="img"><img src="x.jpg"></div>
    <div class="txt">
      <div class="name">{title}</div>
      <div class="artist">{artists}</div>
    </div>
  </div>
</a>"#
        )
    }

    #[test]
    fn test_parse_album_detail_fields_and_pagination() {
        let html = format!(
            r#"<li class="item"><a href="https://pagalnew.com/category/bollywood-mp3-songs/">Bollywood</a></li>
<img data-src="https://pagalnew.com/coverimages/album/aashiqui-2.jpg">
<b>Album: </b> Aashiqui 2<br>
<b>Artists: </b> Arijit Singh, Mithoon<br>
<b>Starcast: </b> Aditya Roy Kapur<br>
<b>Composed by: </b> Mithoon<br>
<b>Year: </b> 2013<br>
{}{}{}
<div class="pagination">
  <a href="https://pagalnew.com/album/aashiqui-2/3">3</a>
  <a href="https://pagalnew.com/album/aashiqui-2/2">2</a>
  <a href="https://pagalnew.com/album/aashiqui-2/1">1</a>
  <a href='https://pagalnew.com/album/aashiqui-2/2'>2</a>
</div>"#,
            strict_album_block("tum-hi-ho", "Tum Hi Ho", "Arijit Singh"),
            strict_album_block("chahun-main", "Chahun Main Ya Naa", "Arijit Singh, Palak"),
            strict_album_block("tum-hi-ho", "Tum Hi Ho (Reprise)", "Arijit Singh"),
        );

        let album = parse_album_detail(&html, "/album/aashiqui-2.html").unwrap();
        assert_eq!(album.name, "Aashiqui 2");
        assert_eq!(album.artists, "Arijit Singh, Mithoon");
        assert_eq!(album.starcast, "Aditya Roy Kapur");
        assert_eq!(album.composers, "Mithoon");
        assert_eq!(album.year, "2013");
        assert_eq!(album.category, "bollywood mp3 songs");
        assert_eq!(
            album.cover_image,
            "https://pagalnew.com/coverimages/album/aashiqui-2.jpg"
        );
        assert_eq!(album.url, "https://pagalnew.com/album/aashiqui-2.html");

        assert_eq!(album.songs.len(), 2);
        assert_eq!(album.songs[0].title, "Tum Hi Ho");
        assert_eq!(album.songs[0].artists, "Arijit Singh");
        assert_eq!(album.songs[1].title, "Chahun Main Ya Naa");

        assert!(album.has_pagination);
        assert_eq!(album.pagination_pages, vec![1, 2, 3]);
    }

    #[test]
    fn test_album_nested_rule_runs_only_when_strict_rule_finds_nothing() {
        let html = format!(
            "<b>Album:</b> Mixed<br>{}{}",
            strict_album_block("first", "First Song", "Singer A"),
            nested_album_block("first", "First Song (Nested)", "Singer B"),
        );
        let album = parse_album_detail(&html, "/album/mixed.html").unwrap();
        assert_eq!(album.songs.len(), 1);
        assert_eq!(album.songs[0].title, "First Song");
        assert_eq!(album.songs[0].artists, "Singer A");

        let nested_only = format!(
            "<b>Album:</b> Nested<br>{}{}",
            nested_album_block("one", "One", "Singer A"),
            nested_album_block("two", "Two", "Singer B"),
        );
        let album = parse_album_detail(&nested_only, "/album/nested.html").unwrap();
        let titles: Vec<_> = album.songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
        assert_eq!(album.songs[1].artists, "Singer B");
        assert!(!album.has_pagination);
        assert!(album.pagination_pages.is_empty());
    }

    #[test]
    fn test_album_loose_rule() {
        let html = r#"<b>Album:</b> Loose<br>
<a href="https://pagalnew.com/songs/loose-one.html"><div class="song-title">Loose One</div><div>Singer X<br></div></a>
<a href="https://pagalnew.com/songs/loose-two.html"><span>no title here</span></a>
<a href="https://pagalnew.com/songs/loose-three.html"><div>Third Mp3 Song</div></a>"#;
        let album = parse_album_detail(html, "/album/loose.html").unwrap();
        assert_eq!(album.songs.len(), 2);
        assert_eq!(album.songs[0].title, "Loose One");
        assert_eq!(album.songs[0].url, "https://pagalnew.com/songs/loose-one.html");
        assert_eq!(album.songs[1].title, "Third");
        assert_eq!(album.songs[1].url, "https://pagalnew.com/songs/loose-three.html");
    }

    #[test]
    fn test_parse_album_detail_without_name() {
        assert!(parse_album_detail("<b>Artists:</b> Someone", "/album/x.html").is_none());
    }

    #[test]
    fn test_parse_similar_songs() {
        let html = r#"<a href="/songs/ignored.html"><img src="/x.jpg"> Before - Marker</a>
<div class="lyricname">More Songs From Bollywood</div>
<div class="list">
  <a href="/songs/sun-raha-hai.html"><img class="lazy" src="../coverimages/sun.jpg" alt=""> Sun Raha Hai - Ankit Tiwari</a>
  <a href="/songs/milne-hai.html">
    <img src="/coverimages/milne.jpg">
    Milne Hai Mujhse Aayi - Arijit Singh
  </a>
</div>"#;
        let songs = parse_similar_songs(html);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "Sun Raha Hai");
        assert_eq!(songs[0].album, "Ankit Tiwari");
        assert_eq!(songs[0].category, "Bollywood");
        assert_eq!(songs[0].url, "https://pagalnew.com/songs/sun-raha-hai.html");
        assert_eq!(songs[0].id, songs[0].url);
        assert_eq!(songs[0].cover_image, "https://pagalnew.com/coverimages/sun.jpg");
        assert_eq!(songs[1].title, "Milne Hai Mujhse Aayi");
        assert_eq!(songs[1].album, "Arijit Singh");
    }

    #[test]
    fn test_parse_similar_songs_without_marker() {
        assert!(parse_similar_songs(SONG_DETAIL_HTML).is_empty());
    }

    #[test]
    fn test_parse_home_content() {
        let html = r#"
<a href="https://pagalnew.com/songs/new-one.html">
  <img data-src="/coverimages/new-one.jpg">
  <h2>New One</h2>
  <p>Singer One</p><p>Bollywood</p><p>2024</p>
</a>
<a href="https://pagalnew.com/songs/too-thin.html">
  <h2>Too Thin</h2>
  <p>Only one paragraph</p>
</a>
<a href="https://pagalnew.com/album/fresh.html">
  <img data-src="../coverimages/album/fresh.jpg">
  <div style="color:#000000; font-weight:700;">Fresh Album</div>
  <div style="font-weight:500;">Composer Z</div>
</a>"#;
        let content = parse_home_content(html);

        assert_eq!(content.latest_songs.len(), 1);
        let song = &content.latest_songs[0];
        assert_eq!(song.title, "New One");
        assert_eq!(song.subtitle, "Singer One");
        assert_eq!(song.cover_image, "https://pagalnew.com/coverimages/new-one.jpg");
        assert_eq!(song.kind, ItemKind::Song);

        assert_eq!(content.recent_albums.len(), 1);
        let album = &content.recent_albums[0];
        assert_eq!(album.title, "Fresh Album");
        assert_eq!(album.subtitle, "Composer Z");
        assert_eq!(album.url, "https://pagalnew.com/album/fresh.html");
        assert_eq!(album.kind, ItemKind::Album);
    }

    fn category_block(href: &str, title: &str, subtitle: &str) -> String {
        format!(
            r#"<div class="col-lg-6 col-md-6 main_page_category_music">
  <a href="{href}">
    <div class="main_page_category_music_img"><img src="/coverimages/x.jpg" alt=""></div>
    <div class="main_page_category_music_txt">
      <div style="font-weight:700;">{title}</div>
      <div>{subtitle}</div>
    </div>
  </a>
</div>
"#
        )
    }

    #[test]
    fn test_parse_category_content() {
        let html = format!(
            "{}{}{}<a href='https://pagalnew.com/category/punjabi-mp3-tracks/3'>3</a>",
            category_block("/songs/one.html", "One (2023) Mp3 Song", "Singer A"),
            category_block("/songs/two.html", "Two", "Singer B"),
            category_block("/album/three.html", "Three (2022) Mp3 Songs", "Composer C"),
        );

        let content = parse_category_content(&html, 2, &default_slugs());
        assert_eq!(content.current_page, 2);
        assert!(content.has_next_page);

        assert_eq!(content.items.len(), 3);
        assert_eq!(content.items[0].title, "One");
        assert_eq!(content.items[0].subtitle, "Singer A");
        assert_eq!(content.items[0].kind, ItemKind::Song);
        assert_eq!(content.items[0].url, "https://pagalnew.com/songs/one.html");
        assert_eq!(content.items[0].cover_image, "https://pagalnew.com/coverimages/x.jpg");
        assert_eq!(content.items[1].title, "Two");
        assert_eq!(content.items[2].title, "Three");
        assert_eq!(content.items[2].kind, ItemKind::Album);
    }

    #[test]
    fn test_category_next_page_requires_known_slug_and_next_number() {
        let block = category_block("/songs/one.html", "One", "Singer A");

        let unknown_slug = format!("{block}<a href='/category/marathi-mp3-tracks/2'>2</a>");
        assert!(!parse_category_content(&unknown_slug, 1, &default_slugs()).has_next_page);

        let wrong_page = format!("{block}<a href='/category/tamil-mp3-tracks/12'>12</a>");
        assert!(!parse_category_content(&wrong_page, 1, &default_slugs()).has_next_page);

        let matching = format!("{block}<a href='/category/tamil-mp3-tracks/2'>2</a>");
        assert!(parse_category_content(&matching, 1, &default_slugs()).has_next_page);
    }

    #[test]
    fn test_category_last_representable_page_has_no_next() {
        let html = format!(
            "{}<a href='/category/tamil-mp3-tracks/2'>2</a>",
            category_block("/songs/one.html", "One", "Singer A"),
        );
        let content = parse_category_content(&html, u32::MAX, &default_slugs());
        assert_eq!(content.items.len(), 1);
        assert!(!content.has_next_page);
    }

    #[test]
    fn test_parse_category_content_empty_page() {
        let content = parse_category_content(
            "<html><a href='/category/tamil-mp3-tracks/2'>2</a></html>",
            1,
            &default_slugs(),
        );
        assert!(content.items.is_empty());
        assert!(!content.has_next_page);
    }

    fn artist_block(href: &str, title: &str, artists: &str) -> String {
        format!(
            r#"<a href="{href}">
  <div class="col-lg-6 col-md-6 main_page_category_music">
    <div class="img"><img src="/coverimages/a.jpg" alt=""></div>
    <div class="txt"><b> {title} </b><div> {artists} </div></div>
  </div>
</a>
"#
        )
    }

    #[test]
    fn test_parse_artist_songs() {
        let html = format!(
            r#"<div class="main_page_category_div">Songs By Arijit Singh</div>
{}{}
<a href='https://pagalnew.com/singer/arijit-singh/2'>Next</a>"#,
            artist_block("/songs/kesariya.html", "Kesariya - Brahmastra", "Arijit Singh"),
            artist_block(
                "https://pagalnew.com/songs/apna-bana-le.html",
                "Apna Bana Le",
                "Arijit Singh, Sachin"
            ),
        );

        let page = parse_artist_songs(&html, 1);
        assert_eq!(page.artist_name, "Arijit Singh");
        assert!(page.has_next_page);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.songs.len(), 2);
        assert_eq!(page.songs[0].title, "Kesariya");
        assert_eq!(page.songs[0].url, "https://pagalnew.com/songs/kesariya.html");
        assert_eq!(page.songs[0].cover_image, "https://pagalnew.com/coverimages/a.jpg");
        assert_eq!(page.songs[1].title, "Apna Bana Le");
        assert_eq!(page.songs[1].artists, "Arijit Singh, Sachin");
    }

    #[test]
    fn test_parse_artist_songs_defaults() {
        let page = parse_artist_songs("<html></html>", 3);
        assert_eq!(page.artist_name, "Unknown Artist");
        assert!(page.songs.is_empty());
        assert!(!page.has_next_page);
        assert_eq!(page.current_page, 3);
    }
}
