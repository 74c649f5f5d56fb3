//! 抽取记录到通用目录模型的转换。

use crate::{
    model::generic::{Album, Artist, MediaItem, StreamKind, Streamable, Track},
    providers::groove::models::{
        AlbumDetail, AlbumResult, AlbumSong, ArtistSong, CategoryItem, HomeItem, ItemKind,
        SongDetail, SongResult,
    },
    utils::{artist_name_to_slug, non_empty},
};

/// 把逗号分隔的姓名转换为带 slug 的艺术家列表。
pub fn artists_from_names(names: &str) -> Vec<Artist> {
    Artist::split_names(names)
        .into_iter()
        .map(|artist| {
            let slug = artist_name_to_slug(&artist.name);
            Artist {
                slug: non_empty(slug),
                ..artist
            }
        })
        .collect()
}

fn streamable(url: String, quality: u32) -> Streamable {
    Streamable {
        id: url.clone(),
        quality,
        title: format!("{quality}kbps"),
        url,
        kind: StreamKind::Server,
    }
}

/// 搜索结果中的歌曲。
impl From<SongResult> for Track {
    fn from(song: SongResult) -> Self {
        Track {
            id: song.url,
            title: song.title,
            subtitle: non_empty(song.album.clone()),
            album: non_empty(song.album),
            cover_url: non_empty(song.cover_image),
            category: non_empty(song.category),
            ..Default::default()
        }
    }
}

impl From<AlbumResult> for Album {
    fn from(album: AlbumResult) -> Self {
        Album {
            id: album.url,
            title: album.title,
            cover_url: non_empty(album.cover_image),
            subtitle: non_empty(album.category.clone()),
            category: non_empty(album.category),
            ..Default::default()
        }
    }
}

/// 歌曲详情。可播放选项按 320kbps、128kbps 的顺序排列。
impl From<SongDetail> for Track {
    fn from(song: SongDetail) -> Self {
        let streamables = [(song.url_320kbps, 320), (song.url_128kbps, 128)]
            .into_iter()
            .filter_map(|(url, quality)| url.map(|url| streamable(url, quality)))
            .collect();

        let description = [
            ("Singers", &song.singers),
            ("Composer", &song.composer),
            ("Lyricist", &song.lyricist),
            ("Lead Stars", &song.lead_stars),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");

        Track {
            id: song.url,
            title: song.title,
            artists: artists_from_names(&song.singers),
            album: non_empty(song.album),
            album_id: song.album_url,
            cover_url: non_empty(song.cover_image),
            category: non_empty(song.category),
            year: non_empty(song.year),
            release_date: non_empty(song.release_date),
            description: non_empty(description),
            subtitle: non_empty(song.singers),
            streamables,
        }
    }
}

/// 专辑详情。副标题为 “分类 • 年份”，忽略空的部分。
impl From<AlbumDetail> for Album {
    fn from(album: AlbumDetail) -> Self {
        let description = [
            ("Artists", &album.artists),
            ("Starcast", &album.starcast),
            ("Composers", &album.composers),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");

        let subtitle = [album.category.as_str(), album.year.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" • ");

        Album {
            id: album.url,
            title: album.name,
            artists: artists_from_names(&album.artists),
            cover_url: non_empty(album.cover_image),
            category: non_empty(album.category),
            year: non_empty(album.year),
            description: non_empty(description),
            subtitle: non_empty(subtitle),
            track_count: Some(album.songs.len() as u64),
            has_more_pages: album.has_pagination,
        }
    }
}

/// 专辑列表中的歌曲，封面沿用专辑封面。
pub fn album_song_to_track(song: AlbumSong, album: &Album) -> Track {
    Track {
        id: song.url,
        title: song.title,
        artists: artists_from_names(&song.artists),
        subtitle: non_empty(song.artists),
        album: Some(album.title.clone()),
        album_id: Some(album.id.clone()),
        cover_url: album.cover_url.clone(),
        category: album.category.clone(),
        year: album.year.clone(),
        ..Default::default()
    }
}

fn list_track(title: String, subtitle: String, cover_image: String, url: String) -> Track {
    Track {
        id: url,
        title,
        artists: artists_from_names(&subtitle),
        subtitle: non_empty(subtitle),
        cover_url: non_empty(cover_image),
        ..Default::default()
    }
}

fn list_album(title: String, subtitle: String, cover_image: String, url: String) -> Album {
    Album {
        id: url,
        title,
        subtitle: non_empty(subtitle),
        cover_url: non_empty(cover_image),
        ..Default::default()
    }
}

/// 首页 “最新歌曲” 中的条目。
impl From<HomeItem> for Track {
    fn from(item: HomeItem) -> Self {
        list_track(item.title, item.subtitle, item.cover_image, item.url)
    }
}

/// 首页 “最近专辑” 中的条目，副标题为作曲或歌手。
impl From<HomeItem> for Album {
    fn from(item: HomeItem) -> Self {
        list_album(item.title, item.subtitle, item.cover_image, item.url)
    }
}

impl From<CategoryItem> for MediaItem {
    fn from(item: CategoryItem) -> Self {
        match item.kind {
            ItemKind::Song => MediaItem::Track(list_track(
                item.title,
                item.subtitle,
                item.cover_image,
                item.url,
            )),
            ItemKind::Album => MediaItem::Album(list_album(
                item.title,
                item.subtitle,
                item.cover_image,
                item.url,
            )),
        }
    }
}

impl From<ArtistSong> for Track {
    fn from(song: ArtistSong) -> Self {
        Track {
            id: song.url,
            title: song.title,
            artists: artists_from_names(&song.artists),
            subtitle: non_empty(song.artists),
            cover_url: non_empty(song.cover_image),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_detail_streamables_order() {
        let detail = SongDetail {
            title: "Tum Hi Ho".into(),
            singers: "Arijit Singh, Mithoon".into(),
            composer: "Mithoon".into(),
            url: "https://pagalnew.com/songs/tum-hi-ho.html".into(),
            url_128kbps: Some("https://pagalnew.com/128-downloads/1".into()),
            url_320kbps: Some("https://pagalnew.com/320-download/1".into()),
            ..Default::default()
        };
        let track = Track::from(detail);

        let qualities: Vec<_> = track.streamables.iter().map(|s| s.quality).collect();
        assert_eq!(qualities, [320, 128]);
        assert_eq!(track.streamables[0].title, "320kbps");
        assert_eq!(track.streamables[0].kind, StreamKind::Server);
        assert_eq!(track.artists.len(), 2);
        assert_eq!(track.artists[0].slug.as_deref(), Some("arijit-singh"));
        assert_eq!(
            track.description.as_deref(),
            Some("Singers: Arijit Singh, Mithoon\nComposer: Mithoon")
        );
        assert_eq!(track.album, None);
    }

    #[test]
    fn test_album_detail_subtitle_skips_empty_parts() {
        let detail = AlbumDetail {
            name: "Rockstar".into(),
            year: "2011".into(),
            url: "https://pagalnew.com/album/rockstar.html".into(),
            songs: vec![AlbumSong::default(); 3],
            ..Default::default()
        };
        let album = Album::from(detail);
        assert_eq!(album.subtitle.as_deref(), Some("2011"));
        assert_eq!(album.track_count, Some(3));
        assert!(!album.has_more_pages);
        assert!(album.description.is_none());
    }

    #[test]
    fn test_category_item_kinds() {
        let song = CategoryItem {
            title: "One".into(),
            subtitle: "Singer A".into(),
            cover_image: String::new(),
            url: "https://pagalnew.com/songs/one.html".into(),
            kind: ItemKind::Song,
        };
        let MediaItem::Track(track) = MediaItem::from(song) else {
            panic!("歌曲条目应转换为 Track");
        };
        assert_eq!(track.artists[0].name, "Singer A");
        assert!(track.cover_url.is_none());
    }
}
