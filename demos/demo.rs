//! 用于演示 `groove-helper` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --package groove_helper_rs --example demo -- "tum hi ho"
//! ```

use std::io::{self, Write};

use futures::StreamExt;
use groove_helper_rs::{
    GrooveHelper,
    error::Result,
    model::generic::{RadioSeed, Track},
};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const RADIO_PAGES: usize = 2;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,groove_helper_rs=debug")),
        )
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tum hi ho".to_string());

    info!("正在初始化...");
    let helper = GrooveHelper::new()?;

    let tabs = helper
        .categories()
        .into_iter()
        .map(|category| format!("{} ({})", category.title(), category.path()))
        .collect::<Vec<_>>();
    info!("可浏览的分类: {}", tabs.join(", "));

    info!("准备搜索: '{}'", query);
    let feed = helper.provider().search(&query).await?;
    for album in &feed.albums {
        info!("专辑: {} ({})", album.title, album.id);
    }

    if feed.songs.is_empty() {
        error!("没有找到相关歌曲，程序退出。");
        return Ok(());
    }

    let chosen_index = prompt_user_for_selection(&feed.songs)?;
    let chosen = &feed.songs[chosen_index];
    info!("选择了 '{}'，正在获取详情...", chosen.title);

    let track = helper.provider().load_track(&chosen.id).await?;
    if let Some(description) = &track.description {
        println!("\n{}\n", description);
    }
    match helper.best_stream(&track).await? {
        Some(source) => info!("最佳音质 {}: {}", source.title, source.url),
        None => info!("该歌曲没有可用的下载链接。"),
    }

    info!("以这首歌为种子创建电台...");
    let radio = helper
        .provider()
        .create_radio(&RadioSeed::Track(track.id.clone()))
        .await?;
    info!(
        "{} | {}",
        radio.title,
        radio.subtitle.as_deref().unwrap_or("N/A")
    );

    let mut pages = Box::pin(helper.radio_stream(&radio).take(RADIO_PAGES));
    while let Some(page) = pages.next().await {
        for (index, track) in page?.items.iter().enumerate() {
            println!(
                "  [{:2}] {} | {}",
                index + 1,
                track.title,
                track.subtitle.as_deref().unwrap_or("N/A")
            );
        }
    }

    Ok(())
}

/// 将搜索结果打印到控制台，并提示用户进行选择。
fn prompt_user_for_selection(songs: &[Track]) -> Result<usize> {
    println!("找到了 {} 首歌曲，请选择一首：\n", songs.len());

    for (index, song) in songs.iter().enumerate() {
        println!("  [{:2}] 标题: {}", index + 1, song.title);
        println!(
            "       专辑: {} | 分类: {}",
            song.album.as_deref().unwrap_or("N/A"),
            song.category.as_deref().unwrap_or("N/A")
        );
        println!("       地址: {}", song.id);
    }

    loop {
        print!("\n请输入歌曲编号 (1-{}): ", songs.len());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        match input.trim().parse::<usize>() {
            Ok(num) if num > 0 && num <= songs.len() => break Ok(num - 1),
            _ => eprintln!("\n输入无效，请输入一个列表中的有效编号。\n"),
        }
    }
}
