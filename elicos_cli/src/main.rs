use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;
use clap::Parser;
use elicos_catalog::{
    JsonStore, SyntheticImageFetcher, TsvImageCatalog, UNSPLASH_API_BASE_URL,
    UnsplashImageFetcher, VocabularyWord, tag_slug,
    vocabulary::{load_vocabulary, upsert_word},
};
use elicos_pool::{ImageItem, ItemFetcher, ItemPoolManager, PoolAction, PoolOptions, PoolView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod command;

use command::{Command, parse_command};

type Manager = ItemPoolManager<ImageItem, dyn ItemFetcher<ImageItem>>;

/// 词汇配图选择器（终端版）。
#[derive(Debug, Parser)]
#[command(name = "elicos_cli", version)]
struct Args {
    /// TSV 图片目录（`tag<TAB>src<TAB>alt`，示例见 asset/catalog.tsv）；优先于在线搜索
    #[arg(long, env = "ELICOS_CATALOG")]
    catalog: Option<PathBuf>,
    /// Unsplash access key；给出时使用在线图片搜索，都不给时使用生成的占位图
    #[arg(long, env = "ELICOS_UNSPLASH_ACCESS_KEY", hide_env_values = true)]
    unsplash_key: Option<String>,
    /// 图片搜索接口地址
    #[arg(long, env = "ELICOS_UNSPLASH_URL", default_value = UNSPLASH_API_BASE_URL)]
    unsplash_url: String,
    /// 初始检索词
    #[arg(long, env = "ELICOS_TAG", default_value = "cat")]
    tag: String,
    /// 每次取数的条目数
    #[arg(long, env = "ELICOS_CHUNK_SIZE", default_value_t = 5)]
    chunk_size: usize,
    /// 初始槽位数
    #[arg(long, env = "ELICOS_INITIAL_SIZE", default_value_t = 3)]
    initial_size: usize,
    /// 词汇存储目录；省略时 `w` 不可用
    #[arg(long, env = "ELICOS_STORE")]
    store: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let fetcher = build_fetcher(&args)?;
    let options = PoolOptions::default()
        .with_chunk_size(args.chunk_size)
        .with_initial_size(args.initial_size);
    let store = args.store.map(JsonStore::new);

    // 已保存过的词汇：用保存的配图作为初始池，全部选中
    let word_id = word_id_for(&args.tag);
    let saved: Vec<ImageItem> = store
        .as_ref()
        .and_then(|s| load_vocabulary(s).into_iter().find(|w| w.id == word_id))
        .map(|w| w.images)
        .unwrap_or_default();
    let selected: Vec<usize> = (0..saved.len()).collect();
    info!(word_id = %word_id, restored = saved.len(), "starting item pool");

    let mut manager: Manager =
        ItemPoolManager::create(word_id, args.tag, saved, selected, options, fetcher).await;
    repl(&mut manager, store.as_ref()).await
}

/// 候选来源：TSV 目录 > 在线搜索 > 占位图。
fn build_fetcher(args: &Args) -> anyhow::Result<Arc<dyn ItemFetcher<ImageItem>>> {
    if let Some(path) = &args.catalog {
        let catalog = TsvImageCatalog::from_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        return Ok(Arc::new(catalog));
    }
    if args.unsplash_key.is_some() {
        let search = UnsplashImageFetcher::new(args.unsplash_key.clone())
            .with_base_url(args.unsplash_url.as_str());
        if search.is_configured() {
            return Ok(Arc::new(search));
        }
        warn!("empty unsplash access key, falling back to placeholder images");
    }
    Ok(Arc::new(SyntheticImageFetcher::new()))
}

/// 词汇记录的 id 由检索词决定：`word_{slug}`。
fn word_id_for(tag: &str) -> String {
    format!("word_{}", tag_slug(tag))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "命令：a 新增槽位 | d N 删除第 N 个 | n N / p N 第 N 个切换到后/前一张 | t WORD 更换检索词 | w 保存 | :q 退出"
    )
}

async fn repl(manager: &mut Manager, store: Option<&JsonStore>) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    writeln!(out, "elicos item pool demo | word: {}", manager.id())?;
    print_help(&mut out)?;

    loop {
        render(&mut out, &manager.view())?;
        write!(out, "pool> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };

        let view = manager.view();
        let slot_id = |slot: usize| view.selected.get(slot).map(|item| item.id.clone());
        let action = match cmd {
            Command::Quit => break,
            Command::Help => {
                print_help(&mut out)?;
                continue;
            }
            Command::Write => {
                save_selection(&mut out, manager, store)?;
                continue;
            }
            Command::Add => PoolAction::Add,
            Command::Tag(tag) => PoolAction::update_tag(tag),
            Command::Delete(slot) | Command::Next(slot) | Command::Prev(slot) => {
                let Some(item_id) = slot_id(slot) else {
                    writeln!(out, "没有第 {} 个槽位", slot + 1)?;
                    continue;
                };
                match cmd {
                    Command::Delete(_) => PoolAction::delete(item_id),
                    Command::Next(_) => PoolAction::next(item_id),
                    _ => PoolAction::prev(item_id),
                }
            }
        };

        match manager.manage(action).await {
            Some(item) => writeln!(out, "-> {} ({})", item.id, item.src)?,
            None => writeln!(out, "-> ok")?,
        }
    }

    Ok(())
}

fn render(out: &mut impl Write, view: &PoolView<ImageItem>) -> io::Result<()> {
    writeln!(out, "--------------------")?;
    writeln!(
        out,
        "tag: {} | pool: {} | next page: {}",
        view.tag, view.pool_len, view.current_page
    )?;
    if view.selected.is_empty() {
        writeln!(out, "  (无已选图片)")?;
    }
    for (i, item) in view.selected.iter().enumerate() {
        writeln!(out, "{}. {}\t{}\t({})", i + 1, item.id, item.src, item.alt)?;
    }
    Ok(())
}

fn save_selection(out: &mut impl Write, manager: &Manager, store: Option<&JsonStore>) -> anyhow::Result<()> {
    let Some(store) = store else {
        writeln!(out, "未指定 --store，无法保存")?;
        return Ok(());
    };
    // 按当前检索词保存，下次 `--tag` 同一个词时能恢复
    let word = VocabularyWord::new(word_id_for(manager.tag()), manager.tag().trim(), "")
        .with_images(manager.selected_items());
    let count = word.images.len();
    upsert_word(store, word).context("saving vocabulary word")?;
    writeln!(out, "saved {count} image(s) to {}", store.root().display())?;
    Ok(())
}
