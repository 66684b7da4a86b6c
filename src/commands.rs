//! 命令调度模块：
//! - 接收解析好的 CLI 参数，合成“有效设置”
//! - 调用下载、搜索、模式下载、初始化等模块

use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use std::{
    env,
    io,
    path::{Path, PathBuf},
};

use crate::{
    api::{IconApi, SearchOptions},
    batch::BatchReport,
    cli::{Cli, Command, CommonArgs},
    component::ComponentRenderer,
    config::{self, Overrides, Settings},
    download::{DownloadOptions, Downloader, Written},
    icon::{parse_icon_list, IconId},
    init::init_scaffold,
    pattern::Pattern,
    select::select_interactive,
    utils::{display_path, env_opt_path, resolve_output_dir},
};

const PROJECT_URL: &str = "https://github.com/friendofsvelte/svelicon";

/// 运行指定的子命令
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Download { icons, concurrent, common }) => {
            let ctx = prepare(&common, concurrent)?;
            run_download(&ctx, &icons)
        }
        Some(Command::PatternDownload { pattern, collection, concurrent, limit, common }) => {
            let ctx = prepare(&common, concurrent)?;
            run_pattern_download(&ctx, &pattern, &collection, limit)
        }
        Some(Command::Search { query, collection, category, limit, concurrent, no_download, common }) => {
            let ctx = prepare(&common, concurrent)?;
            let opts = SearchOptions { collection, category, limit };
            run_search(&ctx, &query, &opts, no_download)
        }
        Some(Command::Init { force, dir }) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            init_scaffold(&dir, force)
        }
        None => match cli.icon {
            Some(icon) => {
                println!("⚠️ 检测到旧写法，推荐使用: svelicon download {}", icon);
                let ctx = prepare(&cli.common, None)?;
                run_single(&ctx, &icon)
            }
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}

/// 一次命令执行所需的上下文
struct RunContext {
    downloader: Downloader,
    output: PathBuf,
    cwd: PathBuf,
}

// 合成设置并构建下载器
fn prepare(common: &CommonArgs, concurrent: Option<usize>) -> Result<RunContext> {
    let cwd = env::current_dir().context("无法获取当前工作目录")?;
    let config_path = common.config.clone().or_else(|| env_opt_path("SVELICON_CONFIG"));
    let loaded = config::load_config(config_path.as_deref(), &cwd)?;
    log::info!("配置来源: {}", config::describe_source(&loaded.source));
    if loaded.source != config::ConfigSource::Defaults {
        println!("ℹ️ 本次使用的配置来源: {}", config::describe_source(&loaded.source));
    }

    let overrides = Overrides {
        output: common.output.clone(),
        concurrency: concurrent,
        lang: common.lang(),
        overwrite: common.no_overwrite.then_some(false),
        template_dir: common.template_dir.clone(),
    };
    let settings = Settings::resolve(overrides, loaded.config)?;
    log::debug!("生效设置: {:?}", settings);

    let output_dir = resolve_output_dir(&settings.output, &cwd)?;
    let template_dir = settings.template_dir.as_deref().map(|p| absolutize(p, &cwd));
    let api = IconApi::new(&settings.api_url)?;
    let renderer = ComponentRenderer::new(template_dir.as_deref(), settings.size)?;
    let opts = DownloadOptions {
        output_dir,
        lang: settings.lang,
        concurrency: settings.concurrency,
        overwrite: settings.overwrite,
    };
    Ok(RunContext {
        downloader: Downloader::new(api, renderer, opts, cwd.clone()),
        output: settings.output,
        cwd,
    })
}

fn absolutize(p: &Path, cwd: &Path) -> PathBuf {
    if p.is_absolute() { p.to_path_buf() } else { cwd.join(p) }
}

fn run_download(ctx: &RunContext, icons: &str) -> Result<()> {
    let names = parse_icon_list(icons);
    match names.len() {
        0 => bail!("未提供图标名"),
        1 => run_single(ctx, &names[0]),
        _ => {
            let mut ids = Vec::with_capacity(names.len());
            let mut invalid = 0usize;
            for name in &names {
                match IconId::parse(name) {
                    Ok(id) => ids.push(id),
                    Err(e) => {
                        invalid += 1;
                        eprintln!("⚠️ {}", e);
                    }
                }
            }
            let report = ctx.downloader.download_icons(&ids);
            finish_batch(ctx, &report, invalid)
        }
    }
}

fn run_single(ctx: &RunContext, raw: &str) -> Result<()> {
    let id = IconId::parse(raw)?;
    let written = ctx
        .downloader
        .download_icon(&id)
        .with_context(|| format!("下载图标失败: {}", id))?;
    println!("{} ✨\n", PROJECT_URL);
    let shown = display_path(written.path(), &ctx.cwd);
    match written {
        Written::Created(_) => println!("🚀 已创建: {}", shown),
        Written::Skipped(_) => println!("⏭️ 已存在，跳过: {}", shown),
    }
    Ok(())
}

// 汇总批量结果；全部失败时以错误退出
fn finish_batch(ctx: &RunContext, report: &BatchReport, invalid: usize) -> Result<()> {
    if !report.created.is_empty() {
        println!("\n{} ✨", PROJECT_URL);
        println!("🚀 成功生成 {} 个文件", report.created.len());
        println!("📁 位置: {}/", ctx.output.display());
    }
    let failed = report.failed.len() + invalid;
    if failed > 0 && report.created.is_empty() && report.skipped.is_empty() {
        bail!("全部 {} 个图标下载失败", failed);
    }
    Ok(())
}

fn run_pattern_download(ctx: &RunContext, pattern: &str, collection: &str, limit: usize) -> Result<()> {
    println!("🎯 模式下载: \"{}\"，集合 \"{}\"", pattern, collection);
    println!("📋 模式示例:");
    println!("  • \"eye*\"     - 以 \"eye\" 开头的图标");
    println!("  • \"*home\"    - 以 \"home\" 结尾的图标");
    println!("  • \"*arrow*\"  - 包含 \"arrow\" 的图标");
    println!("  • \"*\"        - 集合内全部图标");
    println!("  • \"^user.*\"  - 正则：以 \"user\" 开头的图标");
    println!();

    let pattern = Pattern::parse(pattern)?;
    let report = ctx.downloader.download_pattern(&pattern, collection, limit)?;
    if report.is_empty() {
        println!("\n💡 换个模式试试，或检查集合名是否正确");
        println!("   常用集合: fluent, mdi, lucide, heroicons, tabler");
        return Ok(());
    }
    finish_batch(ctx, &report, 0)
}

fn run_search(ctx: &RunContext, query: &str, opts: &SearchOptions, no_download: bool) -> Result<()> {
    println!("🔍 正在搜索 \"{}\"...", query);
    let results = ctx.downloader.api().search(query, opts)?;
    if results.icons.is_empty() {
        println!("❌ 没有找到匹配的图标");
        return Ok(());
    }
    println!("\n✅ 找到 {} 个图标（共 {} 个可用）", results.icons.len(), results.total);

    if no_download {
        for (i, icon) in results.icons.iter().enumerate() {
            println!("  {}. {}", i + 1, icon);
        }
        return Ok(());
    }

    let selected = select_interactive(&results.icons, opts.limit, io::stdin().lock(), io::stdout())?;
    if selected.is_empty() {
        println!("未选择任何图标");
        return Ok(());
    }
    println!("\n📦 下载已选择的 {} 个图标...", selected.len());
    let report = ctx.downloader.download_icons(&selected);
    finish_batch(ctx, &report, 0)
}
