//! svelicon：下载 Iconify 图标并生成 Svelte 5 组件
//! - download / pattern-download / search / init 子命令
//! - 批量下载按并发上限执行，单个失败不影响其它图标

mod api;
mod batch;
mod cli;
mod commands;
mod component;
mod config;
mod download;
mod error;
mod icon;
mod init;
mod pattern;
mod select;
mod svg;
mod utils;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // 诊断日志默认只输出 warn 及以上，可用 RUST_LOG 调整
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    let cli = cli::Cli::parse();
    commands::run(cli)
}
