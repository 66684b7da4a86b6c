//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 将 clap 的声明与业务逻辑解耦，便于在其它模块中复用参数。

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::component::ScriptLang;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(
    name = "svelicon",
    about = "下载 Iconify 图标并生成 Svelte 组件",
    version,
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
    /// 图标名（旧写法，推荐使用 `svelicon download <icon>`）
    #[arg(value_name = "ICON")]
    pub(crate) icon: Option<String>,
    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

/// 各下载类子命令共享的参数
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct CommonArgs {
    /// 输出目录，默认：src/icons
    #[arg(short, long, value_name = "DIR")]
    pub(crate) output: Option<PathBuf>,
    /// 生成 TypeScript 组件（默认）
    #[arg(long, conflicts_with = "withjs")]
    pub(crate) withts: bool,
    /// 生成 JavaScript 组件
    #[arg(long)]
    pub(crate) withjs: bool,
    /// 不覆盖已存在的组件文件
    #[arg(long)]
    pub(crate) no_overwrite: bool,
    /// 自定义模板目录（component.ts.svelte / component.js.svelte）
    #[arg(long, value_name = "DIR")]
    pub(crate) template_dir: Option<PathBuf>,
    /// 配置文件路径，默认自动查找 svelicon.yaml
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
}

impl CommonArgs {
    /// 命令行显式指定的脚本语言
    pub(crate) fn lang(&self) -> Option<ScriptLang> {
        if self.withjs {
            Some(ScriptLang::Js)
        } else if self.withts {
            Some(ScriptLang::Ts)
        } else {
            None
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// 下载单个图标或逗号分隔的多个图标
    Download {
        /// 图标名（如 mdi:home）或逗号分隔的列表
        #[arg(value_name = "ICONS")]
        icons: String,
        /// 批量下载并发数，默认 10
        #[arg(short = 'c', long = "concurrent", value_name = "N")]
        concurrent: Option<usize>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// 下载指定集合中匹配模式的图标
    PatternDownload {
        /// 匹配模式（"eye*"、"*home"、"*arrow*"、"*" 或正则）
        #[arg(value_name = "PATTERN")]
        pattern: String,
        /// 图标集合（如 fluent、mdi、lucide）
        #[arg(short, long, value_name = "NAME")]
        collection: String,
        /// 并发数，默认 10
        #[arg(long = "concurrent", value_name = "N")]
        concurrent: Option<usize>,
        /// 最多下载的图标数量
        #[arg(short, long, value_name = "N", default_value_t = 100)]
        limit: usize,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// 搜索图标，并可交互选择下载
    Search {
        /// 搜索关键字（如 "arrow"、"user"）
        #[arg(value_name = "QUERY")]
        query: String,
        /// 按集合过滤（如 mdi、lucide）
        #[arg(short, long, value_name = "NAME")]
        collection: Option<String>,
        /// 按分类过滤
        #[arg(long, value_name = "NAME")]
        category: Option<String>,
        /// 显示的结果数量
        #[arg(short, long, value_name = "N", default_value_t = 20)]
        limit: usize,
        /// 并发数，默认 10
        #[arg(long = "concurrent", value_name = "N")]
        concurrent: Option<usize>,
        /// 只搜索，不下载
        #[arg(long)]
        no_download: bool,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// 写出示例配置与默认模板，便于自定义
    Init {
        /// 强制覆盖已存在文件
        #[arg(long)]
        force: bool,
        /// 目标目录（默认当前目录）
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}
