//! 下载编排模块：
//! - 单个图标：下载 SVG -> 解析 -> 渲染组件 -> 写出文件
//! - 批量：去重后交给并发批处理，逐项打印进度，失败不影响其它图标
//! - 模式下载：按模式从搜索结果或集合列表中筛选后批量下载

use anyhow::{Context, Result};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use crate::{
    api::{IconApi, SearchOptions, MAX_SEARCH_LIMIT},
    batch::{run_bounded, BatchReport, ProgressTracker},
    component::{ComponentRenderer, ScriptLang},
    icon::IconId,
    pattern::Pattern,
    svg::parse_svg,
    utils::display_path,
};

/// 下载选项
#[derive(Debug, Clone)]
pub(crate) struct DownloadOptions {
    /// 已通过安全检查的绝对输出目录
    pub(crate) output_dir: PathBuf,
    pub(crate) lang: ScriptLang,
    pub(crate) concurrency: usize,
    pub(crate) overwrite: bool,
}

/// 单个图标的写出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Written {
    Created(PathBuf),
    Skipped(PathBuf),
}

impl Written {
    pub(crate) fn path(&self) -> &Path {
        match self {
            Written::Created(p) | Written::Skipped(p) => p,
        }
    }
}

pub(crate) struct Downloader {
    api: IconApi,
    renderer: ComponentRenderer,
    opts: DownloadOptions,
    cwd: PathBuf,
}

impl Downloader {
    pub(crate) fn new(api: IconApi, renderer: ComponentRenderer, opts: DownloadOptions, cwd: PathBuf) -> Self {
        Self { api, renderer, opts, cwd }
    }

    pub(crate) fn api(&self) -> &IconApi {
        &self.api
    }

    /// 下载并写出单个图标组件
    pub(crate) fn download_icon(&self, id: &IconId) -> Result<Written> {
        let component_name = id.component_name();
        let dir = &self.opts.output_dir;
        let out_path = dir.join(format!("{}.svelte", component_name));
        // 不覆盖时已存在的文件无需请求接口
        if !self.opts.overwrite && out_path.exists() {
            log::debug!("跳过已存在的文件: {}", out_path.display());
            return Ok(Written::Skipped(out_path));
        }

        let svg = self.api.fetch_svg(id)?;
        let data = parse_svg(&svg).with_context(|| format!("图标 {} 的 SVG 无法转换", id))?;
        let content = self.renderer.render(&component_name, &data, self.opts.lang)?;

        fs::create_dir_all(dir).with_context(|| format!("创建输出目录失败: {}", dir.display()))?;
        fs::write(&out_path, content).with_context(|| format!("写入失败: {}", out_path.display()))?;
        Ok(Written::Created(out_path))
    }

    /// 批量下载：去重、限流并发、逐项汇报
    pub(crate) fn download_icons(&self, ids: &[IconId]) -> BatchReport {
        let unique = dedupe_by_component(ids);
        let mut report = BatchReport::default();
        if unique.is_empty() {
            return report;
        }
        println!(
            "📦 开始下载 {} 个图标（并发 {}）",
            unique.len(),
            self.opts.concurrency.min(unique.len())
        );

        let mut tracker = ProgressTracker::new(unique.len());
        let results = run_bounded(
            &unique,
            self.opts.concurrency,
            |id| self.download_icon(id),
            |id, res| {
                let p = tracker.update();
                let prefix = format!("[{}/{}] {:>3}%", p.completed, p.total, p.percentage);
                match res {
                    Ok(Written::Created(path)) => {
                        println!("{} ✅ {} -> {}", prefix, id, display_path(path, &self.cwd))
                    }
                    Ok(Written::Skipped(path)) => {
                        println!("{} ⏭️ {} 已存在，跳过: {}", prefix, id, display_path(path, &self.cwd))
                    }
                    Err(e) => {
                        log::warn!("下载图标失败 {}: {:#}", id, e);
                        println!("{} ⚠️ {} 下载失败: {:#}", prefix, id, e)
                    }
                }
            },
        );

        for (id, res) in unique.into_iter().zip(results) {
            match res {
                Ok(Written::Created(p)) => report.created.push(p),
                Ok(Written::Skipped(p)) => report.skipped.push(p),
                Err(e) => report.failed.push((id, format!("{:#}", e))),
            }
        }
        log::debug!("批量下载结束: {}/{}", tracker.completed(), tracker.total());
        println!(
            "📊 完成: 成功 {} · 跳过 {} · 失败 {}",
            report.created.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }

    /// 按模式筛选集合内图标并批量下载
    pub(crate) fn download_pattern(&self, pattern: &Pattern, collection: &str, limit: usize) -> Result<BatchReport> {
        let names = self.pattern_candidates(pattern, collection, limit)?;
        if names.is_empty() {
            println!("❌ 集合 {} 中没有匹配 {} 的图标", collection, pattern.describe());
            return Ok(BatchReport::default());
        }
        println!("🔎 匹配到 {} 个图标", names.len());
        let ids: Vec<IconId> = names
            .into_iter()
            .map(|name| IconId { collection: collection.to_string(), name })
            .collect();
        Ok(self.download_icons(&ids))
    }

    /// 候选名：通配符有字面片段时走搜索接口，否则取集合全量列表；再用模式过滤并截断到 limit
    pub(crate) fn pattern_candidates(&self, pattern: &Pattern, collection: &str, limit: usize) -> Result<Vec<String>> {
        let names: Vec<String> = match pattern.search_hint() {
            Some(query) => {
                // 后缀/包含匹配在搜索结果中较分散，取最大窗口后再过滤
                let opts = SearchOptions {
                    collection: Some(collection.to_string()),
                    category: None,
                    limit: MAX_SEARCH_LIMIT,
                };
                self.api
                    .search(query, &opts)?
                    .icons
                    .into_iter()
                    .filter(|id| id.collection == collection)
                    .map(|id| id.name)
                    .collect()
            }
            None => self.api.collection_icons(collection)?,
        };
        let mut seen = HashSet::new();
        Ok(names
            .into_iter()
            .filter(|n| pattern.matches(n))
            .filter(|n| seen.insert(n.clone()))
            .take(limit)
            .collect())
    }
}

// 组件名相同的图标会写到同一个文件，只保留第一个
fn dedupe_by_component(ids: &[IconId]) -> Vec<IconId> {
    let mut seen: HashMap<String, &IconId> = HashMap::new();
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        let name = id.component_name();
        match seen.get(&name) {
            Some(first) if *first == id => {}
            Some(first) => {
                println!("⚠️ {} 与 {} 生成相同的组件名，已忽略", id, first);
            }
            None => {
                seen.insert(name, id);
                unique.push(id.clone());
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> IconId {
        IconId::parse(raw).unwrap()
    }

    #[test]
    fn dedupes_on_component_name() {
        let ids = [id("mdi:home"), id("mdi/two words"), id("mdi:home"), id("mdi:two-words"), id("mdi:eye")];
        let unique = dedupe_by_component(&ids);
        assert_eq!(unique, vec![id("mdi:home"), id("mdi/two words"), id("mdi:eye")]);
    }
}
