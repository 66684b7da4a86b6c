//! Iconify 接口客户端：
//! - 下载单个图标 SVG
//! - 关键字搜索（可按集合/分类过滤）
//! - 列出集合内全部图标名

use std::{collections::{BTreeMap, BTreeSet}, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::{error::IconError, icon::IconId, svg::looks_like_svg};

pub(crate) const DEFAULT_API_URL: &str = "https://api.iconify.design";

// 搜索接口接受的 limit 范围
const MIN_SEARCH_LIMIT: usize = 32;
pub(crate) const MAX_SEARCH_LIMIT: usize = 999;

/// 搜索参数
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchOptions {
    pub(crate) collection: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) limit: usize,
}

/// 搜索结果：本次返回的图标与服务端报告的总数
#[derive(Debug, Clone)]
pub(crate) struct SearchResults {
    pub(crate) icons: Vec<IconId>,
    pub(crate) total: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    icons: Vec<String>,
    #[serde(default)]
    total: usize,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    #[serde(default)]
    uncategorized: Vec<String>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    hidden: Vec<String>,
}

/// 图标接口客户端，可跨线程共享
#[derive(Clone)]
pub(crate) struct IconApi {
    base: String,
    agent: ureq::Agent,
}

impl IconApi {
    pub(crate) fn new(base_url: &str) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base).with_context(|| format!("无效的接口地址: {}", base_url))?;
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("svelicon/", env!("CARGO_PKG_VERSION")))
            .build();
        Ok(Self { base, agent })
    }

    /// 下载图标 SVG 文本
    pub(crate) fn fetch_svg(&self, id: &IconId) -> Result<String> {
        let url = self.endpoint(&format!("{}.svg", id.path()))?;
        log::debug!("GET {}", url);
        let text = ensure_success(self.agent.request_url("GET", &url).call(), url.as_str(), id)?
            .into_string()
            .with_context(|| format!("读取响应文本失败: {}", url))?;
        // 未知图标时接口可能以 200 返回纯文本 "404"
        if !looks_like_svg(&text) {
            return Err(IconError::NotFound(id.to_string()).into());
        }
        Ok(text)
    }

    /// 关键字搜索
    pub(crate) fn search(&self, query: &str, opts: &SearchOptions) -> Result<SearchResults> {
        let url = self.search_url(query, opts)?;
        log::debug!("GET {}", url);
        let reader = self
            .agent
            .request_url("GET", &url)
            .call()
            .map_err(|e| http_error(url.as_str(), e))?
            .into_reader();
        let resp: SearchResponse = serde_json::from_reader(reader)
            .with_context(|| format!("解析搜索结果失败: {}", url))?;

        let mut icons = Vec::with_capacity(resp.icons.len());
        for raw in &resp.icons {
            match IconId::from_search_result(raw) {
                Ok(id) => icons.push(id),
                Err(e) => log::warn!("忽略无法识别的搜索结果: {}", e),
            }
        }
        icons.truncate(opts.limit);
        let total = resp.total.max(icons.len());
        Ok(SearchResults { icons, total })
    }

    /// 集合内全部可见图标名（排序、去重，不含 hidden）
    pub(crate) fn collection_icons(&self, prefix: &str) -> Result<Vec<String>> {
        let mut url = self.endpoint("collection")?;
        url.query_pairs_mut().append_pair("prefix", prefix);
        log::debug!("GET {}", url);
        let resp = self.agent.request_url("GET", &url).call();
        let resp = match resp {
            Err(ureq::Error::Status(404, _)) => {
                return Err(IconError::NotFound(format!("集合 {}", prefix)).into())
            }
            other => other.map_err(|e| http_error(url.as_str(), e))?,
        };
        let data: CollectionResponse = serde_json::from_reader(resp.into_reader())
            .with_context(|| format!("解析集合信息失败: {}", url))?;

        let hidden: BTreeSet<&str> = data.hidden.iter().map(String::as_str).collect();
        let names: BTreeSet<String> = data
            .uncategorized
            .iter()
            .chain(data.categories.values().flatten())
            .filter(|n| !hidden.contains(n.as_str()))
            .cloned()
            .collect();
        Ok(names.into_iter().collect())
    }

    fn search_url(&self, query: &str, opts: &SearchOptions) -> Result<Url> {
        let mut url = self.endpoint("search")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("query", query);
            let limit = opts.limit.clamp(MIN_SEARCH_LIMIT, MAX_SEARCH_LIMIT);
            q.append_pair("limit", &limit.to_string());
            if let Some(prefix) = opts.collection.as_deref().filter(|s| !s.trim().is_empty()) {
                q.append_pair("prefix", prefix.trim());
            }
            if let Some(category) = opts.category.as_deref().filter(|s| !s.trim().is_empty()) {
                q.append_pair("category", category.trim());
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base, path);
        Url::parse(&raw).with_context(|| format!("无效的请求地址: {}", raw))
    }
}

fn ensure_success(
    resp: Result<ureq::Response, ureq::Error>,
    url: &str,
    id: &IconId,
) -> Result<ureq::Response> {
    match resp {
        Ok(r) => Ok(r),
        Err(ureq::Error::Status(404, _)) => Err(IconError::NotFound(id.to_string()).into()),
        Err(e) => Err(http_error(url, e).into()),
    }
}

fn http_error(url: &str, e: ureq::Error) -> IconError {
    IconError::Http { url: url.to_string(), reason: e.to_string() }
}
