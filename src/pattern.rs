//! 图标名匹配模式：
//! - `*` 匹配集合内全部图标
//! - 通配符：`eye*` / `*home` / `*arrow*`
//! - 含正则元字符时按正则处理，例如 `^user.*`

use regex::Regex;

use crate::error::IconError;

const REGEX_META: &[char] = &['^', '$', '.', '+', '?', '(', ')', '[', ']', '{', '}', '|', '\\'];

#[derive(Debug, Clone)]
pub(crate) enum Pattern {
    All,
    Glob { source: String, re: Regex },
    Regex { source: String, re: Regex },
}

impl Pattern {
    pub(crate) fn parse(text: &str) -> Result<Self, IconError> {
        let t = text.trim();
        if t.is_empty() {
            return Err(IconError::InvalidPattern { pattern: text.to_string(), reason: "模式为空".to_string() });
        }
        if t.chars().all(|c| c == '*') {
            return Ok(Pattern::All);
        }
        if t.contains(REGEX_META) {
            let re = Regex::new(t).map_err(|e| IconError::InvalidPattern {
                pattern: t.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Pattern::Regex { source: t.to_string(), re });
        }
        // 通配符转为锚定正则
        let body = t.split('*').map(regex::escape).collect::<Vec<_>>().join(".*");
        let re = Regex::new(&format!("^{}$", body)).map_err(|e| IconError::InvalidPattern {
            pattern: t.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Pattern::Glob { source: t.to_string(), re })
    }

    /// 匹配不带集合前缀的图标名
    pub(crate) fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::All => true,
            Pattern::Glob { re, .. } | Pattern::Regex { re, .. } => re.is_match(name),
        }
    }

    /// 用作搜索关键字的最长字面片段；全量与正则模式无法提供
    pub(crate) fn search_hint(&self) -> Option<&str> {
        match self {
            Pattern::Glob { source, .. } => source
                .split('*')
                .filter(|s| !s.is_empty())
                .max_by_key(|s| s.len()),
            _ => None,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Pattern::All => "全部图标".to_string(),
            Pattern::Glob { source, .. } => format!("通配符 \"{}\"", source),
            Pattern::Regex { source, .. } => format!("正则 /{}/", source),
        }
    }
}
