//! 图标标识模块：
//! - 解析 `collection/icon` 与 `collection:icon` 两种写法
//! - 由图标标识生成组件名（PascalCase）

use std::fmt;

use crate::error::IconError;

/// 图标标识（集合 + 图标名）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct IconId {
    pub(crate) collection: String,
    pub(crate) name: String,
}

impl IconId {
    /// 解析单个图标名，冒号写法先转换为斜杠写法
    pub(crate) fn parse(raw: &str) -> Result<Self, IconError> {
        let normalized = normalize(raw);
        let mut parts = normalized.split('/');
        let collection = parts.next().unwrap_or("").trim();
        let name = parts.next().unwrap_or("").trim();
        if collection.is_empty() || name.is_empty() || parts.next().is_some() {
            return Err(IconError::InvalidIconName(raw.trim().to_string()));
        }
        Ok(Self { collection: collection.to_string(), name: name.to_string() })
    }

    /// 搜索接口返回的是 `prefix:name`
    pub(crate) fn from_search_result(raw: &str) -> Result<Self, IconError> {
        Self::parse(raw)
    }

    /// 组件名，例如 `fluent/home-24-filled` -> `FluentHome24Filled`
    pub(crate) fn component_name(&self) -> String {
        format!(
            "{}{}",
            capitalize_words(&self.collection),
            capitalize_words(&self.name.replace(' ', "-"))
        )
    }

    /// API 路径片段：`collection/name`
    pub(crate) fn path(&self) -> String {
        format!("{}/{}", self.collection, self.name)
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.collection, self.name)
    }
}

/// `collection:icon` -> `collection/icon`；已含 `/` 时原样保留，仅替换第一个冒号
pub(crate) fn normalize(raw: &str) -> String {
    let t = raw.trim();
    if t.contains(':') && !t.contains('/') {
        t.replacen(':', "/", 1)
    } else {
        t.to_string()
    }
}

/// 解析逗号分隔的图标列表（去空白、去空项）
pub(crate) fn parse_icon_list(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize)
        .collect()
}

/// 以 `:` `,` `-` 分词并将每段首字母大写后拼接
pub(crate) fn capitalize_words(s: &str) -> String {
    s.split([':', ',', '-'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_colon_form() {
        assert_eq!(normalize("fluent:home-24-filled"), "fluent/home-24-filled");
        assert_eq!(normalize("mdi:user"), "mdi/user");
        assert_eq!(normalize("mdi/home"), "mdi/home");
        assert_eq!(normalize("simple-icon"), "simple-icon");
        assert_eq!(normalize("collection:icon:with:colons"), "collection/icon:with:colons");
        assert_eq!(normalize("collection/icon:mixed"), "collection/icon:mixed");
    }

    #[test]
    fn parses_mixed_icon_list() {
        let icons = parse_icon_list("fluent:home-24-filled, mdi/user,,lucide:arrow-right ");
        assert_eq!(icons, vec!["fluent/home-24-filled", "mdi/user", "lucide/arrow-right"]);
    }

    #[test]
    fn capitalizes_words() {
        assert_eq!(capitalize_words("fluent:home-24-filled"), "FluentHome24Filled");
        assert_eq!(capitalize_words("material-design-icons"), "MaterialDesignIcons");
        assert_eq!(capitalize_words("with,comma-separated"), "WithCommaSeparated");
        assert_eq!(capitalize_words(""), "");
        assert_eq!(capitalize_words("a:b"), "AB");
        assert_eq!(capitalize_words("123-test"), "123Test");
        assert_eq!(capitalize_words("UPPERCASE"), "UPPERCASE");
    }

    #[test]
    fn builds_component_names() {
        let cases = [
            ("fluent/home-24-filled", "FluentHome24Filled"),
            ("mdi:user-circle", "MdiUserCircle"),
            ("material-symbols/arrow-back-ios", "MaterialSymbolsArrowBackIos"),
            ("mdi/two words", "MdiTwoWords"),
        ];
        for (input, expected) in cases {
            assert_eq!(IconId::parse(input).unwrap().component_name(), expected);
        }
    }

    #[test]
    fn rejects_invalid_names() {
        for bad in ["", "   ", "invalid", "collection/", "/icon-name", "collection//icon-name", "a/b/c"] {
            assert!(IconId::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn displays_in_iconify_form() {
        let id = IconId::from_search_result("mdi:home").unwrap();
        assert_eq!(id.to_string(), "mdi:home");
        assert_eq!(id.path(), "mdi/home");
    }
}
