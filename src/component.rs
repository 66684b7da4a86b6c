//! 组件渲染模块：
//! - 内置 TypeScript / JavaScript 两套 Svelte 组件模板
//! - 支持从自定义模板目录覆盖同名模板

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::{fs, path::Path};
use tera::{Context as TContext, Tera};

use crate::svg::IconData;

static DEFAULT_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

pub(crate) const TS_TEMPLATE: &str = "component.ts.svelte";
pub(crate) const JS_TEMPLATE: &str = "component.js.svelte";

/// 组件脚本语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ScriptLang {
    #[serde(alias = "typescript")]
    Ts,
    #[serde(alias = "javascript")]
    Js,
}

impl ScriptLang {
    fn template_name(self) -> &'static str {
        match self {
            ScriptLang::Ts => TS_TEMPLATE,
            ScriptLang::Js => JS_TEMPLATE,
        }
    }
}

/// 已加载模板的渲染器（批量下载时共享）
pub(crate) struct ComponentRenderer {
    tera: Tera,
    default_size: f64,
}

impl ComponentRenderer {
    /// 加载内置模板；若提供模板目录，则其中的同名文件覆盖内置模板
    pub(crate) fn new(template_dir: Option<&Path>, default_size: f64) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        for f in DEFAULT_TEMPLATES.files() {
            let name = f.path().to_string_lossy().to_string();
            let text = f
                .contents_utf8()
                .with_context(|| format!("内置模板不是 UTF-8: {}", name))?;
            tera.add_raw_template(&name, text)
                .with_context(|| format!("解析内置模板失败: {}", name))?;
        }
        if let Some(dir) = template_dir {
            for name in [TS_TEMPLATE, JS_TEMPLATE] {
                let path = dir.join(name);
                if !path.is_file() {
                    continue;
                }
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("读取模板失败: {}", path.display()))?;
                tera.add_raw_template(name, &text)
                    .with_context(|| format!("解析模板失败: {}", path.display()))?;
                log::debug!("使用自定义模板: {}", path.display());
            }
        }
        Ok(Self { tera, default_size })
    }

    /// 渲染组件源码
    pub(crate) fn render(&self, component_name: &str, icon: &IconData, lang: ScriptLang) -> Result<String> {
        let mut ctx = TContext::new();
        ctx.insert("component_name", component_name);
        ctx.insert(
            "view_box",
            &format!("{} {} {} {}", icon.left, icon.top, icon.width, icon.height),
        );
        ctx.insert("width", &icon.width.to_string());
        ctx.insert("height", &icon.height.to_string());
        ctx.insert("body", &icon.body);
        ctx.insert("default_size", &self.default_size.to_string());
        self.tera
            .render(lang.template_name(), &ctx)
            .with_context(|| format!("渲染组件失败: {}", component_name))
    }
}

/// 内置模板（相对路径 + 内容），供 `init` 写出
pub(crate) fn default_templates() -> impl Iterator<Item = (&'static Path, &'static [u8])> {
    DEFAULT_TEMPLATES.files().map(|f| (f.path(), f.contents()))
}
