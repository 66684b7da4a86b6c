//! 配置与加载模块：
//! - 定义配置文件 `svelicon.yaml` 的结构
//! - 提供 `load_config` 支持显式路径与自动发现
//! - 按 CLI > 环境变量 > 配置文件 > 默认值 合成最终设置

use std::{fs, path::{Path, PathBuf}};
use anyhow::{Result, Context, bail};
use serde::Deserialize;

use crate::{
    api::DEFAULT_API_URL,
    component::ScriptLang,
    utils::{env_bool_truthy, env_opt_path, env_opt_string, env_opt_usize, parse_lang},
};

pub(crate) const DEFAULT_OUTPUT: &str = "src/icons";
pub(crate) const DEFAULT_CONCURRENCY: usize = 10;
pub(crate) const DEFAULT_SIZE: f64 = 0.7;

const CONFIG_CANDIDATES: [&str; 3] = ["svelicon.yaml", "svelicon.yml", ".svelicon.yaml"];

/// 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    /// 组件输出目录，默认 src/icons
    #[serde(default, alias = "output_dir")]
    pub(crate) output: Option<PathBuf>,
    /// 批量下载并发数，默认 10
    #[serde(default)]
    pub(crate) concurrency: Option<usize>,
    /// 组件脚本语言（ts|js），默认 ts
    #[serde(default)]
    pub(crate) lang: Option<ScriptLang>,
    /// 图标接口地址，默认 https://api.iconify.design
    #[serde(default)]
    pub(crate) api_url: Option<String>,
    /// 自定义模板目录（覆盖内置模板）
    #[serde(default)]
    pub(crate) template_dir: Option<PathBuf>,
    /// 是否覆盖已存在的组件文件，默认 true
    #[serde(default)]
    pub(crate) overwrite: Option<bool>,
    /// 组件 size 属性默认值（em），默认 0.7
    #[serde(default)]
    pub(crate) size: Option<f64>,
}

/// 配置来源（用于打印和调试）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    LocalExplicit(String),
    LocalAuto(String),
    Defaults,
}

/// 加载后的配置及其来源
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub(crate) config: FileConfig,
    pub(crate) source: ConfigSource,
}

/// 人类可读的来源描述
pub(crate) fn describe_source(src: &ConfigSource) -> String {
    match src {
        ConfigSource::LocalExplicit(p) => format!("本地文件: {}", p),
        ConfigSource::LocalAuto(p) => format!("本地文件(自动发现): {}", p),
        ConfigSource::Defaults => "内置默认值".to_string(),
    }
}

// 自动发现：在给定目录查找 svelicon.yaml / svelicon.yml / .svelicon.yaml
fn resolve_local_config_path(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|cand| dir.join(cand))
        .find(|p| p.is_file())
}

fn read_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("读取配置失败: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&raw).with_context(|| format!("解析 YAML 失败: {}", path.display()))
}

/// 加载配置：显式路径优先，其次在 `search_dir` 自动发现，都没有则使用默认值
pub(crate) fn load_config(explicit: Option<&Path>, search_dir: &Path) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("配置文件不存在: {}", path.display());
        }
        let config = read_config(path)?;
        return Ok(LoadedConfig { config, source: ConfigSource::LocalExplicit(path.display().to_string()) });
    }
    if let Some(path) = resolve_local_config_path(search_dir) {
        let config = read_config(&path)?;
        return Ok(LoadedConfig { config, source: ConfigSource::LocalAuto(path.display().to_string()) });
    }
    Ok(LoadedConfig { config: FileConfig::default(), source: ConfigSource::Defaults })
}

/// 命令行显式给出的覆盖项
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub(crate) output: Option<PathBuf>,
    pub(crate) concurrency: Option<usize>,
    pub(crate) lang: Option<ScriptLang>,
    pub(crate) overwrite: Option<bool>,
    pub(crate) template_dir: Option<PathBuf>,
}

/// 最终生效的设置
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) output: PathBuf,
    pub(crate) concurrency: usize,
    pub(crate) lang: ScriptLang,
    pub(crate) api_url: String,
    pub(crate) template_dir: Option<PathBuf>,
    pub(crate) overwrite: bool,
    pub(crate) size: f64,
}

impl Settings {
    /// 合成设置：CLI > 环境变量 > 配置文件 > 默认值
    pub(crate) fn resolve(cli: Overrides, file: FileConfig) -> Result<Self> {
        let env_lang = match env_opt_string("SVELICON_LANG") {
            Some(s) => Some(parse_lang(&s).with_context(|| format!("SVELICON_LANG 取值无效: {}", s))?),
            None => None,
        };
        let concurrency = cli
            .concurrency
            .or(env_opt_usize("SVELICON_CONCURRENCY"))
            .or(file.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            bail!("并发数必须大于 0");
        }
        let size = file.size.unwrap_or(DEFAULT_SIZE);
        if !(size.is_finite() && size > 0.0) {
            bail!("size 必须为正数: {}", size);
        }
        Ok(Self {
            output: cli
                .output
                .or(env_opt_path("SVELICON_OUTPUT"))
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            concurrency,
            lang: cli.lang.or(env_lang).or(file.lang).unwrap_or(ScriptLang::Ts),
            api_url: env_opt_string("SVELICON_API_URL")
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            template_dir: cli
                .template_dir
                .or(env_opt_path("SVELICON_TEMPLATE_DIR"))
                .or(file.template_dir),
            overwrite: cli
                .overwrite
                .or(env_bool_truthy("SVELICON_OVERWRITE"))
                .or(file.overwrite)
                .unwrap_or(true),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config_file() {
        let yaml = "output: lib/icons\nconcurrency: 4\nlang: js\napi_url: http://localhost:1\noverwrite: false\nsize: 1.5\n";
        let cfg: FileConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.output.as_deref(), Some(Path::new("lib/icons")));
        assert_eq!(cfg.concurrency, Some(4));
        assert_eq!(cfg.lang, Some(ScriptLang::Js));
        assert_eq!(cfg.overwrite, Some(false));
        assert_eq!(cfg.size, Some(1.5));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(serde_yaml::from_str::<FileConfig>("outptu: x\n").is_err());
    }

    #[test]
    fn discovers_config_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(None, dir.path()).unwrap();
        assert_eq!(loaded.source, ConfigSource::Defaults);

        fs::write(dir.path().join("svelicon.yml"), "concurrency: 3\n").unwrap();
        let loaded = load_config(None, dir.path()).unwrap();
        assert!(matches!(loaded.source, ConfigSource::LocalAuto(_)));
        assert_eq!(loaded.config.concurrency, Some(3));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.yaml")), dir.path()).is_err());

        let path = dir.path().join("custom.yaml");
        fs::write(&path, "").unwrap();
        let loaded = load_config(Some(&path), dir.path()).unwrap();
        assert!(matches!(loaded.source, ConfigSource::LocalExplicit(_)));
    }

    #[test]
    fn cli_overrides_file_values() {
        let file = FileConfig {
            output: Some(PathBuf::from("from-file")),
            concurrency: Some(2),
            lang: Some(ScriptLang::Js),
            ..FileConfig::default()
        };
        let cli = Overrides {
            output: Some(PathBuf::from("from-cli")),
            lang: Some(ScriptLang::Ts),
            ..Overrides::default()
        };
        let s = Settings::resolve(cli, file).unwrap();
        assert_eq!(s.output, PathBuf::from("from-cli"));
        assert_eq!(s.lang, ScriptLang::Ts);
        assert!(s.overwrite);
        assert_eq!(s.size, DEFAULT_SIZE);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let cli = Overrides { concurrency: Some(0), ..Overrides::default() };
        assert!(Settings::resolve(cli, FileConfig::default()).is_err());
    }
}
