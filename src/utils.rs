//! 通用辅助函数：
//! - 环境变量读取与解析
//! - 输出目录的安全检查（禁止逃逸出当前工作目录）
//! - 文本到枚举的解析工具

use std::{env, path::{Component, Path, PathBuf}};

use crate::{component::ScriptLang, error::IconError};

/// 可选读取 PATH 环境变量为 PathBuf。
pub(crate) fn env_opt_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// 可选读取 String 环境变量。
pub(crate) fn env_opt_string(key: &str) -> Option<String> {
    env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 可选读取 usize 环境变量。
pub(crate) fn env_opt_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|s| s.trim().parse::<usize>().ok())
}

/// 读取布尔环境变量的真值（1/true/on/yes/y）。
pub(crate) fn env_bool_truthy(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| parse_truthy(&v))
}

fn parse_truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes" | "y")
}

/// 将字符串解析为 ScriptLang。
pub(crate) fn parse_lang(s: &str) -> Option<ScriptLang> {
    match s.trim().to_ascii_lowercase().as_str() {
        "ts" | "typescript" => Some(ScriptLang::Ts),
        "js" | "javascript" => Some(ScriptLang::Js),
        _ => None,
    }
}

/// 规范化输出目录（按字面处理 `.` / `..`），结果必须位于 `cwd` 之内
pub(crate) fn resolve_output_dir(output: &Path, cwd: &Path) -> Result<PathBuf, IconError> {
    let joined = if output.is_absolute() { output.to_path_buf() } else { cwd.join(output) };
    let mut normalized = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    if !normalized.starts_with(cwd) {
        return Err(IconError::OutputOutsideCwd(output.display().to_string()));
    }
    Ok(normalized)
}

/// 打印用：尽量显示相对 `cwd` 的路径
pub(crate) fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}
