//! 初始化脚手架模块
//! - `svelicon init` 写出示例配置与内置组件模板
//! - 逐个文件检查，已存在的文件保持不变（`--force` 覆盖）

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::component::default_templates;

// 内置示例（用于 init）
const SAMPLE_CONFIG: &str = include_str!("assets/sample.svelicon.yaml");
const CONFIG_FILE: &str = "svelicon.yaml";
const TEMPLATE_DIR: &str = "templates";

/// 在 `dir` 下写出 svelicon.yaml 与 templates/ 中的组件模板
pub(crate) fn init_scaffold(dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("创建目录失败: {}", dir.display()))?;

    let mut written = usize::from(write_scaffold_file(&dir.join(CONFIG_FILE), SAMPLE_CONFIG.as_bytes(), force)?);
    let template_root = dir.join(TEMPLATE_DIR);
    for (rel, contents) in default_templates() {
        if write_scaffold_file(&template_root.join(rel), contents, force)? {
            written += 1;
        }
    }

    if written == 0 {
        println!("ℹ️ 文件均已存在，未做修改；使用 --force 可恢复为内置版本");
    } else {
        println!("✅ 已写出 {} 个文件", written);
        println!("💡 在 {} 中设置 template_dir: {} 即可使用自定义组件模板", CONFIG_FILE, TEMPLATE_DIR);
    }
    Ok(())
}

// 返回是否实际写入
fn write_scaffold_file(path: &Path, contents: &[u8], force: bool) -> Result<bool> {
    if path.exists() && !force {
        println!("⏭️ 已存在，跳过: {}", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("创建目录失败: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("写入失败: {}", path.display()))?;
    println!("📝 写入: {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{JS_TEMPLATE, TS_TEMPLATE};
    use crate::config::FileConfig;

    #[test]
    fn writes_config_and_templates() {
        let dir = tempfile::tempdir().unwrap();
        init_scaffold(dir.path(), false).unwrap();
        let cfg = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        let parsed: FileConfig = serde_yaml::from_str(&cfg).unwrap();
        assert_eq!(parsed.concurrency, Some(10));
        assert!(dir.path().join(TEMPLATE_DIR).join(TS_TEMPLATE).is_file());
        assert!(dir.path().join(TEMPLATE_DIR).join(JS_TEMPLATE).is_file());
    }

    #[test]
    fn keeps_existing_files_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join(CONFIG_FILE);
        fs::write(&cfg_path, "output: mine\n").unwrap();
        init_scaffold(dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&cfg_path).unwrap(), "output: mine\n");

        init_scaffold(dir.path(), true).unwrap();
        assert_ne!(fs::read_to_string(&cfg_path).unwrap(), "output: mine\n");
    }

    #[test]
    fn fills_in_missing_templates_only() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join(TEMPLATE_DIR);
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join(TS_TEMPLATE), "custom").unwrap();

        init_scaffold(dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(templates.join(TS_TEMPLATE)).unwrap(), "custom");
        assert!(templates.join(JS_TEMPLATE).is_file());
    }
}
