//! 交互式选择：列出候选图标并解析用户输入（序号、区间或 all）

use std::{
    collections::HashSet,
    hash::Hash,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};

/// 打印候选并读取一行选择
pub(crate) fn select_interactive<T, R, W>(
    icons: &[T],
    max_display: usize,
    mut input: R,
    mut output: W,
) -> Result<Vec<T>>
where
    T: Clone + Eq + Hash + std::fmt::Display,
    R: BufRead,
    W: Write,
{
    if icons.is_empty() {
        return Ok(Vec::new());
    }
    let shown = max_display.min(icons.len());
    writeln!(output, "\n📋 可选图标:")?;
    for (i, icon) in icons[..shown].iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, icon)?;
    }
    if icons.len() > shown {
        writeln!(output, "  ... 以及其余 {} 个", icons.len() - shown)?;
    }
    write!(output, "\n选择图标（逗号分隔的序号，区间如 1-5，或 \"all\"）: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("读取输入失败")?;
    Ok(parse_selection(&answer, icons, shown))
}

/// 解析选择：`all` 选中全部（含未显示的），否则仅在前 `shown` 项中按序号/区间选择
pub(crate) fn parse_selection<T: Clone + Eq + Hash>(answer: &str, icons: &[T], shown: usize) -> Vec<T> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("all") {
        return dedup(icons.iter().cloned());
    }
    let shown = shown.min(icons.len());
    let mut picked: Vec<usize> = Vec::new();
    for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((start, end)) = part.split_once('-') {
            let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>()) else {
                continue;
            };
            for i in start.max(1)..=end.min(shown) {
                picked.push(i);
            }
        } else if let Ok(i) = part.parse::<usize>() {
            if (1..=shown).contains(&i) {
                picked.push(i);
            }
        }
    }
    dedup(picked.into_iter().map(|i| icons[i - 1].clone()))
}

fn dedup<T: Clone + Eq + Hash>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|it| seen.insert(it.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icons() -> Vec<String> {
        ["a", "b", "c", "d", "e", "f"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selects_indexes_and_ranges() {
        let list = icons();
        assert_eq!(parse_selection("1, 3-4", &list, 6), vec!["a", "c", "d"]);
        assert_eq!(parse_selection("2,2,1-2", &list, 6), vec!["b", "a"]);
    }

    #[test]
    fn ignores_out_of_range_and_garbage() {
        let list = icons();
        assert_eq!(parse_selection("0, 9, x, 5-99", &list, 6), vec!["e", "f"]);
        assert_eq!(parse_selection("3-1", &list, 6), Vec::<String>::new());
        // 只允许选择已显示的项
        assert_eq!(parse_selection("4-6", &list, 4), vec!["d"]);
        assert!(parse_selection("", &list, 6).is_empty());
    }

    #[test]
    fn all_selects_everything_including_hidden() {
        let list = icons();
        assert_eq!(parse_selection(" ALL \n", &list, 2), list);
    }

    #[test]
    fn interactive_prompt_reads_one_line() {
        let list = icons();
        let mut out = Vec::new();
        let picked = select_interactive(&list, 3, "1-2\n".as_bytes(), &mut out).unwrap();
        assert_eq!(picked, vec!["a", "b"]);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("  3. c"));
        assert!(!printed.contains("  4. d"));
        assert!(printed.contains("... 以及其余 3 个"));
    }
}
