//! SVG 解析模块：从接口返回的 SVG 文本中提取 viewBox 尺寸与内部图形

use quick_xml::{events::{BytesStart, Event}, Reader};

use crate::error::IconError;

/// 转换为组件所需的图标数据
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IconData {
    pub(crate) left: f64,
    pub(crate) top: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) body: String,
}

/// 粗略判断文本是否为 SVG
pub(crate) fn looks_like_svg(content: &str) -> bool {
    content.contains("<svg") && content.contains("</svg>")
}

/// 解析 SVG：定位根 `<svg>`，读取尺寸并截取其内部原始标记
pub(crate) fn parse_svg(content: &str) -> Result<IconData, IconError> {
    let mut reader = Reader::from_str(content);
    let svg_err = |e: quick_xml::Error| IconError::Svg(e.to_string());

    // 查找根元素
    let (root, body_start, self_closing) = loop {
        match reader.read_event().map_err(svg_err)? {
            Event::Start(e) => break (e.into_owned(), position(&reader), false),
            Event::Empty(e) => break (e.into_owned(), position(&reader), true),
            Event::Eof => return Err(IconError::Svg("缺少根元素".to_string())),
            _ => continue,
        }
    };
    if root.local_name().as_ref() != b"svg" {
        let name = String::from_utf8_lossy(root.name().as_ref()).into_owned();
        return Err(IconError::Svg(format!("根元素不是 <svg>: <{}>", name)));
    }
    let (left, top, width, height) = dimensions(&root)?;
    if self_closing {
        return Ok(IconData { left, top, width, height, body: String::new() });
    }

    // 按嵌套深度找到与根对应的结束标签
    let mut depth = 0usize;
    let body_end = loop {
        let before = position(&reader);
        match reader.read_event().map_err(svg_err)? {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break before,
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(IconError::Svg("缺少 </svg> 结束标签".to_string())),
            _ => {}
        }
    };
    let body = content
        .get(body_start..body_end)
        .unwrap_or("")
        .trim()
        .to_string();
    Ok(IconData { left, top, width, height, body })
}

fn position(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

// 优先 viewBox，其次数值型 width/height
fn dimensions(root: &BytesStart<'_>) -> Result<(f64, f64, f64, f64), IconError> {
    if let Some(view_box) = attr(root, "viewBox")? {
        let nums: Vec<f64> = view_box
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<_, _>>()
            .map_err(|_| IconError::Svg(format!("viewBox 无法解析: {}", view_box)))?;
        if let [left, top, width, height] = nums[..] {
            if width > 0.0 && height > 0.0 {
                return Ok((left, top, width, height));
            }
        }
        return Err(IconError::Svg(format!("viewBox 无效: {}", view_box)));
    }
    let width = attr(root, "width")?.as_deref().and_then(parse_length);
    let height = attr(root, "height")?.as_deref().and_then(parse_length);
    match (width, height) {
        (Some(w), Some(h)) => Ok((0.0, 0.0, w, h)),
        _ => Err(IconError::Svg("缺少 viewBox 或 width/height".to_string())),
    }
}

fn attr(root: &BytesStart<'_>, name: &str) -> Result<Option<String>, IconError> {
    let found = root
        .try_get_attribute(name)
        .map_err(|e| IconError::Svg(e.to_string()))?;
    match found {
        Some(a) => {
            let value = a.unescape_value().map_err(|e| IconError::Svg(e.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn parse_length(s: &str) -> Option<f64> {
    let t = s.trim();
    let t = t.strip_suffix("px").unwrap_or(t);
    t.parse::<f64>().ok().filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MDI_HOME: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24"><path fill="currentColor" d="M10 20v-6h4v6h5v-8h3L12 3L2 12h3v8z"/></svg>"#;

    #[test]
    fn extracts_view_box_and_body() {
        let data = parse_svg(MDI_HOME).unwrap();
        assert_eq!((data.left, data.top, data.width, data.height), (0.0, 0.0, 24.0, 24.0));
        assert_eq!(
            data.body,
            r#"<path fill="currentColor" d="M10 20v-6h4v6h5v-8h3L12 3L2 12h3v8z"/>"#
        );
    }

    #[test]
    fn keeps_nested_groups_intact() {
        let svg = r#"<svg viewBox="2 4 32 16"><g fill="none"><path d="M1 1"/></g><circle r="2"/></svg>"#;
        let data = parse_svg(svg).unwrap();
        assert_eq!((data.left, data.top, data.width, data.height), (2.0, 4.0, 32.0, 16.0));
        assert_eq!(data.body, r#"<g fill="none"><path d="M1 1"/></g><circle r="2"/>"#);
    }

    #[test]
    fn falls_back_to_width_and_height() {
        let data = parse_svg(r#"<svg width="20" height="10px"><rect/></svg>"#).unwrap();
        assert_eq!((data.width, data.height), (20.0, 10.0));
    }

    #[test]
    fn rejects_non_svg_content() {
        assert!(parse_svg("not an svg").is_err());
        assert!(parse_svg("<html><body/></html>").is_err());
        assert!(parse_svg(r#"<svg width="1em" height="1em"></svg>"#).is_err());
        assert!(parse_svg(r#"<svg viewBox="0 0 x 24"></svg>"#).is_err());
    }

    #[test]
    fn svg_sniffing() {
        assert!(!looks_like_svg("not an svg"));
        assert!(looks_like_svg("<svg></svg>"));
        assert!(looks_like_svg(r#"<svg><path d="M10 10"/></svg>"#));
    }
}
