//! 领域错误类型：图标名、匹配模式、SVG 解析与远程接口

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum IconError {
    #[error("无效的图标名: \"{0}\"（应为 collection/icon 或 collection:icon）")]
    InvalidIconName(String),

    #[error("无效的匹配模式 \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("无法解析 SVG 内容: {0}")]
    Svg(String),

    #[error("图标不存在: {0}")]
    NotFound(String),

    #[error("HTTP 请求失败 {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("输出目录必须位于当前工作目录内: {0}")]
    OutputOutsideCwd(String),
}
