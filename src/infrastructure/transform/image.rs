//! Lossless image minification: PNG via `oxipng`, SVG by stripping
//! comments and indentation

use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// oxipng preset; 2 is the tool's own default trade-off
const OPTIMIZATION_PRESET: u8 = 2;

/// Recompress a PNG. Returns the original bytes when optimization would not
/// make the file smaller.
pub fn optimize_png(data: &[u8], origin: &Path) -> PipelineResult<Vec<u8>> {
    let options = oxipng::Options::from_preset(OPTIMIZATION_PRESET);
    let optimized =
        oxipng::optimize_from_memory(data, &options).map_err(|e| PipelineError::Image {
            file: origin.to_path_buf(),
            message: e.to_string(),
        })?;

    if optimized.len() < data.len() {
        Ok(optimized)
    } else {
        Ok(data.to_vec())
    }
}

/// Drop XML comments and whitespace-only text between tags. Whitespace is
/// kept when the document has text content where it could be significant.
/// Returns the original bytes for non-UTF-8 input or when nothing shrinks.
pub fn optimize_svg(data: &[u8]) -> Vec<u8> {
    let Ok(text) = std::str::from_utf8(data) else {
        return data.to_vec();
    };
    let keep_whitespace = text.contains("<text") || text.contains("xml:space");

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            match after.find("-->") {
                Some(end) => {
                    rest = &after[end + 3..];
                    if !keep_whitespace && (out.is_empty() || out.ends_with('>')) {
                        rest = rest.trim_start();
                    }
                    continue;
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
        }
        if rest.starts_with("<![CDATA[") {
            let end = rest.find("]]>").map(|i| i + 3).unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        out.push(c);
        rest = chars.as_str();
        if c == '>' && !keep_whitespace {
            let trimmed = rest.trim_start();
            if trimmed.starts_with('<') {
                rest = trimmed;
            }
        }
    }

    if out.len() < data.len() {
        out.into_bytes()
    } else {
        data.to_vec()
    }
}
