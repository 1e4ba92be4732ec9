//! Source Map v3 output
//!
//! Sources are recorded relative to the source root under a `/source/`
//! `sourceRoot`, with their content embedded, so browsers can show the
//! original files without the dev server exposing `src/`.

use serde::Serialize;

const BASE64_CHARS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Source Map revision 3 document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub file: String,
    pub source_root: String,
    pub sources: Vec<String>,
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Trailing comment linking a CSS output to its map
    pub fn css_link(map_file: &str) -> String {
        format!("\n/*# sourceMappingURL={} */\n", map_file)
    }

    /// Trailing comment linking a JS output to its map
    pub fn js_link(map_file: &str) -> String {
        format!("\n//# sourceMappingURL={}\n", map_file)
    }
}

/// Collects sources and line-level mappings for one generated file
#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    file: String,
    sources: Vec<String>,
    sources_content: Vec<String>,
    lines: Vec<Option<(usize, usize)>>,
}

impl SourceMapBuilder {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Register a source; returns its index
    pub fn add_source(&mut self, name: impl Into<String>, content: impl Into<String>) -> usize {
        self.sources.push(name.into());
        self.sources_content.push(content.into());
        self.sources.len() - 1
    }

    /// Map the next generated line to column 0 of `source_line` in `source`
    pub fn push_line(&mut self, source: usize, source_line: usize) {
        self.lines.push(Some((source, source_line)));
    }

    /// Emit a generated line with no mapping
    pub fn push_unmapped_line(&mut self) {
        self.lines.push(None);
    }

    pub fn build(self) -> SourceMap {
        let mut mappings = String::new();
        let mut prev_source = 0i64;
        let mut prev_line = 0i64;

        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                mappings.push(';');
            }
            if let Some((source, source_line)) = *line {
                let source = source as i64;
                let source_line = source_line as i64;
                // [generated column, source index, source line, source column]
                mappings.push_str(&encode_vlq(0));
                mappings.push_str(&encode_vlq(source - prev_source));
                mappings.push_str(&encode_vlq(source_line - prev_line));
                mappings.push_str(&encode_vlq(0));
                prev_source = source;
                prev_line = source_line;
            }
        }

        SourceMap {
            version: 3,
            file: self.file,
            source_root: "/source/".to_string(),
            sources: self.sources,
            sources_content: self.sources_content,
            names: Vec::new(),
            mappings,
        }
    }
}

/// Base64 VLQ encoding of one signed value
pub fn encode_vlq(value: i64) -> String {
    let signed = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    let mut vlq = signed as u64;

    let mut out = String::new();
    loop {
        let mut digit = (vlq & 0b1_1111) as usize;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_CHARS[digit] as char);
        if vlq == 0 {
            break;
        }
    }
    out
}
