//! CSS post-processing via `lightningcss`
//!
//! Groups media queries, adds vendor prefixes for the configured browser
//! range, minifies, and emits a source map for the compiled stylesheet.

use std::path::Path;

use lightningcss::rules::media::MediaRule;
use lightningcss::rules::{CssRule, CssRuleList};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use lightningcss::traits::ToCss;
use parcel_sourcemap::SourceMap as ParcelSourceMap;

use crate::error::{PipelineError, PipelineResult};

/// Browser range vendor prefixes are generated for
pub const PREFIX_BROWSERS: &str = "last 10 versions";

/// Root under which map sources are listed
const SOURCE_ROOT: &str = "/source/";

/// What to do with a compiled stylesheet
#[derive(Debug, Clone, Copy, Default)]
pub struct CssOptions<'a> {
    /// Add vendor prefixes for [`PREFIX_BROWSERS`]
    pub prefix: bool,
    /// Move media queries to the end, merging identical ones
    pub group_media: bool,
    /// Print without whitespace
    pub minify: bool,
    /// Emit a source map naming the input as this source
    pub source_map: Option<&'a str>,
}

/// Processed stylesheet and its optional JSON source map
#[derive(Debug, Clone)]
pub struct CssOutput {
    pub code: String,
    pub map: Option<String>,
}

pub fn process_css(
    css: &str,
    origin: &Path,
    options: CssOptions<'_>,
) -> PipelineResult<CssOutput> {
    let error = |message: String| PipelineError::Css {
        file: origin.to_path_buf(),
        message,
    };

    let parser_options = ParserOptions {
        filename: options.source_map.unwrap_or_default().to_string(),
        ..ParserOptions::default()
    };
    let mut sheet = StyleSheet::parse(css, parser_options).map_err(|e| error(e.to_string()))?;

    if options.group_media {
        group_media_queries(&mut sheet.rules);
    }

    let targets = if options.prefix {
        prefix_targets()
    } else {
        Targets::default()
    };
    sheet
        .minify(MinifyOptions {
            targets: targets.clone(),
            ..MinifyOptions::default()
        })
        .map_err(|e| error(e.to_string()))?;

    let mut source_map = match options.source_map {
        Some(name) => {
            let mut map = ParcelSourceMap::new("/");
            let index = map.add_source(name);
            map.set_source_content(index as usize, css)
                .map_err(|e| error(format!("source map: {:?}", e)))?;
            Some(map)
        }
        None => None,
    };

    let printed = sheet
        .to_css(PrinterOptions {
            minify: options.minify,
            source_map: source_map.as_mut(),
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| error(e.to_string()))?;

    let map = match source_map.as_mut() {
        Some(map) => Some(
            map.to_json(Some(SOURCE_ROOT))
                .map_err(|e| error(format!("source map: {:?}", e)))?,
        ),
        None => None,
    };

    Ok(CssOutput {
        code: printed.code,
        map,
    })
}

fn prefix_targets() -> Targets {
    match Browsers::from_browserslist([PREFIX_BROWSERS]) {
        Ok(Some(browsers)) => Targets::from(browsers),
        Ok(None) => Targets::default(),
        Err(e) => {
            tracing::warn!(
                query = PREFIX_BROWSERS,
                error = %e,
                "browserslist query failed, not prefixing"
            );
            Targets::default()
        }
    }
}

/// Move top-level `@media` blocks after all other rules, merging blocks with
/// the same query in order of first appearance.
fn group_media_queries(rules: &mut CssRuleList<'_>) {
    let mut kept = Vec::with_capacity(rules.0.len());
    let mut grouped: Vec<(String, MediaRule<'_>)> = Vec::new();

    for rule in rules.0.drain(..) {
        let CssRule::Media(media) = rule else {
            kept.push(rule);
            continue;
        };
        let Ok(query) = media.query.to_css_string(PrinterOptions::default()) else {
            kept.push(CssRule::Media(media));
            continue;
        };
        match grouped.iter_mut().find(|(key, _)| *key == query) {
            Some((_, existing)) => existing.rules.0.extend(media.rules.0),
            None => grouped.push((query, media)),
        }
    }

    kept.extend(grouped.into_iter().map(|(_, media)| CssRule::Media(media)));
    rules.0 = kept;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(css: &str, options: CssOptions<'_>) -> CssOutput {
        process_css(css, Path::new("main.min.css"), options).unwrap()
    }

    #[test]
    fn prefixes_for_old_browsers() {
        let out = run(
            ".a { user-select: none; }",
            CssOptions {
                prefix: true,
                ..CssOptions::default()
            },
        );
        assert!(out.code.contains("-webkit-user-select"), "{}", out.code);
        assert!(out.code.contains("user-select: none"));
    }

    #[test]
    fn no_prefixes_when_disabled() {
        let out = run(".a { user-select: none; }", CssOptions::default());
        assert!(!out.code.contains("-webkit-"), "{}", out.code);
    }

    #[test]
    fn minify_drops_whitespace_and_comments() {
        let css = "/* header */\n.a {\n  color: red;\n}\n\n.b {\n  margin: 0;\n}\n";
        let out = run(
            css,
            CssOptions {
                minify: true,
                ..CssOptions::default()
            },
        );
        assert!(!out.code.contains("header"));
        assert!(!out.code.contains('\n'));
        assert!(out.code.len() < css.len());
        assert!(out.code.contains("color:red"));
    }

    #[test]
    fn identical_media_queries_are_merged_at_the_end() {
        let css = "@media (min-width: 600px) { .a { color: red; } }\n\
                   .b { color: blue; }\n\
                   @media (min-width: 600px) { .c { color: green; } }\n";
        let out = run(
            css,
            CssOptions {
                group_media: true,
                ..CssOptions::default()
            },
        );
        assert_eq!(out.code.matches("@media").count(), 1, "{}", out.code);
        let media = out.code.find("@media").unwrap();
        assert!(out.code.find(".b").unwrap() < media);
        assert!(out.code.find(".a").unwrap() > media);
        assert!(out.code.find(".c").unwrap() > media);
    }

    #[test]
    fn source_map_has_mappings_for_input() {
        let out = run(
            ".header .title {\n  color: #336699;\n}\n.footer {\n  margin: 0;\n}\n",
            CssOptions {
                source_map: Some("css/imports.scss"),
                ..CssOptions::default()
            },
        );
        let map: serde_json::Value =
            serde_json::from_str(out.map.as_deref().unwrap()).unwrap();
        assert_eq!(map["version"], 3);
        assert_eq!(map["sourceRoot"], "/source/");
        assert_eq!(map["sources"][0], "css/imports.scss");
        assert!(!map["mappings"].as_str().unwrap().is_empty());
        assert!(map["sourcesContent"][0].as_str().unwrap().contains("#336699"));
    }

    #[test]
    fn no_map_unless_requested() {
        assert!(run(".a { color: red; }", CssOptions::default()).map.is_none());
    }
}
