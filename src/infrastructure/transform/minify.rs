//! JavaScript minification via `minifier`

pub fn minify_js(js: &str) -> String {
    minifier::js::minify(js).to_string()
}
