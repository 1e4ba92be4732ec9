//! Test fixtures - a small site using the default layout.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><link rel="stylesheet" href="/css/main.min.css"></head>
<body>
<h1>Home</h1>
<script src="/js/main.js"></script>
</body>
</html>
"#;

pub const ABOUT_HTML: &str = "<html><body><p>About</p></body></html>\n";

pub const IMPORTS_SCSS: &str = r#"@import "base";

$accent: #336699;

.button {
  color: $accent;

  &:hover {
    color: darken($accent, 10%);
  }
}
"#;

pub const BASE_SCSS: &str = r#"body {
  margin: 0;
  font-family: sans-serif;
}
"#;

pub const MAIN_JS: &str = r#"// entry
function greet(name) {
    var message = "Hello, " + name;
    console.log(message);
}

greet("world");
"#;

pub const NORMALIZE_CSS: &str = "html { line-height: 1.15; }\nbody { margin: 0; }\n";

pub const LIBS_SCSS: &str = "$gap: 4px;\n.gap { padding: $gap; }\n";

pub const JQUERY_JS: &str = "/*! fake jquery */\nwindow.jQuery = function () { return 1; };\n";

/// 4x4 RGBA PNG with stored (uncompressed) image data
pub const LOGO_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x04,
    0x08, 0x06, 0x00, 0x00, 0x00, 0xa9, 0xf1, 0x9e, 0x7e, 0x00, 0x00, 0x00,
    0x4f, 0x49, 0x44, 0x41, 0x54, 0x78, 0x01, 0x01, 0x44, 0x00, 0xbb, 0xff,
    0x00, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00,
    0xff, 0xff, 0x00, 0x00, 0xff, 0x00, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00,
    0x00, 0xff, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0xff, 0x00, 0xff,
    0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0xff, 0xff,
    0x00, 0x00, 0xff, 0x00, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0xff,
    0xff, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0xff, 0x3c, 0x40, 0x1f, 0xe1,
    0x52, 0xed, 0xff, 0xa2, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44,
    0xae, 0x42, 0x60, 0x82,
];

pub const ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#;
