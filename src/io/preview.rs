//! HTML preview generation

use crate::core::config::{Mode, StyleOptions};
use crate::glyphs::GlyphSpec;
use std::fmt::Write as _;

/// Escape text for HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Whether the entry at 1-based `index` renders through its CSS class
/// rather than as ligature text
pub fn uses_class_entry(mode: Mode, index: usize) -> bool {
    match mode {
        Mode::Class => true,
        Mode::Ligature => false,
        Mode::Both => index % 2 == 1,
    }
}

/// Render the preview page linking to the stylesheet at `css_url`
pub fn render_preview(style: &StyleOptions, mode: Mode, css_url: &str, glyphs: &[GlyphSpec]) -> String {
    let font_size = escape_html(&style.preview_font_size);
    let mut html = format!(
        r#"<html>
    <head>
        <title>Font preview</title>
        <meta charset="utf-8">
        <link href="{css}" rel="stylesheet">
        <style>
            body {{
                background-color: #f3f2f1;
                text-align: center;
                padding: 1rem;
                margin: 0;
            }}
            #font-list {{
                display: flex;
                flex-wrap: wrap;
                align-items: center;
                justify-content: center;
                margin-top: 1rem;
                gap: 1rem;
            }}
            #font-list > div {{
                background-color: #fff;
                box-shadow: 0 1.6px 3.6px 0 rgba(0, 0, 0, 0.132), 0 0.3px 0.9px 0 rgba(0, 0, 0, 0.108);
                padding: 20px;
            }}
            #font-list > div > span {{
                font-size: 1rem;
            }}
        </style>
    </head>
    <body>
    Icon font size: <input type="text" id="font-size" value="{font_size}" onchange="document.getElementById('font-list').style.fontSize=this.value">
    <div id="font-list" style="font-size: {font_size};">
"#,
        css = escape_html(css_url),
    );

    let generic = escape_html(&style.generic_class);
    for (index, spec) in glyphs.iter().enumerate() {
        let name = escape_html(&spec.name);
        let icon = if uses_class_entry(mode, index + 1) {
            format!(
                r#"<i class="{generic} {}{name}"></i>"#,
                escape_html(&style.class_prefix)
            )
        } else {
            format!(r#"<i class="{generic}">{name}</i>"#)
        };
        let _ = writeln!(html, "<div>{icon}<br><span>{name}</span></div>");
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}
