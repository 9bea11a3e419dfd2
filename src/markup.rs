//! Rich text markup for glyphs.
//!
//! Tags open in the order bold, italic, color, size and close in reverse, so they
//! always nest correctly. Consecutive glyphs with the same style share a pair.
use crate::prelude::{Glyph, Style};

/// Pushes the opening tags for a style.
fn open(out: &mut String, style: &Style) {
    if style.bold {
        out.push_str("<b>");
    }
    if style.italic {
        out.push_str("<i>");
    }
    if let Some(color) = &style.color {
        out.push_str("<color=");
        out.push_str(color);
        out.push('>');
    }
    if let Some(size) = &style.size {
        out.push_str("<size=");
        out.push_str(size);
        out.push('>');
    }
}

/// Pushes the closing tags for a style.
fn close(out: &mut String, style: &Style) {
    if style.size.is_some() {
        out.push_str("</size>");
    }
    if style.color.is_some() {
        out.push_str("</color>");
    }
    if style.italic {
        out.push_str("</i>");
    }
    if style.bold {
        out.push_str("</b>");
    }
}

/// Appends glyphs with their style markup to `out`.
///
/// With `keep_color` false, color is left out of the markup: hidden glyphs are
/// already inside a transparent color.
pub(crate) fn push_glyphs<'a>(
    out: &mut String,
    glyphs: impl IntoIterator<Item = &'a Glyph>,
    keep_color: bool,
) {
    let mut current: Option<Style> = None;
    for glyph in glyphs {
        let style = if keep_color {
            glyph.style.clone()
        } else {
            Style {
                color: None,
                ..glyph.style.clone()
            }
        };

        if current.as_ref() != Some(&style) {
            if let Some(prev) = &current {
                close(out, prev);
            }
            open(out, &style);
        }
        out.push(glyph.character);
        current = Some(style);
    }
    if let Some(prev) = &current {
        close(out, prev);
    }
}

/// Renders glyphs as markup.
///
/// # Examples
///
/// ```
/// use bevy_scribe::prelude::*;
///
/// let entries = build_entries(&tokenize("a{b}{i}b{/i}{/b}"), &WriterSettings::default());
/// let text = render_glyphs(entries.iter().filter_map(Entry::glyph));
/// assert_eq!(text, "a<b><i>b</i></b>");
/// ```
pub fn render_glyphs<'a>(glyphs: impl IntoIterator<Item = &'a Glyph>) -> String {
    let mut out = String::new();
    push_glyphs(&mut out, glyphs, true);
    out
}
