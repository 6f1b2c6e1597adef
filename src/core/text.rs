//! Width-aware line fitting shared by every text-bearing control.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::style::Alignment;

/// Display width of `text` in terminal columns. Control chars count as zero.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.chars().all(char::is_control) {
        return 0;
    }
    UnicodeWidthStr::width(grapheme)
}

/// Longest prefix of `text` that fits in `width` columns, never splitting a
/// grapheme. Returns the prefix and its width.
pub fn truncate_to_width(text: &str, width: usize) -> (&str, usize) {
    let mut used = 0;
    let mut end = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = grapheme_width(grapheme);
        if used + w > width {
            return (&text[..offset], used);
        }
        used += w;
        end = offset + grapheme.len();
    }
    (&text[..end], used)
}

/// Drops control characters so a line cannot move the terminal cursor.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|ch| if ch == '\t' { ' ' } else { ch })
        .filter(|ch| !ch.is_control())
        .collect()
}

/// Fits one line into exactly `width` columns.
///
/// Centered text is first left-padded with `floor((width - len) / 2)` fill glyphs;
/// the result is then truncated if too long or right-padded with `fill`.
pub fn fit_line(text: &str, width: usize, alignment: Alignment, fill: char) -> String {
    let clean = sanitize(text);
    let len = display_width(&clean);
    let mut line = String::with_capacity(width.max(clean.len()));
    if alignment == Alignment::Center && len < width {
        line.extend(std::iter::repeat(fill).take((width - len) / 2));
    }
    line.push_str(&clean);

    let (kept, used) = truncate_to_width(&line, width);
    let mut out = kept.to_string();
    out.extend(std::iter::repeat(fill).take(width - used));
    out
}
