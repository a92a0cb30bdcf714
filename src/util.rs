use ratatui::layout::{Flex, Layout, Rect, Size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Return a rectangle of the given size in the center of `area`, shrunk to
/// fit if `area` is too small
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

/// Return the longest prefix of `s` that fits within `width` terminal
/// columns, ending it with an ellipsis if anything had to be cut
pub(crate) fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        // Leave a column for the ellipsis
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    if width > 0 {
        out.push('…');
    }
    out
}
