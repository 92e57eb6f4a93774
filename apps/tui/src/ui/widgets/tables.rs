use std::ops::Range;

/// First row to draw so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || selected_index < max_visible_rows {
        return 0;
    }

    selected_index.saturating_sub(max_visible_rows) + 1
}

pub fn visible_rows(total_rows: usize, max_visible_rows: usize, selected_index: usize) -> Range<usize> {
    let start = scroll_offset(total_rows, max_visible_rows, selected_index);
    start..total_rows.min(start + max_visible_rows)
}

/// Cuts `text` to `width` characters, marking the cut with `~`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('~');
    cut
}
