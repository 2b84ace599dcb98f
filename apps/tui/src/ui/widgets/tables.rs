/// First row to draw so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
        assert_eq!(scroll_offset(30, 10, 3), 0);
        assert_eq!(scroll_offset(30, 10, 10), 1);
        assert_eq!(scroll_offset(30, 10, 29), 20);
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Lung", 10), "Lung");
        assert_eq!(truncate("Haematopoietic And Lymphoid", 8), "Haemato…");
    }
}
