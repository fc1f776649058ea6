//! Search match highlighting for table cells.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::theme;

/// Highlight every case-insensitive occurrence of `query` in `text`.
///
/// Matching is ASCII case-folded so byte offsets line up with the original
/// text; the matched spans keep their original case.
pub fn highlight_text(text: &str, query: &str) -> Line<'static> {
    if query.is_empty() {
        return Line::from(text.to_string());
    }

    let t = theme();
    let match_style = Style::default()
        .bg(t.warning)
        .fg(t.bg)
        .add_modifier(Modifier::BOLD);

    let text_lower = text.to_ascii_lowercase();
    let query_lower = query.to_ascii_lowercase();

    let mut spans = Vec::new();
    let mut last_end = 0;

    for (start, matched) in text_lower.match_indices(&query_lower) {
        if start > last_end {
            spans.push(Span::raw(text[last_end..start].to_string()));
        }
        let end = start + matched.len();
        spans.push(Span::styled(text[start..end].to_string(), match_style));
        last_end = end;
    }

    if spans.is_empty() {
        return Line::from(text.to_string());
    }
    if last_end < text.len() {
        spans.push(Span::raw(text[last_end..].to_string()));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_empty_query() {
        let line = highlight_text("KPJ Ipoh", "");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "KPJ Ipoh");
    }

    #[test]
    fn test_highlight_no_match() {
        let line = highlight_text("Weekly", "daily");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Weekly");
    }

    #[test]
    fn test_highlight_keeps_case() {
        let line = highlight_text("Weekly", "week");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "Week");
        assert_eq!(line.spans[1].content, "ly");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_highlight_multiple_matches() {
        let line = highlight_text("KPJ Damansara", "a");
        let contents: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(
            contents,
            vec!["KPJ D", "a", "m", "a", "ns", "a", "r", "a"]
        );
    }

    #[test]
    fn test_highlight_code() {
        let line = highlight_text("45", "5");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "4");
        assert_eq!(line.spans[1].content, "5");
    }
}
