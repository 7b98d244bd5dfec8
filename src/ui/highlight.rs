use crate::ui::span::Span;
use crate::ui::style::Style;

/// Splits `text` into spans, styling the char ranges in `highlights`.
pub fn render_text_spans(
    text: &str,
    highlights: &[(usize, usize)],
    base_style: Style,
    highlight_style: Style,
) -> Vec<Span> {
    if highlights.is_empty() {
        return vec![Span::styled(text, base_style)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sorted = highlights.to_vec();
    sorted.sort_unstable();

    let mut spans = Vec::new();
    let mut cursor = 0usize;
    for (start, end) in sorted {
        let start = start.clamp(cursor, chars.len());
        let end = end.min(chars.len());
        if start > cursor {
            spans.push(Span::styled(
                chars[cursor..start].iter().collect::<String>(),
                base_style,
            ));
        }
        if end > start {
            spans.push(Span::styled(
                chars[start..end].iter().collect::<String>(),
                base_style.merge(highlight_style),
            ));
        }
        cursor = end.max(cursor);
    }
    if cursor < chars.len() {
        spans.push(Span::styled(
            chars[cursor..].iter().collect::<String>(),
            base_style,
        ));
    }

    spans
}
