use crate::ui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

pub type SpanLine = Vec<Span>;

pub fn line_width(line: &[Span]) -> usize {
    line.iter().map(Span::width).sum()
}

/// Cuts `line` to at most `max_width` display columns.
pub fn truncate_line(line: SpanLine, max_width: usize) -> SpanLine {
    let mut out = Vec::with_capacity(line.len());
    let mut used = 0usize;

    for span in line {
        if used >= max_width {
            break;
        }
        let width = span.width();
        if used + width <= max_width {
            used += width;
            out.push(span);
            continue;
        }

        let mut text = String::new();
        for ch in span.text.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + ch_width > max_width {
                break;
            }
            used += ch_width;
            text.push(ch);
        }
        if !text.is_empty() {
            out.push(Span::styled(text, span.style));
        }
        break;
    }

    out
}

/// Right-pads `line` with plain spaces up to `width` columns.
pub fn pad_line(mut line: SpanLine, width: usize, style: Style) -> SpanLine {
    let current = line_width(&line);
    if current < width {
        line.push(Span::styled(" ".repeat(width - current), style));
    }
    line
}
