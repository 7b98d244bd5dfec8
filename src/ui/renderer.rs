use crate::core::controller::{Row, SearchController};
use crate::core::filter::{FilterStrategy, match_ranges};
use crate::core::selection::SelectMode;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::highlight::render_text_spans;
use crate::ui::placement::{PanelGeometry, PlacementOptions, Rect, place_panel};
use crate::ui::span::{Span, SpanLine, line_width, pad_line, truncate_line};
use crate::ui::spinner::Spinner;
use crate::ui::style::Style;
use crate::ui::theme::Theme;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const INPUT_ROW: u16 = 2;
const PROMPT: &str = "> ";
const MIN_PANEL_WIDTH: u16 = 24;
const HELP: &str = "↑/↓ move · Enter toggle · Esc clear · Tab focus · ^T multiple · ^D disabled · ^X remove last · ^C quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Host-side state the controller does not own.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub notice: Option<Notice>,
    pub elapsed: Duration,
    /// First result row shown in the panel.
    pub scroll: usize,
}

impl ViewState {
    /// A freshly opened panel starts from its first result.
    pub fn panel_opened(&mut self) {
        self.scroll = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFrame {
    pub geometry: PanelGeometry,
    pub lines: Vec<SpanLine>,
    pub first_row: usize,
    pub item_rows: usize,
}

impl PanelFrame {
    /// Result index under a terminal cell, if any.
    pub fn index_at(&self, col: u16, row: u16) -> Option<usize> {
        let row = self.geometry.content_row_at(col, row)?;
        (row < self.item_rows).then_some(self.first_row + row)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub panel: Option<PanelFrame>,
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
    placement: PlacementOptions,
}

impl Renderer {
    pub fn render(
        &self,
        search: &SearchController,
        view: &ViewState,
        size: TerminalSize,
    ) -> RenderFrame {
        let width = size.width as usize;
        let mut frame = RenderFrame::default();

        frame.lines.push(self.status_line(search));
        frame.lines.push(self.label_line(search));
        let (input, cursor_col) = self.input_line(search, view);
        frame.lines.push(input);
        if let Some(col) = cursor_col {
            frame.cursor = Some(CursorPos {
                col: col.min(size.width.saturating_sub(1)),
                row: INPUT_ROW,
            });
        }

        let description = &search.config().description;
        if !description.is_empty() {
            frame
                .lines
                .push(vec![Span::styled(description.clone(), self.theme.hint)]);
        }

        let selected: Vec<_> = search.selected().collect();
        if !selected.is_empty() {
            frame.lines.push(Vec::new());
            frame
                .lines
                .push(vec![Span::styled("Selected items:", self.theme.label)]);
            for item in selected {
                frame.lines.push(vec![
                    Span::styled("  ✕ ", self.theme.error),
                    Span::styled(item.as_str(), self.theme.row),
                ]);
            }
        }

        frame.lines.push(Vec::new());
        if let Some(notice) = &view.notice {
            let style = match notice.kind {
                NoticeKind::Info => self.theme.notice,
                NoticeKind::Error => self.theme.error,
            };
            frame
                .lines
                .push(vec![Span::styled(notice.text.clone(), style)]);
        }
        frame.lines.push(vec![Span::styled(HELP, self.theme.hint)]);

        frame.lines = frame
            .lines
            .into_iter()
            .map(|line| truncate_line(line, width))
            .collect();

        if search.is_open() && !search.is_loading() {
            frame.panel = self.panel(search, view.scroll, size);
        }
        frame
    }

    fn status_line(&self, search: &SearchController) -> SpanLine {
        vec![Span::styled(
            format!(
                "Selected: {}   Searched term: {}",
                search.selected_count(),
                search.searched_term()
            ),
            self.theme.status,
        )]
    }

    fn label_line(&self, search: &SearchController) -> SpanLine {
        let mut line = vec![Span::styled(search.config().label.clone(), self.theme.label)];
        if search.mode() == SelectMode::Multiple {
            line.push(Span::styled(" [multiple]", self.theme.hint));
        }
        let filter = search.config().filter;
        if filter != FilterStrategy::Substring {
            line.push(Span::styled(format!(" [{}]", filter.name()), self.theme.hint));
        }
        if search.is_disabled() {
            line.push(Span::styled(" (disabled)", self.theme.disabled));
        }
        line
    }

    fn input_line(&self, search: &SearchController, view: &ViewState) -> (SpanLine, Option<u16>) {
        if search.is_loading() {
            return (
                vec![
                    Spinner::span(view.elapsed, self.theme.spinner),
                    Span::styled(" Loading items…", self.theme.hint),
                ],
                None,
            );
        }

        let disabled = search.is_disabled();
        let text_style = if disabled {
            self.theme.disabled
        } else {
            self.theme.input
        };
        let mut line = vec![Span::styled(PROMPT, self.theme.label)];
        if search.query().is_empty() {
            let placeholder = if disabled {
                self.theme.disabled
            } else {
                self.theme.placeholder
            };
            line.push(Span::styled(search.config().placeholder.clone(), placeholder));
        } else {
            line.push(Span::styled(search.query(), text_style));
        }
        if search.is_searching() {
            line.push(Span::new("  "));
            line.push(Spinner::span(view.elapsed, self.theme.spinner));
        }

        let cursor = (search.is_input_focused() && !disabled).then(|| {
            let col = UnicodeWidthStr::width(PROMPT) + UnicodeWidthStr::width(search.query());
            col.min(u16::MAX as usize) as u16
        });
        (line, cursor)
    }

    fn panel(&self, search: &SearchController, scroll: usize, size: TerminalSize) -> Option<PanelFrame> {
        let rows = search.rows();
        let capacity = search.config().max_visible.max(1);
        let first_row = visible_offset(scroll, capacity, search.focus(), rows.len());
        let shown = &rows[first_row..rows.len().min(first_row + capacity)];

        let mut content: Vec<SpanLine> = shown
            .iter()
            .map(|row| self.row_line(row, search.searched_term()))
            .collect();
        let mut item_rows = content.len();
        if rows.is_empty() {
            content.push(vec![Span::styled("  No results", self.theme.hint)]);
        } else if rows.len() > capacity {
            content.push(vec![Span::styled(
                format!(
                    "  {}-{} of {}",
                    first_row + 1,
                    first_row + shown.len(),
                    rows.len()
                ),
                self.theme.hint,
            )]);
        }

        let anchor = input_anchor(size);
        let content_width = content.iter().map(|line| line_width(line)).max().unwrap_or(0);
        let width = (content_width + 2).min(u16::MAX as usize) as u16;
        let width = width.max(MIN_PANEL_WIDTH);
        let height = (content.len() + 2).min(u16::MAX as usize) as u16;
        let geometry = place_panel(anchor, width, height, size, self.placement)?;

        let inner = geometry.content();
        content.truncate(inner.height as usize);
        item_rows = item_rows.min(content.len());

        let border = self.theme.border;
        let horizontal = "─".repeat(inner.width as usize);
        let mut lines = Vec::with_capacity(content.len() + 2);
        lines.push(vec![Span::styled(format!("┌{horizontal}┐"), border)]);
        for (index, line) in content.into_iter().enumerate() {
            let fill = if index < item_rows && shown[index].is_focused {
                self.theme.focused_row
            } else {
                Style::default()
            };
            let body = pad_line(truncate_line(line, inner.width as usize), inner.width as usize, fill);
            let mut bordered = vec![Span::styled("│", border)];
            bordered.extend(body);
            bordered.push(Span::styled("│", border));
            lines.push(bordered);
        }
        lines.push(vec![Span::styled(format!("└{horizontal}┘"), border)]);

        Some(PanelFrame {
            geometry,
            lines,
            first_row,
            item_rows,
        })
    }

    fn row_line(&self, row: &Row, query: &str) -> SpanLine {
        let base = if row.is_focused {
            self.theme.focused_row
        } else {
            self.theme.row
        };
        let cursor = if row.is_focused { "❯ " } else { "  " };
        let (marker, marker_style) = if row.is_selected {
            ("[x] ", base.merge(self.theme.marker_selected))
        } else {
            ("[ ] ", base)
        };

        let mut line = vec![Span::styled(cursor, base), Span::styled(marker, marker_style)];
        let ranges = match_ranges(query, row.item.as_str());
        line.extend(render_text_spans(
            row.item.as_str(),
            &ranges,
            base,
            self.theme.highlight,
        ));
        line
    }
}

/// Where the input box sits; the panel hangs off it.
pub fn input_anchor(size: TerminalSize) -> Rect {
    Rect {
        col: 0,
        row: INPUT_ROW,
        width: (size.width / 2).max(MIN_PANEL_WIDTH).min(size.width),
        height: 1,
    }
}

/// Scroll offset that keeps `focus` inside a window of `capacity` rows.
pub fn visible_offset(offset: usize, capacity: usize, focus: Option<usize>, len: usize) -> usize {
    if len <= capacity {
        return 0;
    }
    let mut offset = offset.min(len - capacity);
    if let Some(focus) = focus {
        if focus < offset {
            offset = focus;
        } else if focus >= offset + capacity {
            offset = focus + 1 - capacity;
        }
    }
    offset
}
