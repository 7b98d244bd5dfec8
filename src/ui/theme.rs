use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub label: Style,
    pub input: Style,
    pub placeholder: Style,
    pub disabled: Style,
    pub hint: Style,
    pub status: Style,
    pub notice: Style,
    pub error: Style,
    pub border: Style,
    pub row: Style,
    pub focused_row: Style,
    pub marker_selected: Style,
    pub highlight: Style,
    pub spinner: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            label: Style::new().bold(),
            input: Style::default(),
            placeholder: Style::new().color(Color::DarkGrey),
            disabled: Style::new().color(Color::DarkGrey).dim(),
            hint: Style::new().color(Color::DarkGrey),
            status: Style::new().color(Color::Cyan),
            notice: Style::new().color(Color::Yellow),
            error: Style::new().color(Color::Red).bold(),
            border: Style::new().color(Color::DarkGrey),
            row: Style::default(),
            focused_row: Style::new().color(Color::White).background(Color::Blue).bold(),
            marker_selected: Style::new().color(Color::Green),
            highlight: Style::new().color(Color::Yellow).bold(),
            spinner: Style::new().color(Color::Cyan),
        }
    }
}
