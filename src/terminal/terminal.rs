use crate::terminal::terminal_event::{
    KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseKind, TerminalEvent, TerminalSize,
};
use crate::ui::renderer::RenderFrame;
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
    KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers as CrosstermKeyModifiers, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use tracing::trace;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Alternate-screen crossterm backend.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    entered: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            entered: false,
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        self.refresh_size()?;
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            DisableLineWrap,
            Hide
        )?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            DisableMouseCapture,
            LeaveAlternateScreen,
            EnableLineWrap,
            Show
        )?;
        self.stdout.flush()
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
    }

    pub fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.size = TerminalSize { width, height };
        Ok(())
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        let mapped = match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                TerminalEvent::Key(map_key_event(key))
            }
            CrosstermEvent::Mouse(mouse) => map_mouse_event(mouse)
                .map(TerminalEvent::Mouse)
                .unwrap_or(TerminalEvent::Tick),
            CrosstermEvent::Resize(width, height) => {
                let size = TerminalSize { width, height };
                self.size = size;
                TerminalEvent::Resize(size)
            }
            _ => TerminalEvent::Tick,
        };
        Ok(mapped)
    }

    /// Draws base lines top-down, then the panel on top of them, then
    /// places the cursor.
    pub fn render(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let TerminalSize { width, height } = self.size;
        if width == 0 || height == 0 {
            return Ok(());
        }

        queue!(
            self.stdout,
            BeginSynchronizedUpdate,
            Hide,
            MoveTo(0, 0),
            Clear(ClearType::All)
        )?;

        for (row, line) in frame.lines.iter().take(height as usize).enumerate() {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            self.write_span_line(line, width)?;
        }

        if let Some(panel) = &frame.panel {
            let area = panel.geometry.area;
            trace!(col = area.col, row = area.row, height = area.height, "draw panel");
            for (offset, line) in panel.lines.iter().enumerate() {
                let row = area.row as usize + offset;
                if row >= height as usize {
                    break;
                }
                queue!(self.stdout, MoveTo(area.col, row as u16))?;
                self.write_span_line(line, width.saturating_sub(area.col))?;
            }
        }

        match frame.cursor {
            Some(cursor) if cursor.row < height => {
                let col = cursor.col.min(width.saturating_sub(1));
                queue!(self.stdout, MoveTo(col, cursor.row), Show)?;
            }
            _ => queue!(self.stdout, Hide)?,
        }

        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn write_span_line(&mut self, line: &SpanLine, width: u16) -> io::Result<()> {
        let mut used = 0usize;
        for span in line {
            if used >= width as usize {
                break;
            }
            let clipped = clip_to_width(&span.text, (width as usize).saturating_sub(used));
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(self.stdout, Print(clipped.as_str()), ResetColor)?;
            if span.style.bold || span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
            used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    out
}

fn map_mouse_event(mouse: CrosstermMouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseKind::Moved,
        MouseEventKind::Down(_) => MouseKind::Down,
        MouseEventKind::ScrollUp => MouseKind::ScrollUp,
        MouseEventKind::ScrollDown => MouseKind::ScrollDown,
        _ => return None,
    };
    Some(MouseEvent {
        kind,
        col: mouse.column,
        row: mouse.row,
    })
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    #[test]
    fn maps_ctrl_chars() {
        let key = CrosstermKeyEvent {
            code: CrosstermKeyCode::Char('t'),
            modifiers: CrosstermKeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key_event(key), KeyEvent::ctrl('t'));
    }

    #[test]
    fn unbound_editing_keys_map_to_unknown() {
        for code in [
            CrosstermKeyCode::Home,
            CrosstermKeyCode::End,
            CrosstermKeyCode::Delete,
            CrosstermKeyCode::Left,
            CrosstermKeyCode::Right,
        ] {
            assert_eq!(map_key_code(code), KeyCode::Unknown);
        }
        assert_eq!(map_key_code(CrosstermKeyCode::Up), KeyCode::Up);
    }

    #[test]
    fn maps_mouse_kinds() {
        let click = CrosstermMouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: CrosstermKeyModifiers::NONE,
        };
        assert_eq!(
            map_mouse_event(click),
            Some(MouseEvent {
                kind: MouseKind::Down,
                col: 4,
                row: 7,
            })
        );

        let release = CrosstermMouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            ..click
        };
        assert_eq!(map_mouse_event(release), None);
    }

    #[test]
    fn clips_wide_chars_at_boundary() {
        assert_eq!(clip_to_width("ab漢c", 3), "ab");
        assert_eq!(clip_to_width("abc", 10), "abc");
    }
}
