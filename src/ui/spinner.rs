use crate::ui::span::Span;
use crate::ui::style::Style;
use std::time::Duration;

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Pending-search indicator. The glyph is a pure function of elapsed time
/// so redraws stay stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner;

impl Spinner {
    pub fn glyph(elapsed: Duration) -> char {
        let frame = (elapsed.as_millis() / FRAME_INTERVAL.as_millis()) as usize;
        FRAMES[frame % FRAMES.len()]
    }

    pub fn span(elapsed: Duration, style: Style) -> Span {
        Span::styled(Self::glyph(elapsed).to_string(), style)
    }
}
