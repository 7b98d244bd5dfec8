/// Keys the controller understands. Everything else is text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Keyboard/pointer highlight within the filtered results.
///
/// `None` means no row is focused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    index: Option<usize>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.index
    }

    pub fn is_focused(&self, index: usize) -> bool {
        self.index == Some(index)
    }

    pub fn reset(&mut self) {
        self.index = None;
    }

    pub fn next(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            self.index = None;
            return None;
        }
        self.index = Some(match self.index {
            Some(current) => (current + 1) % len,
            None => 0,
        });
        self.index
    }

    pub fn prev(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            self.index = None;
            return None;
        }
        self.index = Some(match self.index {
            Some(current) if current > 0 && current < len => current - 1,
            _ => len - 1,
        });
        self.index
    }

    /// Pointer entered row `index`.
    pub fn hover(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        let changed = self.index != Some(index);
        self.index = Some(index);
        changed
    }

    /// Pointer left the rows. Mouse focus does not stick.
    pub fn leave(&mut self) -> bool {
        self.index.take().is_some()
    }
}
