#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// Visibility transition, reported so hosts can start or stop tracking
/// the floating panel's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTransition {
    Opened,
    Closed,
}

impl PanelState {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// Moves to `open`, returning the transition if the state changed.
    pub fn set(&mut self, open: bool) -> Option<PanelTransition> {
        match (*self, open) {
            (Self::Closed, true) => {
                *self = Self::Open;
                Some(PanelTransition::Opened)
            }
            (Self::Open, false) => {
                *self = Self::Closed;
                Some(PanelTransition::Closed)
            }
            _ => None,
        }
    }
}
