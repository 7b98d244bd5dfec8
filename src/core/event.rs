use crate::core::error::SelectionError;
use crate::core::focus::NavKey;
use crate::core::item::Item;

/// Input events fed to [`SearchController::handle`](crate::core::controller::SearchController::handle).
///
/// Each event carries everything the transition needs; the controller
/// never reads state captured at an earlier point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The raw query text was replaced.
    Input(String),
    Key(NavKey),
    /// Pointer entered result row `index`.
    Hover(usize),
    /// Pointer left the result rows.
    Leave,
    /// Pointer activated result row `index`.
    Click(usize),
    /// The text input gained focus.
    Focus,
    /// The text input lost focus.
    Blur,
    /// Deselect an item from outside the result list.
    Remove(Item),
    /// Clear the query and close the panel.
    Clear,
}

/// Outputs of a transition, for the host to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    QueryChanged(String),
    SelectionChanged { item: Item, previous: bool },
    SelectionRejected(SelectionError),
    /// The panel opened; begin keeping its position in sync with the anchor.
    StartTracking,
    /// The panel closed; stop tracking its position.
    StopTracking,
    RequestRender,
}
