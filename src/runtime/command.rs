use crate::core::focus::NavKey;

/// What a key press asks the runtime to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Insert(char),
    Backspace,
    DeleteWord,
    ClearQuery,
    Nav(NavKey),
    ToggleFocus,
    ToggleDisabled,
    ToggleMultiple,
    RemoveLast,
    Noop,
}
