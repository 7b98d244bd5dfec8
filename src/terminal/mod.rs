pub mod terminal;
pub mod terminal_event;

pub use terminal::Terminal;
pub use terminal_event::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseKind, TerminalEvent,
    TerminalSize,
};
