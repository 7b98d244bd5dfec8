use crate::core::focus::NavKey;
use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = Self::default();
        bindings.install_defaults();
        bindings
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    /// Looks up a bound command, falling back to text insertion for
    /// printable keys without Ctrl or Alt.
    pub fn resolve(&self, event: KeyEvent) -> Command {
        if let Some(command) = self.bindings.get(&KeyBinding::from_event(event)) {
            return command.clone();
        }
        match event.code {
            KeyCode::Char(ch)
                if !event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT) =>
            {
                Command::Insert(ch)
            }
            _ => Command::Noop,
        }
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Backspace), Command::Backspace);
        self.bind(KeyBinding::ctrl(KeyCode::Backspace), Command::DeleteWord);
        self.bind(KeyBinding::ctrl(KeyCode::Char('w')), Command::DeleteWord);
        self.bind(KeyBinding::ctrl(KeyCode::Char('u')), Command::ClearQuery);
        self.bind(KeyBinding::key(KeyCode::Up), Command::Nav(NavKey::Up));
        self.bind(KeyBinding::key(KeyCode::Down), Command::Nav(NavKey::Down));
        self.bind(KeyBinding::ctrl(KeyCode::Char('p')), Command::Nav(NavKey::Up));
        self.bind(KeyBinding::ctrl(KeyCode::Char('n')), Command::Nav(NavKey::Down));
        self.bind(KeyBinding::key(KeyCode::Enter), Command::Nav(NavKey::Enter));
        self.bind(KeyBinding::key(KeyCode::Esc), Command::Nav(NavKey::Escape));
        self.bind(KeyBinding::key(KeyCode::Tab), Command::ToggleFocus);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Command::ToggleFocus,
        );
        self.bind(KeyBinding::ctrl(KeyCode::Char('d')), Command::ToggleDisabled);
        self.bind(KeyBinding::ctrl(KeyCode::Char('t')), Command::ToggleMultiple);
        self.bind(KeyBinding::ctrl(KeyCode::Char('x')), Command::RemoveLast);
    }
}
