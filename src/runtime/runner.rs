use crate::core::controller::SearchController;
use crate::core::error::Result as SearchResult;
use crate::core::event::{Effect, SearchEvent};
use crate::core::focus::NavKey;
use crate::core::item::Item;
use crate::core::selection::SelectMode;
use crate::runtime::command::Command;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::loader::ItemLoader;
use crate::terminal::{MouseEvent, MouseKind, Terminal, TerminalEvent};
use crate::ui::renderer::{Notice, PanelFrame, Renderer, ViewState, input_anchor};
use crate::ui::spinner::FRAME_INTERVAL;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

const IDLE_TIMEOUT: Duration = Duration::from_millis(120);

/// Drives a [`SearchController`] from terminal input and draws it.
pub struct Runtime {
    search: SearchController,
    terminal: Terminal,
    key_bindings: KeyBindings,
    renderer: Renderer,
    loader: Option<ItemLoader>,
    view: ViewState,
    started: Instant,
    panel: Option<PanelFrame>,
    hovering: bool,
    should_exit: bool,
}

impl Runtime {
    pub fn new(search: SearchController, terminal: Terminal) -> Self {
        Self {
            search,
            terminal,
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
            loader: None,
            view: ViewState::default(),
            started: Instant::now(),
            panel: None,
            hovering: false,
            should_exit: false,
        }
    }

    /// Shows the loading state until `loader` delivers the item set.
    pub fn with_loader(mut self, loader: ItemLoader) -> Self {
        self.search.set_loading(true);
        self.loader = Some(loader);
        self
    }

    pub fn controller(&self) -> &SearchController {
        &self.search
    }

    pub fn into_selection(self) -> Vec<Item> {
        self.search.selected().cloned().collect()
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            let focused = self.search.handle(SearchEvent::Focus, Instant::now());
            self.apply(focused)?;
            self.render()?;

            while !self.should_exit {
                self.poll_loader()?;

                let now = Instant::now();
                let settled = self.search.tick(now);
                self.apply(settled)?;

                let timeout = poll_timeout(now, self.search.deadline(), self.is_animating());
                let event = self.terminal.poll_event(timeout)?;
                self.dispatch(event)?;
            }

            Ok(())
        })();

        for effect in self.search.unmount() {
            trace!(?effect, "unmount");
        }
        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn is_animating(&self) -> bool {
        self.search.is_searching() || self.search.is_loading()
    }

    fn poll_loader(&mut self) -> io::Result<()> {
        let Some(result) = self.loader.as_ref().and_then(ItemLoader::try_take) else {
            return Ok(());
        };
        self.loader = None;

        let mut effects = self.search.set_loading(false);
        match result {
            Ok(items) => {
                info!(count = items.len(), "items loaded");
                match self.search.set_items(items) {
                    Ok(more) => effects.extend(more),
                    Err(error) => return self.apply(Err(error)),
                }
                match self.search.handle(SearchEvent::Focus, Instant::now()) {
                    Ok(more) => effects.extend(more),
                    Err(error) => return self.apply(Err(error)),
                }
            }
            Err(error) => {
                warn!(%error, "loading items failed");
                self.view.notice = Some(Notice::error(error.to_string()));
                effects.push(Effect::RequestRender);
            }
        }
        self.apply(Ok(effects))
    }

    fn dispatch(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                trace!(width = size.width, height = size.height, "resized");
                self.render()
            }
            TerminalEvent::Key(key) => {
                let command = self.key_bindings.resolve(key);
                trace!(?key, ?command, "key");
                self.execute(command)
            }
            TerminalEvent::Mouse(mouse) => self.on_mouse(mouse),
            TerminalEvent::Tick => {
                if self.is_animating() {
                    self.render()
                } else {
                    Ok(())
                }
            }
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        let now = Instant::now();
        let result = match command {
            Command::Exit => {
                self.should_exit = true;
                return Ok(());
            }
            Command::Noop => return Ok(()),
            Command::Insert(ch) => {
                let mut query = self.search.query().to_string();
                query.push(ch);
                self.search.handle(SearchEvent::Input(query), now)
            }
            Command::Backspace => {
                let mut query = self.search.query().to_string();
                if query.pop().is_none() {
                    return Ok(());
                }
                self.search.handle(SearchEvent::Input(query), now)
            }
            Command::DeleteWord => {
                let query = delete_word(self.search.query());
                self.search.handle(SearchEvent::Input(query), now)
            }
            Command::ClearQuery => self.search.handle(SearchEvent::Clear, now),
            Command::Nav(key) => self.search.handle(SearchEvent::Key(key), now),
            Command::ToggleFocus => {
                let event = if self.search.is_input_focused() {
                    SearchEvent::Blur
                } else {
                    SearchEvent::Focus
                };
                self.search.handle(event, now)
            }
            Command::ToggleDisabled => {
                let disabled = !self.search.is_disabled();
                self.view.notice = Some(Notice::info(if disabled {
                    "Search disabled"
                } else {
                    "Search enabled"
                }));
                Ok(self.search.set_disabled(disabled))
            }
            Command::ToggleMultiple => {
                let multiple = self.search.mode() == SelectMode::Single;
                self.view.notice = Some(Notice::info(if multiple {
                    "Multiple selection on"
                } else {
                    "Multiple selection off"
                }));
                Ok(self.search.set_multiple(multiple))
            }
            Command::RemoveLast => match self.search.selected().last().cloned() {
                Some(item) => self.search.handle(SearchEvent::Remove(item), now),
                None => return Ok(()),
            },
        };
        self.apply(result)
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> io::Result<()> {
        let now = Instant::now();
        let index = self
            .panel
            .as_ref()
            .and_then(|panel| panel.index_at(mouse.col, mouse.row));

        let result = match (mouse.kind, index) {
            (MouseKind::Moved, Some(index)) => {
                self.hovering = true;
                self.search.handle(SearchEvent::Hover(index), now)
            }
            (MouseKind::Moved, None) if self.hovering => {
                self.hovering = false;
                self.search.handle(SearchEvent::Leave, now)
            }
            (MouseKind::Down, Some(index)) => self.search.handle(SearchEvent::Click(index), now),
            (MouseKind::Down, None) => {
                let on_panel = self
                    .panel
                    .as_ref()
                    .is_some_and(|panel| panel.geometry.area.contains(mouse.col, mouse.row));
                if on_panel {
                    return Ok(());
                }
                let on_input = input_anchor(self.terminal.size()).contains(mouse.col, mouse.row);
                let event = if on_input {
                    SearchEvent::Focus
                } else {
                    SearchEvent::Blur
                };
                self.search.handle(event, now)
            }
            (MouseKind::ScrollUp, _) if self.panel.is_some() => {
                self.search.handle(SearchEvent::Key(NavKey::Up), now)
            }
            (MouseKind::ScrollDown, _) if self.panel.is_some() => {
                self.search.handle(SearchEvent::Key(NavKey::Down), now)
            }
            _ => return Ok(()),
        };
        self.apply(result)
    }

    fn apply(&mut self, result: SearchResult<Vec<Effect>>) -> io::Result<()> {
        let effects = match result {
            Ok(effects) => effects,
            Err(error) => {
                warn!(%error, "search failed");
                self.view.notice = Some(Notice::error(error.to_string()));
                return self.render();
            }
        };

        let mut render_requested = false;
        for effect in effects {
            match effect {
                Effect::QueryChanged(query) => {
                    trace!(%query, "query changed");
                    self.view.notice = None;
                    render_requested = true;
                }
                Effect::SelectionChanged { item, previous } => {
                    debug!(%item, selected = !previous, "selection changed");
                }
                Effect::SelectionRejected(rejection) => {
                    self.view.notice = Some(Notice::info(rejection.to_string()));
                    render_requested = true;
                }
                Effect::StartTracking => {
                    self.view.panel_opened();
                    render_requested = true;
                }
                Effect::StopTracking => {
                    self.hovering = false;
                    self.panel = None;
                    self.view.scroll = 0;
                }
                Effect::RequestRender => render_requested = true,
            }
        }

        if render_requested {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.view.elapsed = self.started.elapsed();
        let frame = self
            .renderer
            .render(&self.search, &self.view, self.terminal.size());
        self.terminal.render(&frame)?;
        self.view.scroll = frame.panel.as_ref().map_or(0, |panel| panel.first_row);
        self.panel = frame.panel;
        Ok(())
    }
}

/// How long to wait for input: until the debounce fires, or the next
/// spinner frame while something is pending.
pub fn poll_timeout(now: Instant, deadline: Option<Instant>, animating: bool) -> Duration {
    let mut timeout = IDLE_TIMEOUT;
    if animating {
        timeout = timeout.min(FRAME_INTERVAL);
    }
    if let Some(deadline) = deadline {
        timeout = timeout.min(deadline.saturating_duration_since(now));
    }
    timeout
}

/// Drops the last word of `query` along with trailing whitespace.
pub fn delete_word(query: &str) -> String {
    let trimmed = query.trim_end();
    match trimmed.char_indices().rev().find(|(_, ch)| ch.is_whitespace()) {
        Some((index, ch)) => trimmed[..index + ch.len_utf8()].to_string(),
        None => String::new(),
    }
}
