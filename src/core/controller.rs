use crate::core::config::{EmptyResultPolicy, EscapePolicy, SearchConfig};
use crate::core::debounce::Debouncer;
use crate::core::error::Result;
use crate::core::event::{Effect, SearchEvent};
use crate::core::filter::FilterOptions;
use crate::core::focus::{FocusState, NavKey};
use crate::core::item::Item;
use crate::core::panel::{PanelState, PanelTransition};
use crate::core::selection::{SelectMode, SelectionSet};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// One row of the open panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub item: Item,
    pub is_selected: bool,
    pub is_focused: bool,
}

/// Debounced, filterable, keyboard-navigable selection list.
///
/// The controller is a reducer: hosts feed it [`SearchEvent`]s together
/// with the current time and act on the returned [`Effect`]s. Debounce
/// deadlines are exposed through [`deadline`](Self::deadline) and fired
/// with [`tick`](Self::tick); no timer outlives the controller.
pub struct SearchController {
    config: SearchConfig,
    items: Vec<Item>,
    filter: Box<dyn FilterOptions>,
    query: String,
    debounced: Debouncer<String>,
    results: Vec<Item>,
    selection: SelectionSet,
    focus: FocusState,
    panel: PanelState,
    searching: bool,
    input_focused: bool,
    dismissed: bool,
    loading: bool,
}

impl SearchController {
    pub fn new(items: Vec<Item>, config: SearchConfig) -> Self {
        let filter: Box<dyn FilterOptions> = Box::new(config.filter);
        Self {
            debounced: Debouncer::new(String::new(), config.debounce_delay()),
            selection: SelectionSet::new(config.select_mode()),
            config,
            items,
            filter,
            query: String::new(),
            results: Vec::new(),
            focus: FocusState::new(),
            panel: PanelState::default(),
            searching: false,
            input_focused: false,
            dismissed: false,
            loading: false,
        }
    }

    /// Replaces the configured filter strategy with a caller-supplied one.
    pub fn with_filter(mut self, filter: impl FilterOptions + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The last query the results were computed for.
    pub fn searched_term(&self) -> &str {
        self.debounced.settled()
    }

    pub fn results(&self) -> &[Item] {
        &self.results
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus.current()
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn mode(&self) -> SelectMode {
        self.selection.mode()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    pub fn is_selected(&self, item: &str) -> bool {
        self.selection.is_selected(item)
    }

    pub fn selected(&self) -> impl Iterator<Item = &Item> {
        self.selection.iter()
    }

    /// Rows for the open panel; empty while closed.
    pub fn rows(&self) -> Vec<Row> {
        if !self.panel.is_open() {
            return Vec::new();
        }
        self.results
            .iter()
            .enumerate()
            .map(|(index, item)| Row {
                item: item.clone(),
                is_selected: self.selection.is_selected(item.as_str()),
                is_focused: self.focus.is_focused(index),
            })
            .collect()
    }

    /// When the pending debounce fires, if anything is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.debounced.deadline()
    }

    pub fn handle(&mut self, event: SearchEvent, now: Instant) -> Result<Vec<Effect>> {
        if self.config.disabled || self.loading {
            trace!(?event, "input ignored while inactive");
            return Ok(Vec::new());
        }

        trace!(?event, "handling search event");
        let mut effects = Vec::new();
        match event {
            SearchEvent::Input(text) => self.on_input(text, now, &mut effects)?,
            SearchEvent::Key(key) => self.on_key(key, &mut effects),
            SearchEvent::Hover(index) => {
                if self.panel.is_open() && self.focus.hover(index, self.results.len()) {
                    effects.push(Effect::RequestRender);
                }
            }
            SearchEvent::Leave => {
                if self.focus.leave() {
                    effects.push(Effect::RequestRender);
                }
            }
            SearchEvent::Click(index) => {
                if self.panel.is_open() && index < self.results.len() {
                    self.focus.hover(index, self.results.len());
                    self.toggle_at(index, &mut effects);
                }
            }
            SearchEvent::Focus => {
                self.input_focused = true;
                self.dismissed = false;
                self.sync_panel(&mut effects);
                effects.push(Effect::RequestRender);
            }
            SearchEvent::Blur => {
                self.input_focused = false;
                self.focus.reset();
                self.sync_panel(&mut effects);
                effects.push(Effect::RequestRender);
            }
            SearchEvent::Remove(item) => {
                if self.selection.deselect(item.as_str()) {
                    debug!(%item, "selection removed");
                    effects.push(Effect::SelectionChanged {
                        item,
                        previous: true,
                    });
                    effects.push(Effect::RequestRender);
                }
            }
            SearchEvent::Clear => self.reset_query(&mut effects),
        }
        Ok(effects)
    }

    /// Fires the debounce if due. Runs even while disabled.
    pub fn tick(&mut self, now: Instant) -> Result<Vec<Effect>> {
        let mut effects = Vec::new();
        let previous = self.debounced.settled().clone();
        if let Some(value) = self.debounced.poll(now) {
            self.settle(value, previous, &mut effects)?;
        }
        Ok(effects)
    }

    pub fn set_disabled(&mut self, disabled: bool) -> Vec<Effect> {
        if self.config.disabled == disabled {
            return Vec::new();
        }
        debug!(disabled, "disabled flag changed");
        self.config.disabled = disabled;
        vec![Effect::RequestRender]
    }

    pub fn set_multiple(&mut self, multiple: bool) -> Vec<Effect> {
        if self.config.multiple == multiple {
            return Vec::new();
        }
        debug!(multiple, "selection mode changed");
        self.config.multiple = multiple;
        let mut effects: Vec<Effect> = self
            .selection
            .set_mode(SelectMode::from_multiple(multiple))
            .into_iter()
            .map(|item| Effect::SelectionChanged {
                item,
                previous: true,
            })
            .collect();
        effects.push(Effect::RequestRender);
        effects
    }

    pub fn set_loading(&mut self, loading: bool) -> Vec<Effect> {
        if self.loading == loading {
            return Vec::new();
        }
        self.loading = loading;
        vec![Effect::RequestRender]
    }

    /// Swaps the source items and recomputes against the settled query.
    /// Selections of items that disappeared are dropped. Nothing changes
    /// when the filter fails on the new items.
    pub fn set_items(&mut self, items: Vec<Item>) -> Result<Vec<Effect>> {
        let results = self.compute(&items, self.debounced.settled())?;
        debug!(count = items.len(), results = results.len(), "item set replaced");
        self.items = items;
        self.results = results;

        let mut effects: Vec<Effect> = self
            .selection
            .retain_present(&self.items)
            .into_iter()
            .map(|item| Effect::SelectionChanged {
                item,
                previous: true,
            })
            .collect();

        self.focus.reset();
        self.sync_panel(&mut effects);
        effects.push(Effect::RequestRender);
        Ok(effects)
    }

    /// Releases the pending debounce and stops panel tracking.
    pub fn unmount(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.debounced.cancel() {
            trace!("pending debounce cancelled on unmount");
        }
        self.searching = false;
        if self.panel.set(false).is_some() {
            effects.push(Effect::StopTracking);
        }
        effects
    }

    fn on_input(&mut self, text: String, now: Instant, effects: &mut Vec<Effect>) -> Result<()> {
        if text == self.query {
            return Ok(());
        }

        self.query.clone_from(&text);
        self.searching = true;
        self.input_focused = true;
        self.dismissed = false;
        self.focus.reset();
        effects.push(Effect::QueryChanged(text.clone()));
        effects.push(Effect::RequestRender);

        let previous = self.debounced.settled().clone();
        if let Some(value) = self.debounced.push(text, now) {
            self.settle(value, previous, effects)?;
        }
        Ok(())
    }

    fn on_key(&mut self, key: NavKey, effects: &mut Vec<Effect>) {
        match key {
            NavKey::Down | NavKey::Up => {
                if !self.panel.is_open() {
                    return;
                }
                let len = self.results.len();
                let focus = if key == NavKey::Down {
                    self.focus.next(len)
                } else {
                    self.focus.prev(len)
                };
                trace!(?focus, "focus moved");
                effects.push(Effect::RequestRender);
            }
            NavKey::Enter => {
                if !self.panel.is_open() {
                    return;
                }
                if let Some(index) = self.focus.current() {
                    self.toggle_at(index, effects);
                }
            }
            NavKey::Escape => match self.config.escape {
                EscapePolicy::Reset => self.reset_query(effects),
                EscapePolicy::CloseOnly => {
                    self.dismissed = true;
                    self.focus.reset();
                    self.sync_panel(effects);
                    effects.push(Effect::RequestRender);
                }
            },
        }
    }

    fn toggle_at(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(item) = self.results.get(index).cloned() else {
            return;
        };

        match self.selection.toggle(&item) {
            Ok(outcome) => {
                debug!(%item, ?outcome, count = self.selection.count(), "selection toggled");
                effects.push(Effect::SelectionChanged {
                    item,
                    previous: outcome.was_selected(),
                });
            }
            Err(rejection) => {
                warn!(%rejection, "selection rejected");
                effects.push(Effect::SelectionRejected(rejection));
            }
        }
        effects.push(Effect::RequestRender);
    }

    fn reset_query(&mut self, effects: &mut Vec<Effect>) {
        if !self.query.is_empty() {
            self.query.clear();
            effects.push(Effect::QueryChanged(String::new()));
        }
        self.debounced.settle_now(String::new());
        self.searching = false;
        self.results.clear();
        self.focus.reset();
        self.sync_panel(effects);
        effects.push(Effect::RequestRender);
    }

    /// Applies a newly settled query. On a filter failure the settled
    /// query rolls back to `previous` and the results stay as they were.
    fn settle(
        &mut self,
        value: String,
        previous: String,
        effects: &mut Vec<Effect>,
    ) -> Result<()> {
        self.searching = false;
        self.results = match self.compute(&self.items, &value) {
            Ok(results) => results,
            Err(error) => {
                warn!(%error, query = %value, "filter failed");
                self.debounced.settle_now(previous);
                return Err(error);
            }
        };
        self.focus.reset();
        debug!(query = %value, results = self.results.len(), "debounced query settled");
        self.sync_panel(effects);
        effects.push(Effect::RequestRender);
        Ok(())
    }

    fn compute(&self, items: &[Item], query: &str) -> Result<Vec<Item>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.filter.filter(items, query)?)
    }

    fn sync_panel(&mut self, effects: &mut Vec<Effect>) {
        let hide_empty = self.results.is_empty()
            && self.config.empty_results == EmptyResultPolicy::Close;
        let open = self.input_focused
            && !self.dismissed
            && !self.debounced.settled().is_empty()
            && !hide_empty;

        match self.panel.set(open) {
            Some(PanelTransition::Opened) => {
                debug!("panel opened");
                effects.push(Effect::StartTracking);
            }
            Some(PanelTransition::Closed) => {
                debug!("panel closed");
                effects.push(Effect::StopTracking);
            }
            None => {}
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.debounced.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SearchConfig;
    use crate::core::error::{FilterError, SearchError, SelectionError};
    use crate::core::filter::FilterStrategy;
    use crate::core::item::items_from_strings;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(300);

    fn starters() -> Vec<Item> {
        items_from_strings(["Bulbasaur", "Charmander", "Squirtle"])
    }

    fn controller(config: SearchConfig) -> SearchController {
        SearchController::new(starters(), config)
    }

    fn settle(controller: &mut SearchController, text: &str, now: Instant) -> Vec<Effect> {
        let mut effects = controller
            .handle(SearchEvent::Input(text.to_string()), now)
            .expect("input");
        effects.extend(controller.tick(now + DELAY).expect("tick"));
        effects
    }

    #[test]
    fn raw_query_echoes_before_debounce() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());

        let effects = search
            .handle(SearchEvent::Input("char".to_string()), start)
            .expect("input");
        assert!(effects.contains(&Effect::QueryChanged("char".to_string())));
        assert_eq!(search.query(), "char");
        assert_eq!(search.searched_term(), "");
        assert!(search.is_searching());
        assert!(!search.is_open());
        assert_eq!(search.deadline(), Some(start + DELAY));

        let effects = search.tick(start + DELAY).expect("tick");
        assert!(effects.contains(&Effect::StartTracking));
        assert!(!search.is_searching());
        assert!(search.is_open());
        assert_eq!(search.results(), items_from_strings(["Charmander"]).as_slice());
    }

    #[test]
    fn zero_delay_filters_synchronously() {
        let mut search = controller(SearchConfig::default().with_debounced(false));
        search
            .handle(SearchEvent::Input("squ".to_string()), Instant::now())
            .expect("input");
        assert!(!search.is_searching());
        assert!(search.is_open());
        assert_eq!(search.results(), items_from_strings(["Squirtle"]).as_slice());
    }

    #[test]
    fn superseded_keystrokes_never_settle() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());

        search
            .handle(SearchEvent::Input("b".to_string()), start)
            .expect("input");
        search
            .handle(SearchEvent::Input("bu".to_string()), start + Duration::from_millis(100))
            .expect("input");
        assert!(search.tick(start + DELAY).expect("tick").is_empty());
        assert_eq!(search.searched_term(), "");

        search
            .tick(start + Duration::from_millis(400))
            .expect("tick");
        assert_eq!(search.searched_term(), "bu");
    }

    #[test]
    fn enter_toggles_focused_row_and_rejects_second_in_single_mode() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());

        settle(&mut search, "char", start);
        search
            .handle(SearchEvent::Key(NavKey::Down), start)
            .expect("down");
        assert_eq!(search.focus(), Some(0));
        let effects = search
            .handle(SearchEvent::Key(NavKey::Enter), start)
            .expect("enter");
        assert!(effects.contains(&Effect::SelectionChanged {
            item: Item::from("Charmander"),
            previous: false,
        }));
        assert_eq!(search.selected_count(), 1);

        settle(&mut search, "b", start + Duration::from_secs(1));
        search
            .handle(SearchEvent::Key(NavKey::Down), start)
            .expect("down");
        let effects = search
            .handle(SearchEvent::Key(NavKey::Enter), start)
            .expect("enter");
        assert!(effects.contains(&Effect::SelectionRejected(
            SelectionError::SingleSelection {
                held: Item::from("Charmander"),
                attempted: Item::from("Bulbasaur"),
            }
        )));
        assert!(!search.is_selected("Bulbasaur"));
        assert_eq!(search.selected_count(), 1);
    }

    #[test]
    fn enter_without_focus_is_noop() {
        let mut search = controller(SearchConfig::default());
        settle(&mut search, "a", Instant::now());
        let effects = search
            .handle(SearchEvent::Key(NavKey::Enter), Instant::now())
            .expect("enter");
        assert!(effects.is_empty());
        assert_eq!(search.selected_count(), 0);
    }

    #[test]
    fn new_input_resets_focus() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());
        settle(&mut search, "r", start);
        search
            .handle(SearchEvent::Key(NavKey::Up), start)
            .expect("up");
        assert_eq!(search.focus(), Some(search.results().len() - 1));

        search
            .handle(SearchEvent::Input("rt".to_string()), start)
            .expect("input");
        assert_eq!(search.focus(), None);
    }

    #[test]
    fn escape_reset_clears_results_but_keeps_selection() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default().with_multiple(true));
        settle(&mut search, "squ", start);
        search.handle(SearchEvent::Click(0), start).expect("click");

        let effects = search
            .handle(SearchEvent::Key(NavKey::Escape), start)
            .expect("escape");
        assert!(effects.contains(&Effect::StopTracking));
        assert!(effects.contains(&Effect::QueryChanged(String::new())));
        assert_eq!(search.query(), "");
        assert!(search.results().is_empty());
        assert!(!search.is_open());
        assert!(search.is_selected("Squirtle"));
        assert_eq!(search.selected_count(), 1);
    }

    #[test]
    fn escape_reset_cancels_pending_debounce() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());
        search
            .handle(SearchEvent::Input("pika".to_string()), start)
            .expect("input");
        search
            .handle(SearchEvent::Key(NavKey::Escape), start)
            .expect("escape");
        assert!(search.tick(start + DELAY).expect("tick").is_empty());
        assert_eq!(search.searched_term(), "");
        assert!(!search.is_searching());
    }

    #[test]
    fn escape_close_only_keeps_query_until_refocus() {
        let start = Instant::now();
        let mut search =
            controller(SearchConfig::default().with_escape(EscapePolicy::CloseOnly));
        settle(&mut search, "bulb", start);

        search
            .handle(SearchEvent::Key(NavKey::Escape), start)
            .expect("escape");
        assert!(!search.is_open());
        assert_eq!(search.query(), "bulb");
        assert_eq!(search.results().len(), 1);

        let effects = search.handle(SearchEvent::Focus, start).expect("focus");
        assert!(effects.contains(&Effect::StartTracking));
        assert!(search.is_open());
    }

    #[test]
    fn blur_closes_and_focus_with_content_reopens() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());
        settle(&mut search, "saur", start);
        assert!(search.is_open());

        search.handle(SearchEvent::Blur, start).expect("blur");
        assert!(!search.is_open());
        assert!(search.rows().is_empty());

        search.handle(SearchEvent::Focus, start).expect("focus");
        assert!(search.is_open());
    }

    #[test]
    fn empty_results_follow_policy() {
        let start = Instant::now();
        let mut keep = controller(SearchConfig::default());
        settle(&mut keep, "zzz", start);
        assert!(keep.is_open());
        assert!(keep.rows().is_empty());

        let mut close =
            controller(SearchConfig::default().with_empty_results(EmptyResultPolicy::Close));
        settle(&mut close, "zzz", start);
        assert!(!close.is_open());
    }

    #[test]
    fn disabled_ignores_input_but_keeps_state() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());
        settle(&mut search, "char", start);
        search.handle(SearchEvent::Click(0), start).expect("click");

        search.set_disabled(true);
        let effects = search
            .handle(SearchEvent::Input("squ".to_string()), start)
            .expect("input");
        assert!(effects.is_empty());
        assert_eq!(search.query(), "char");
        assert!(search.is_selected("Charmander"));
        assert_eq!(search.rows().len(), 1);
    }

    #[test]
    fn hover_sets_focus_and_leave_clears_it() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());
        settle(&mut search, "a", start);

        search.handle(SearchEvent::Hover(1), start).expect("hover");
        let rows = search.rows();
        assert!(rows[1].is_focused);
        assert!(!rows[0].is_focused);

        search.handle(SearchEvent::Leave, start).expect("leave");
        assert_eq!(search.focus(), None);
    }

    #[test]
    fn remove_deselects_outside_panel() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());
        settle(&mut search, "bulb", start);
        search.handle(SearchEvent::Click(0), start).expect("click");
        search.handle(SearchEvent::Blur, start).expect("blur");

        let effects = search
            .handle(SearchEvent::Remove(Item::from("Bulbasaur")), start)
            .expect("remove");
        assert!(effects.contains(&Effect::SelectionChanged {
            item: Item::from("Bulbasaur"),
            previous: true,
        }));
        assert_eq!(search.selected_count(), 0);
    }

    #[test]
    fn set_items_prunes_selection_and_refilters() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default().with_multiple(true));
        settle(&mut search, "r", start);
        search.handle(SearchEvent::Click(0), start).expect("click");
        search.handle(SearchEvent::Click(1), start).expect("click");
        assert_eq!(search.selected_count(), 2);

        let effects = search
            .set_items(items_from_strings(["Charmander", "Charmeleon"]))
            .expect("set items");
        assert!(effects.contains(&Effect::SelectionChanged {
            item: Item::from("Bulbasaur"),
            previous: true,
        }));
        assert_eq!(search.selected_count(), 1);
        assert!(search.is_selected("Charmander"));
        assert_eq!(
            search.results(),
            items_from_strings(["Charmander", "Charmeleon"]).as_slice()
        );
    }

    #[test]
    fn filter_errors_propagate_and_clear_searching() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default().with_filter(FilterStrategy::Regex));
        search
            .handle(SearchEvent::Input("(".to_string()), start)
            .expect("input");
        let err = search.tick(start + DELAY).expect_err("invalid regex");
        assert!(matches!(
            err,
            SearchError::Filter(FilterError::InvalidPattern { .. })
        ));
        assert!(!search.is_searching());
    }

    #[test]
    fn failed_filter_keeps_previous_search() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default().with_filter(FilterStrategy::Regex));
        settle(&mut search, "char", start);

        let later = start + Duration::from_secs(1);
        search
            .handle(SearchEvent::Input("char(".to_string()), later)
            .expect("input");
        search.tick(later + DELAY).expect_err("invalid regex");
        assert_eq!(search.query(), "char(");
        assert_eq!(search.searched_term(), "char");
        assert_eq!(search.results(), items_from_strings(["Charmander"]).as_slice());
        assert!(search.is_open());
        assert_eq!(search.deadline(), None);
    }

    struct RejectsShortLists;

    impl FilterOptions for RejectsShortLists {
        fn filter(
            &self,
            items: &[Item],
            query: &str,
        ) -> std::result::Result<Vec<Item>, FilterError> {
            if items.len() < 2 {
                return Err(FilterError::custom("item list too short"));
            }
            Ok(crate::core::filter::substring_filter(items, query))
        }
    }

    #[test]
    fn set_items_failure_leaves_items_and_selection() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default()).with_filter(RejectsShortLists);
        settle(&mut search, "a", start);
        search.handle(SearchEvent::Click(0), start).expect("click");
        assert!(search.is_selected("Bulbasaur"));
        let results = search.results().to_vec();

        let err = search
            .set_items(items_from_strings(["Charmander"]))
            .expect_err("filter rejects");
        assert!(matches!(err, SearchError::Filter(FilterError::Custom(_))));
        assert!(search.is_selected("Bulbasaur"));
        assert_eq!(search.selected_count(), 1);
        assert_eq!(search.items(), starters().as_slice());
        assert_eq!(search.results(), results.as_slice());
    }

    #[test]
    fn unmount_cancels_debounce_and_stops_tracking() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default());
        settle(&mut search, "a", start);
        search
            .handle(SearchEvent::Input("ab".to_string()), start)
            .expect("input");

        let effects = search.unmount();
        assert_eq!(effects, vec![Effect::StopTracking]);
        assert_eq!(search.deadline(), None);
        assert!(search.tick(start + DELAY).expect("tick").is_empty());
    }

    #[test]
    fn switching_to_single_drops_extra_selections() {
        let start = Instant::now();
        let mut search = controller(SearchConfig::default().with_multiple(true));
        settle(&mut search, "r", start);
        search.handle(SearchEvent::Click(0), start).expect("click");
        search.handle(SearchEvent::Click(1), start).expect("click");

        let effects = search.set_multiple(false);
        assert_eq!(search.mode(), SelectMode::Single);
        assert_eq!(search.selected_count(), 1);
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::SelectionChanged { previous: true, .. }
        )));
    }
}
