use crate::core::error::SelectionError;
use crate::core::item::Item;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    #[default]
    Single,
    Multiple,
}

impl SelectMode {
    pub fn from_multiple(multiple: bool) -> Self {
        if multiple {
            Self::Multiple
        } else {
            Self::Single
        }
    }
}

/// Result of an accepted toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
}

impl Toggle {
    /// Whether the item was selected before the toggle.
    pub fn was_selected(self) -> bool {
        matches!(self, Self::Deselected)
    }
}

/// Selected items in selection order, with a count kept in step.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    mode: SelectMode,
    selected: IndexSet<Item>,
    count: usize,
}

impl SelectionSet {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            selected: IndexSet::new(),
            count: 0,
        }
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_selected(&self, item: &str) -> bool {
        self.selected.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.selected.iter()
    }

    /// Flips `item`. In single mode, selecting while a different item is
    /// held is rejected and leaves the set untouched.
    pub fn toggle(&mut self, item: &Item) -> Result<Toggle, SelectionError> {
        let outcome = if self.selected.shift_remove(item.as_str()) {
            self.count -= 1;
            Toggle::Deselected
        } else if self.mode == SelectMode::Single
            && let Some(held) = self.selected.first()
        {
            return Err(SelectionError::SingleSelection {
                held: held.clone(),
                attempted: item.clone(),
            });
        } else {
            self.selected.insert(item.clone());
            self.count += 1;
            Toggle::Selected
        };

        debug_assert_eq!(self.count, self.selected.len());
        Ok(outcome)
    }

    /// Removes `item` if selected. Deselection is always allowed.
    pub fn deselect(&mut self, item: &str) -> bool {
        if !self.selected.shift_remove(item) {
            return false;
        }
        self.count -= 1;
        true
    }

    /// Switches policy. Moving to single mode keeps only the earliest
    /// selected item and returns the ones dropped.
    pub fn set_mode(&mut self, mode: SelectMode) -> Vec<Item> {
        self.mode = mode;
        if mode == SelectMode::Multiple || self.selected.len() <= 1 {
            return Vec::new();
        }

        let dropped: Vec<Item> = self.selected.drain(1..).collect();
        self.count -= dropped.len();
        dropped
    }

    /// Drops selections that are no longer in `items`, returning them.
    pub fn retain_present(&mut self, items: &[Item]) -> Vec<Item> {
        let present: HashSet<&str> = items.iter().map(Item::as_str).collect();
        let dropped: Vec<Item> = self
            .selected
            .iter()
            .filter(|item| !present.contains(item.as_str()))
            .cloned()
            .collect();
        if dropped.is_empty() {
            return dropped;
        }

        self.selected.retain(|item| present.contains(item.as_str()));
        self.count -= dropped.len();
        dropped
    }
}
