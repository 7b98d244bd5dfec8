use crate::core::error::ConfigError;
use crate::core::filter::FilterStrategy;
use crate::core::item::Item;
use crate::core::selection::SelectMode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What Escape clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapePolicy {
    /// Clear the query, drop results and close the panel.
    #[default]
    Reset,
    /// Close the panel and keep the query.
    CloseOnly,
}

/// Panel behaviour when a query matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResultPolicy {
    /// Keep the panel open with a "no results" row.
    #[default]
    KeepOpen,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub multiple: bool,
    pub disabled: bool,
    /// `true` selects [`DEFAULT_DEBOUNCE`], `false` settles every keystroke.
    pub debounced: bool,
    /// Overrides `debounced` when set.
    pub debounce_ms: Option<u64>,
    pub filter: FilterStrategy,
    pub escape: EscapePolicy,
    pub empty_results: EmptyResultPolicy,
    pub max_visible: usize,
    pub label: String,
    pub placeholder: String,
    pub description: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            disabled: false,
            debounced: true,
            debounce_ms: None,
            filter: FilterStrategy::default(),
            escape: EscapePolicy::default(),
            empty_results: EmptyResultPolicy::default(),
            max_visible: 8,
            label: "Search".to_string(),
            placeholder: "Type to begin searching".to_string(),
            description: String::new(),
        }
    }
}

impl SearchConfig {
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_debounced(mut self, debounced: bool) -> Self {
        self.debounced = debounced;
        self.debounce_ms = None;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = Some(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_filter(mut self, filter: FilterStrategy) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    pub fn with_empty_results(mut self, policy: EmptyResultPolicy) -> Self {
        self.empty_results = policy;
        self
    }

    pub fn debounce_delay(&self) -> Duration {
        match self.debounce_ms {
            Some(ms) => Duration::from_millis(ms),
            None if self.debounced => DEFAULT_DEBOUNCE,
            None => Duration::ZERO,
        }
    }

    pub fn select_mode(&self) -> SelectMode {
        SelectMode::from_multiple(self.multiple)
    }

    /// Loads a config file, picking YAML or JSON by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_structured(path)
    }
}

/// Loads an item list: a YAML or JSON array of strings.
pub fn load_items(path: &Path) -> Result<Vec<Item>, ConfigError> {
    load_structured(path)
}

fn load_structured<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
        path: path.to_path_buf(),
        error,
    })?;

    match format {
        Format::Yaml => serde_yaml::from_str(&text).map_err(|error| ConfigError::Yaml {
            path: path.to_path_buf(),
            error,
        }),
        Format::Json => serde_json::from_str(&text).map_err(|error| ConfigError::Json {
            path: path.to_path_buf(),
            error,
        }),
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
