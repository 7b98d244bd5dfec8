pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod event;
pub mod filter;
pub mod focus;
pub mod item;
pub mod panel;
pub mod selection;

pub use config::{EmptyResultPolicy, EscapePolicy, SearchConfig};
pub use controller::{Row, SearchController};
pub use error::{ConfigError, FilterError, SearchError, SelectionError};
pub use event::{Effect, SearchEvent};
pub use filter::{FilterOptions, FilterStrategy};
pub use focus::NavKey;
pub use item::Item;
pub use selection::{SelectMode, Toggle};
