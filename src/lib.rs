pub mod core;
pub mod runtime;
pub mod sample;
pub mod terminal;
pub mod ui;

pub use crate::core::{
    Effect, FilterOptions, FilterStrategy, Item, NavKey, SearchConfig, SearchController,
    SearchError, SearchEvent, SelectMode,
};
pub use crate::runtime::Runtime;
