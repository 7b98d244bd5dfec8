use crate::core::error::ConfigError;
use crate::core::item::Item;
use std::sync::mpsc::{self, Receiver, TryRecvError};

pub type LoadResult = Result<Vec<Item>, ConfigError>;

/// Produces the item set on a worker thread while the runtime keeps
/// drawing.
pub struct ItemLoader {
    rx: Receiver<LoadResult>,
}

impl ItemLoader {
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(load());
        });
        Self { rx }
    }

    /// The finished load, once. `None` while still running. A worker that
    /// died without sending reports [`ConfigError::LoaderStopped`].
    pub fn try_take(&self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ConfigError::LoaderStopped)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::items_from_strings;
    use std::time::{Duration, Instant};

    fn wait(loader: &ItemLoader) -> LoadResult {
        let started = Instant::now();
        loop {
            if let Some(result) = loader.try_take() {
                return result;
            }
            assert!(started.elapsed() < Duration::from_secs(5), "loader stalled");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn delivers_loaded_items() {
        let loader = ItemLoader::spawn(|| Ok(items_from_strings(["Mew", "Mewtwo"])));
        assert_eq!(wait(&loader).expect("loaded").len(), 2);
    }

    #[test]
    fn panicked_loader_reports_stopped() {
        let loader = ItemLoader::spawn(|| -> LoadResult { panic!("item source unreadable") });
        assert!(matches!(wait(&loader), Err(ConfigError::LoaderStopped)));
    }
}
