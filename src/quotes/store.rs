//! Directory-backed quote store.
//!
//! Each regular file in the directory is one quote list named after its file
//! stem, one quote per line. Files are read concurrently in a background
//! task; each list is published as soon as its file has been read.

use super::{Quote, QuoteError, QuoteProvider};
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

type QuoteMap = DashMap<String, Arc<Vec<String>>>;

/// Quote lists read from one directory, published as each file loads.
///
/// Lookups never wait on the loader; a list is "not loaded" until its file
/// has been read in full.
pub struct QuoteStore {
    dir: PathBuf,
    quotes: Arc<QuoteMap>,
    loader: Mutex<Option<JoinHandle<()>>>,
}

impl QuoteStore {
    /// A store over `dir`. Nothing is read until [`load_all`](QuoteProvider::load_all).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quotes: Arc::new(DashMap::new()),
            loader: Mutex::new(None),
        }
    }

    /// Whether the background loader is still running.
    pub fn is_loading(&self) -> bool {
        self.loader
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn list(&self, name: &str) -> Result<Arc<Vec<String>>, QuoteError> {
        self.quotes
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                debug!(name = %name, "Quotes not loaded");
                QuoteError::NotLoaded(name.to_string())
            })
    }
}

impl QuoteProvider for QuoteStore {
    fn load_all(&self) {
        let mut loader = self.loader.lock();
        if loader.is_some() {
            debug!("Quote loading already started");
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, quotes will not be loaded");
            return;
        };

        info!(dir = %self.dir.display(), "Loading quotes");
        let dir = self.dir.clone();
        let quotes = Arc::clone(&self.quotes);
        *loader = Some(runtime.spawn(load_dir(dir, quotes)));
    }

    fn is_loaded(&self, name: &str) -> bool {
        self.quotes.contains_key(name)
    }

    fn list_loaded(&self) -> Vec<String> {
        let mut names: Vec<String> = self.quotes.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn random_quote(&self, name: &str) -> Result<Quote, QuoteError> {
        let list = self.list(name)?;
        if list.is_empty() {
            return Err(QuoteError::Empty(name.to_string()));
        }
        let index = rand::thread_rng().gen_range(0..list.len());
        Ok(Quote {
            index: index + 1,
            text: list[index].clone(),
        })
    }

    fn quote_at(&self, name: &str, index: usize) -> Result<Quote, QuoteError> {
        let list = self.list(name)?;
        index
            .checked_sub(1)
            .and_then(|i| list.get(i))
            .map(|text| Quote {
                index,
                text: text.clone(),
            })
            .ok_or_else(|| QuoteError::IndexOutOfRange {
                name: name.to_string(),
                index,
            })
    }

    fn cancel(&self) {
        if !self.is_loading() {
            return;
        }
        info!("Cancelling quote loading");
        // Aborting the walker drops its JoinSet, which aborts every file task.
        if let Some(handle) = self.loader.lock().as_ref() {
            handle.abort();
        }
    }
}

async fn load_dir(dir: PathBuf, quotes: Arc<QuoteMap>) {
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Quote directory not readable");
            return;
        }
    };

    let mut files = JoinSet::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to list quote directory");
                break;
            }
        };
        if !entry.file_type().await.is_ok_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if quotes.contains_key(&name) {
            debug!(name = %name, "Quotes already loaded");
            continue;
        }
        files.spawn(load_file(path, name, Arc::clone(&quotes)));
    }

    if files.is_empty() {
        info!(dir = %dir.display(), "No quote files to load");
    }
    while let Some(result) = files.join_next().await {
        if let Err(e) = result {
            warn!(error = %e, "Quote loader task failed");
        }
    }
}

async fn load_file(path: PathBuf, name: String, quotes: Arc<QuoteMap>) {
    match read_quotes(&path).await {
        Ok(list) => {
            info!(name = %name, count = list.len(), "Loaded quotes");
            quotes.entry(name).or_insert_with(|| Arc::new(list));
        }
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to read quote file"),
    }
}

async fn read_quotes(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = tokio::fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn settle(store: &QuoteStore) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while store.is_loading() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("quote loading did not finish");
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bash.txt"), "first\n\nsecond\r\nthird\n").unwrap();
        std::fs::write(dir.path().join("fortune.txt"), "only one\n").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_all_publishes_each_file() {
        let dir = fixture();
        let store = QuoteStore::new(dir.path());
        store.load_all();
        settle(&store).await;

        assert!(store.is_loaded("bash"));
        assert!(store.is_loaded("fortune"));
        assert!(!store.is_loaded("nested"));
        assert_eq!(store.list_loaded(), vec!["bash", "fortune"]);
    }

    #[tokio::test]
    async fn test_blank_lines_skipped() {
        let dir = fixture();
        let store = QuoteStore::new(dir.path());
        store.load_all();
        settle(&store).await;

        assert_eq!(store.quote_at("bash", 2).unwrap().to_string(), "2. second");
        assert_eq!(store.quote_at("bash", 3).unwrap().text, "third");
    }

    #[tokio::test]
    async fn test_quote_at_out_of_range() {
        let dir = fixture();
        let store = QuoteStore::new(dir.path());
        store.load_all();
        settle(&store).await;

        assert!(matches!(
            store.quote_at("bash", 0),
            Err(QuoteError::IndexOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            store.quote_at("bash", 4),
            Err(QuoteError::IndexOutOfRange { index: 4, .. })
        ));
        assert_eq!(
            store.quote_at("missing", 1),
            Err(QuoteError::NotLoaded("missing".into()))
        );
    }

    #[tokio::test]
    async fn test_random_quote_covers_whole_list() {
        let dir = fixture();
        let store = QuoteStore::new(dir.path());
        store.load_all();
        settle(&store).await;

        assert_eq!(store.random_quote("fortune").unwrap().to_string(), "1. only one");

        let mut seen = [false; 3];
        for _ in 0..500 {
            let quote = store.random_quote("bash").unwrap();
            seen[quote.index - 1] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[tokio::test]
    async fn test_missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuoteStore::new(dir.path().join("absent"));
        store.load_all();
        settle(&store).await;

        assert!(store.list_loaded().is_empty());
        assert!(matches!(
            store.random_quote("bash"),
            Err(QuoteError::NotLoaded(_))
        ));
    }

    #[tokio::test]
    async fn test_load_all_runs_once() {
        let dir = fixture();
        let store = QuoteStore::new(dir.path());
        store.load_all();
        settle(&store).await;

        std::fs::write(dir.path().join("late.txt"), "late\n").unwrap();
        store.load_all();
        settle(&store).await;
        assert!(!store.is_loaded("late"));
    }

    #[tokio::test]
    async fn test_cancel_stops_loader() {
        let dir = fixture();
        let store = QuoteStore::new(dir.path());
        store.load_all();
        // Current-thread runtime: the loader has not been polled yet.
        store.cancel();
        settle(&store).await;

        assert!(!store.is_loading());
        assert!(!store.is_loaded("bash"));
        assert!(store.list_loaded().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_keeps_published_lists() {
        let dir = fixture();
        let store = QuoteStore::new(dir.path());
        store.load_all();
        settle(&store).await;

        store.cancel();
        assert_eq!(store.list_loaded(), vec!["bash", "fortune"]);
    }

    #[test]
    fn test_load_all_without_runtime_is_noop() {
        let store = QuoteStore::new("quotes");
        store.load_all();
        assert!(!store.is_loading());
        assert!(store.list_loaded().is_empty());
    }
}
