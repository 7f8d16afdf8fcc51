//! The chapter lookup table and the cache that loads it once.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use super::names::{index_keys, lookup_candidates};
use crate::provider::{ChapterInfo, ProviderError, VerseDataProvider};

/// How long a caller waits for the chapter list to arrive.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Maps normalized chapter names to chapter numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterIndex {
    by_key: HashMap<String, u16>,
}

impl ChapterIndex {
    /// Builds the index from a provider's chapter list.
    ///
    /// Every chapter's lowercased canonical name is registered before any
    /// variant, and a variant never displaces an earlier key.
    pub fn from_chapters(chapters: &[ChapterInfo]) -> Self {
        let mut by_key = HashMap::new();
        let keyed: Vec<(u16, Vec<String>)> = chapters
            .iter()
            .map(|c| (c.number, index_keys(&c.name)))
            .collect();

        for (number, keys) in &keyed {
            if let Some(canonical) = keys.first() {
                by_key.insert(canonical.clone(), *number);
            }
        }
        for (number, keys) in &keyed {
            for key in keys.iter().skip(1) {
                by_key.entry(key.clone()).or_insert(*number);
            }
        }

        Self { by_key }
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Exact key lookup, no normalization.
    pub fn get(&self, key: &str) -> Option<u16> {
        self.by_key.get(key).copied()
    }

    /// Looks a user-typed chapter name up; the first candidate that hits wins.
    pub fn lookup(&self, name: &str) -> Option<u16> {
        lookup_candidates(name)
            .iter()
            .find_map(|candidate| self.get(candidate))
    }
}

#[derive(Debug)]
enum CacheState {
    Empty,
    Loading { generation: u64 },
    Ready(Arc<ChapterIndex>),
}

#[derive(Debug)]
struct CacheInner {
    state: CacheState,
    next_generation: u64,
}

/// State shared with the thread running a fetch.
#[derive(Debug)]
struct Shared {
    inner: Mutex<CacheInner>,
    settled: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the outcome of fetch `generation` and wakes every waiter.
    fn settle(&self, generation: u64, fetched: Result<Vec<ChapterInfo>, ProviderError>) {
        let mut inner = self.lock();
        inner.state = match fetched {
            Ok(chapters) if chapters.is_empty() => {
                log::warn!("chapter list is empty, not caching it");
                CacheState::Empty
            }
            Ok(chapters) => {
                let index = ChapterIndex::from_chapters(&chapters);
                log::debug!(
                    "chapter index ready (generation {generation}): {} chapters, {} keys",
                    chapters.len(),
                    index.len()
                );
                CacheState::Ready(Arc::new(index))
            }
            Err(err) => {
                log::warn!("chapter list fetch failed: {err}");
                CacheState::Empty
            }
        };
        drop(inner);
        self.settled.notify_all();
    }
}

/// Loads the [`ChapterIndex`] from a provider on first use and keeps it.
///
/// Concurrent callers share a single fetch, which runs on its own thread so
/// that every caller, the one that started it included, waits at most the
/// configured timeout. A fetch that outlives its callers still fills the
/// cache when it lands. A failed fetch is not cached: everyone waiting on it
/// gets `None` and the next call tries again.
#[derive(Debug)]
pub struct ChapterIndexCache<P> {
    provider: Arc<P>,
    shared: Arc<Shared>,
    wait_timeout: Duration,
}

impl<P: VerseDataProvider + Send + Sync + 'static> ChapterIndexCache<P> {
    pub fn new(provider: P) -> Self {
        Self::with_state(provider, CacheState::Empty)
    }

    /// A cache that already holds `index` and never calls the provider for
    /// chapters.
    pub fn with_index(provider: P, index: ChapterIndex) -> Self {
        Self::with_state(provider, CacheState::Ready(Arc::new(index)))
    }

    fn with_state(provider: P, state: CacheState) -> Self {
        Self {
            provider: Arc::new(provider),
            shared: Arc::new(Shared {
                inner: Mutex::new(CacheInner {
                    state,
                    next_generation: 0,
                }),
                settled: Condvar::new(),
            }),
            wait_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Sets how long a caller waits for the chapter list to arrive.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.shared.lock().state, CacheState::Ready(_))
    }

    /// Returns the index, fetching it if nobody has yet.
    pub fn index(&self) -> Option<Arc<ChapterIndex>> {
        let mut inner = self.shared.lock();
        if let CacheState::Ready(index) = &inner.state {
            return Some(Arc::clone(index));
        }
        let generation = match inner.state {
            CacheState::Loading { generation } => generation,
            _ => {
                let generation = inner.next_generation;
                inner.next_generation += 1;
                if let Err(err) = self.spawn_fetch(generation) {
                    log::warn!("could not start chapter list fetch: {err}");
                    return None;
                }
                inner.state = CacheState::Loading { generation };
                generation
            }
        };
        self.wait_for(inner, generation)
    }

    fn spawn_fetch(&self, generation: u64) -> std::io::Result<()> {
        log::debug!("fetching chapter list (generation {generation})");
        let provider = Arc::clone(&self.provider);
        let shared = Arc::clone(&self.shared);
        thread::Builder::new()
            .name("chapter-fetch".to_string())
            .spawn(move || shared.settle(generation, provider.chapters()))?;
        Ok(())
    }

    fn wait_for(
        &self,
        guard: MutexGuard<'_, CacheInner>,
        generation: u64,
    ) -> Option<Arc<ChapterIndex>> {
        let (inner, waited) = self
            .shared
            .settled
            .wait_timeout_while(guard, self.wait_timeout, |inner| {
                matches!(inner.state, CacheState::Loading { generation: g } if g == generation)
            })
            .unwrap_or_else(PoisonError::into_inner);

        if waited.timed_out() {
            log::warn!(
                "gave up waiting for chapter list after {:?}",
                self.wait_timeout
            );
            return None;
        }
        match &inner.state {
            CacheState::Ready(index) => Some(Arc::clone(index)),
            _ => None,
        }
    }
}
