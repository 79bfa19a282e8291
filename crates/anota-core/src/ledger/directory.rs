//! Directory implementations: the process-wide cache and an in-memory map.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::models::record::LedgerLocation;

use super::{LedgerDirectory, Result};

/// Read-through cache in front of a slower directory.
///
/// Entries are filled on the first successful resolution of a chat,
/// written through on registration and never evicted. Misses are not
/// cached, so a chat registered elsewhere is picked up on its next message.
pub struct CachedDirectory<D> {
    inner: D,
    cache: RwLock<HashMap<String, LedgerLocation>>,
}

impl<D: LedgerDirectory> CachedDirectory<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached chats.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    fn cached(&self, chat_id: &str) -> Option<LedgerLocation> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(chat_id)
            .cloned()
    }

    fn remember(&self, chat_id: &str, location: LedgerLocation) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chat_id.to_string(), location);
    }
}

impl<D: LedgerDirectory> LedgerDirectory for CachedDirectory<D> {
    fn resolve(&self, chat_id: &str) -> Result<Option<LedgerLocation>> {
        if let Some(location) = self.cached(chat_id) {
            return Ok(Some(location));
        }

        let resolved = self.inner.resolve(chat_id)?;
        if let Some(location) = &resolved {
            debug!("caching ledger location for chat {}", chat_id);
            self.remember(chat_id, location.clone());
        }
        Ok(resolved)
    }

    fn register(&self, chat_id: &str, location: LedgerLocation) -> Result<()> {
        self.inner.register(chat_id, location.clone())?;
        self.remember(chat_id, location);
        Ok(())
    }
}

/// Directory held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    entries: RwLock<HashMap<String, LedgerLocation>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing assignments.
    pub fn from_entries(entries: HashMap<String, LedgerLocation>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Copy of every assignment.
    pub fn entries(&self) -> HashMap<String, LedgerLocation> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LedgerDirectory for MemoryDirectory {
    fn resolve(&self, chat_id: &str) -> Result<Option<LedgerLocation>> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(chat_id)
            .cloned())
    }

    fn register(&self, chat_id: &str, location: LedgerLocation) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chat_id.to_string(), location);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollaboratorError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// Counts lookups reaching the backing directory.
    #[derive(Default)]
    struct CountingDirectory {
        inner: MemoryDirectory,
        lookups: AtomicUsize,
        fail: bool,
    }

    impl LedgerDirectory for CountingDirectory {
        fn resolve(&self, chat_id: &str) -> Result<Option<LedgerLocation>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CollaboratorError::backend(503, "directory offline"));
            }
            self.inner.resolve(chat_id)
        }

        fn register(&self, chat_id: &str, location: LedgerLocation) -> Result<()> {
            self.inner.register(chat_id, location)
        }
    }

    fn location() -> LedgerLocation {
        LedgerLocation::new("/Financas/2024.xlsx", "Lancamentos", "Tabela1")
    }

    #[test]
    fn test_resolves_once_per_chat() {
        let backing = CountingDirectory::default();
        backing.inner.register("42", location()).unwrap();
        let directory = CachedDirectory::new(backing);

        assert_eq!(directory.resolve("42").unwrap(), Some(location()));
        assert_eq!(directory.resolve("42").unwrap(), Some(location()));
        assert_eq!(directory.inner().lookups.load(Ordering::SeqCst), 1);
        assert_eq!(directory.cached_len(), 1);
    }

    #[test]
    fn test_misses_are_not_cached() {
        let directory = CachedDirectory::new(CountingDirectory::default());
        assert_eq!(directory.resolve("7").unwrap(), None);
        assert_eq!(directory.resolve("7").unwrap(), None);
        assert_eq!(directory.inner().lookups.load(Ordering::SeqCst), 2);
        assert_eq!(directory.cached_len(), 0);
    }

    #[test]
    fn test_register_writes_through() {
        let directory = CachedDirectory::new(CountingDirectory::default());
        directory.register("9", location()).unwrap();

        assert_eq!(directory.resolve("9").unwrap(), Some(location()));
        assert_eq!(directory.inner().lookups.load(Ordering::SeqCst), 0);
        assert_eq!(directory.inner().inner.resolve("9").unwrap(), Some(location()));
    }

    #[test]
    fn test_backend_errors_propagate() {
        let directory = CachedDirectory::new(CountingDirectory {
            fail: true,
            ..Default::default()
        });
        assert!(matches!(
            directory.resolve("1"),
            Err(CollaboratorError::Backend { code: 503, .. })
        ));
    }

    #[test]
    fn test_concurrent_access() {
        let directory = Arc::new(CachedDirectory::new(MemoryDirectory::new()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let directory = Arc::clone(&directory);
                thread::spawn(move || {
                    let chat = format!("chat-{}", i % 4);
                    directory.register(&chat, location()).unwrap();
                    directory.resolve(&chat).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(location()));
        }
        assert_eq!(directory.cached_len(), 4);
    }
}
