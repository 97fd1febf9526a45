//! References to host-owned sample buffers.
//!
//! Buffer parameters name an array that lives in the host's own storage.
//! The adapter never owns that memory: it resolves names against a
//! [`BufferStore`] supplied by the host and hands clients a [`BufferRef`]
//! that reads and writes through the store on demand.

use std::fmt;
use std::sync::Arc;

use crate::atom::Symbol;
use crate::types::Sample;

/// Host buffer storage collaborator.
///
/// Implemented by the host bridge. All methods are called from the message
/// context only (offline processing or parameter setters), never from the
/// audio-block path.
pub trait BufferStore: Send + Sync {
    /// Returns true if a buffer with this name currently exists.
    fn contains(&self, name: &str) -> bool;

    /// Number of frames in the named buffer.
    fn frames(&self, name: &str) -> Option<usize>;

    /// Number of channels in the named buffer.
    fn channels(&self, name: &str) -> Option<usize>;

    /// Copy one channel of the named buffer.
    fn read(&self, name: &str, channel: usize) -> Option<Vec<Sample>>;

    /// Overwrite one channel of the named buffer, resizing if needed.
    ///
    /// Returns false if the buffer does not exist.
    fn write(&self, name: &str, channel: usize, data: &[Sample]) -> bool;
}

/// A named reference to a host buffer.
///
/// Equality compares names only; two references to the same name are the
/// same parameter value regardless of which store resolved them.
#[derive(Clone)]
pub struct BufferRef {
    name: Symbol,
    store: Option<Arc<dyn BufferStore>>,
}

impl BufferRef {
    /// Create a reference resolved against `store`.
    pub fn new(name: Symbol, store: Option<Arc<dyn BufferStore>>) -> Self {
        Self { name, store }
    }

    /// Name of the referenced buffer.
    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    /// Returns true if the referenced buffer currently exists in host storage.
    pub fn exists(&self) -> bool {
        self.store
            .as_ref()
            .is_some_and(|store| store.contains(self.name.as_str()))
    }

    pub fn frames(&self) -> Option<usize> {
        self.store.as_ref()?.frames(self.name.as_str())
    }

    pub fn channels(&self) -> Option<usize> {
        self.store.as_ref()?.channels(self.name.as_str())
    }

    /// Copy one channel out of host storage.
    pub fn read(&self, channel: usize) -> Option<Vec<Sample>> {
        self.store.as_ref()?.read(self.name.as_str(), channel)
    }

    /// Write one channel into host storage.
    pub fn write(&self, channel: usize, data: &[Sample]) -> bool {
        self.store
            .as_ref()
            .is_some_and(|store| store.write(self.name.as_str(), channel, data))
    }
}

impl PartialEq for BufferRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for BufferRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferRef")
            .field("name", &self.name)
            .field("resolved", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        buffers: Mutex<HashMap<String, Vec<Vec<Sample>>>>,
    }

    impl BufferStore for MemoryStore {
        fn contains(&self, name: &str) -> bool {
            self.buffers.lock().unwrap().contains_key(name)
        }

        fn frames(&self, name: &str) -> Option<usize> {
            self.buffers.lock().unwrap().get(name).map(|b| b[0].len())
        }

        fn channels(&self, name: &str) -> Option<usize> {
            self.buffers.lock().unwrap().get(name).map(|b| b.len())
        }

        fn read(&self, name: &str, channel: usize) -> Option<Vec<Sample>> {
            self.buffers.lock().unwrap().get(name)?.get(channel).cloned()
        }

        fn write(&self, name: &str, channel: usize, data: &[Sample]) -> bool {
            match self.buffers.lock().unwrap().get_mut(name) {
                Some(b) if channel < b.len() => {
                    b[channel] = data.to_vec();
                    true
                }
                _ => false,
            }
        }
    }

    #[test]
    fn test_read_write_through_store() {
        let store = Arc::new(MemoryStore::default());
        store
            .buffers
            .lock()
            .unwrap()
            .insert("src".to_string(), vec![vec![0.0; 4]]);

        let buf = BufferRef::new(Symbol::new("src"), Some(store));
        assert!(buf.exists());
        assert_eq!(buf.frames(), Some(4));
        assert!(buf.write(0, &[1.0, 2.0]));
        assert_eq!(buf.read(0), Some(vec![1.0, 2.0]));
        assert!(!buf.write(1, &[1.0]));
    }

    #[test]
    fn test_unresolved_reference() {
        let buf = BufferRef::new(Symbol::new("missing"), None);
        assert!(!buf.exists());
        assert_eq!(buf.read(0), None);
        assert!(!buf.write(0, &[0.0]));
    }

    #[test]
    fn test_equality_by_name() {
        let a = BufferRef::new(Symbol::new("x"), None);
        let b = BufferRef::new(Symbol::new("x"), Some(Arc::new(MemoryStore::default())));
        assert_eq!(a, b);
    }
}
