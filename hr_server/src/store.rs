//! In-memory hand storage.
//!
//! Hands are loaded once at startup from a directory of `.phh` files and
//! served read-only after that; a file that fails to parse is logged and
//! skipped rather than taking the whole directory down.

use std::collections::BTreeMap;
use std::path::Path;

use hand_replay::HandHistory;

/// Read-only collection of parsed hands keyed by hand id (the file stem).
#[derive(Debug, Default)]
pub struct HandStore {
    hands: BTreeMap<String, HandHistory>,
}

impl HandStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `.phh` file in a directory. Missing directories and
    /// unparseable files degrade to warnings; the result is whatever loaded
    /// cleanly.
    pub fn load_dir(path: &Path) -> std::io::Result<Self> {
        let mut store = Self::new();
        let mut entries: Vec<_> = std::fs::read_dir(path)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "phh"))
            .collect();
        entries.sort();

        for path in entries {
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match HandHistory::from_phh_file(&path) {
                Ok(hand) => {
                    store.insert(id.to_string(), hand);
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", path.display());
                }
            }
        }
        Ok(store)
    }

    pub fn insert(&mut self, id: String, hand: HandHistory) {
        self.hands.insert(id, hand);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HandHistory> {
        self.hands.get(id)
    }

    /// Hands in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HandHistory)> {
        self.hands.iter().map(|(id, hand)| (id.as_str(), hand))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = HandStore::new();
        assert!(store.is_empty());
        store.insert("test".to_string(), HandHistory::default());
        assert_eq!(store.len(), 1);
        assert!(store.get("test").is_some());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_iter_is_id_ordered() {
        let mut store = HandStore::new();
        store.insert("b".to_string(), HandHistory::default());
        store.insert("a".to_string(), HandHistory::default());
        let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
