use crate::item::{Item, ItemId};
use crate::{Error, Result};
use ahash::AHashMap;
use smallvec::SmallVec;

/// Immutable, ordered table of catalog items.
///
/// Row order is the load order and doubles as the tie-break order when
/// rankings are merged. Titles are unique and act as the lookup key.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    by_title: AHashMap<String, usize>,
    by_id: AHashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog from already-cleaned items.
    ///
    /// The first occurrence of a repeated id or title wins; later repeats are
    /// dropped. An empty result is a load failure.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let mut kept = Vec::new();
        let mut by_title = AHashMap::new();
        let mut by_id = AHashMap::new();

        for item in items {
            if by_id.contains_key(&item.id) || by_title.contains_key(&item.title) {
                continue;
            }
            let index = kept.len();
            by_title.insert(item.title.clone(), index);
            by_id.insert(item.id, index);
            kept.push(item);
        }

        if kept.is_empty() {
            return Err(Error::Load("catalog has no valid items".to_string()));
        }

        Ok(Self {
            items: kept,
            by_title,
            by_id,
        })
    }

    /// Catalog restricted to its first `n` rows
    pub fn subset(&self, n: usize) -> Result<Self> {
        Self::from_items(self.items.iter().take(n).cloned())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn index_of_id(&self, id: ItemId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    /// Row index of an exact title match
    pub fn resolve(&self, title: &str) -> Result<usize> {
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| Error::TitlesNotFound(vec![title.to_string()]))
    }

    /// Resolve every title or none: all misses are reported together.
    pub fn resolve_all<S: AsRef<str>>(&self, titles: &[S]) -> Result<SmallVec<[usize; 3]>> {
        let mut indexes = SmallVec::new();
        let mut missing = Vec::new();

        for title in titles {
            let title = title.as_ref();
            match self.by_title.get(title) {
                Some(&index) => indexes.push(index),
                None => missing.push(title.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::TitlesNotFound(missing));
        }
        Ok(indexes)
    }
}
