use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used by MovieLens for movies without any genre
pub const NO_TAGS_PLACEHOLDER: &str = "(no genres listed)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId(id)
    }
}

/// A catalog entry: a movie with its category tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub tags: Vec<String>,
}

impl Item {
    /// Build a cleaned item. Returns `None` when the title is blank or no
    /// tag survives cleaning; such rows never enter a catalog. The title is
    /// stored exactly as given since it is the lookup key.
    pub fn new<I, S>(id: u64, title: &str, tags: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if title.trim().is_empty() {
            return None;
        }

        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty() && t != NO_TAGS_PLACEHOLDER)
            .collect();
        if tags.is_empty() {
            return None;
        }

        Some(Self {
            id: ItemId(id),
            title: title.to_string(),
            tags,
        })
    }

    /// Build an item from a raw delimiter-separated tag string such as
    /// `"Action|Comedy"`
    pub fn from_tag_string(
        id: u64,
        title: &str,
        tags: &str,
        delimiter: char,
    ) -> Option<Self> {
        Self::new(id, title, tags.split(delimiter))
    }
}
