use cinerank_core::{Catalog, EngineConfig, Error, Item, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One row of a MovieLens-style `movies.csv`. The defaults cover a column
/// missing from the header; a row shorter than the header fails to parse.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(rename = "movieId", alias = "id", alias = "item_id", default)]
    id: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "genres", alias = "tags", default)]
    tags: Option<String>,
}

/// Reads the item catalog from CSV (`movieId,title,genres`; `id` and
/// `tags` are accepted as column names too).
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load<P: AsRef<Path>>(path: P, config: &EngineConfig) -> Result<Catalog> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Load(format!("cannot open {}: {}", path.display(), e)))?;
        let catalog = Self::from_reader(file, config)?;
        info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog; rows without an id, a title or at least one tag are
    /// dropped. Fails when the header is unreadable or nothing survives.
    pub fn from_reader<R: Read>(reader: R, config: &EngineConfig) -> Result<Catalog> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        reader
            .headers()
            .map_err(|e| Error::Load(format!("unreadable catalog header: {}", e)))?;

        let mut items = Vec::new();
        let mut dropped = 0usize;
        for (line, record) in reader.deserialize::<CatalogRecord>().enumerate() {
            let item = match record {
                Ok(CatalogRecord {
                    id: Some(id),
                    title: Some(title),
                    tags: Some(tags),
                }) => Item::from_tag_string(id, &title, &tags, config.tag_delimiter),
                Ok(_) => None,
                Err(e) => {
                    debug!(line = line + 2, error = %e, "Malformed catalog row");
                    None
                }
            };
            match item {
                Some(item) => items.push(item),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, "Dropped incomplete catalog rows");
        }
        if items.is_empty() {
            return Err(Error::Load("no valid rows in catalog".to_string()));
        }
        Catalog::from_items(items)
    }
}

/// Catalog titles in load order, for pickers
pub fn title_list(catalog: &Catalog) -> Vec<String> {
    catalog.titles().map(str::to_string).collect()
}
