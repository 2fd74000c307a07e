use cinerank_core::{Error, ItemId, Rating, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One row of a MovieLens-style `ratings.csv`
#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(rename = "userId", alias = "user_id")]
    user_id: u64,
    #[serde(rename = "movieId", alias = "item_id", alias = "movie_id")]
    item_id: u64,
    rating: f32,
    timestamp: i64,
}

/// Reads historical ratings (`userId,movieId,rating,timestamp`)
pub struct RatingsLoader;

impl RatingsLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Rating>> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Load(format!("cannot open {}: {}", path.display(), e)))?;
        let ratings = Self::from_reader(file)?;
        info!(path = %path.display(), ratings = ratings.len(), "Ratings loaded");
        Ok(ratings)
    }

    /// Parse ratings, dropping malformed rows (including rows missing any of
    /// the four columns). An empty file is not an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Rating>> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        reader
            .headers()
            .map_err(|e| Error::Load(format!("unreadable ratings header: {}", e)))?;

        let mut ratings = Vec::new();
        let mut dropped = 0usize;
        for record in reader.deserialize::<RatingRecord>() {
            match record {
                Ok(r) => ratings.push(Rating {
                    user_id: r.user_id,
                    item_id: ItemId(r.item_id),
                    rating: r.rating,
                    timestamp: r.timestamp,
                }),
                Err(_) => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, "Dropped malformed rating rows");
        }
        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratings() {
        let data = "userId,movieId,rating,timestamp
1,296,5.0,1147880044
1,306,3.5,1147868817
oops,1,4.0,0
2,1,,0
";
        let ratings = RatingsLoader::from_reader(data.as_bytes()).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].item_id, ItemId(296));
        assert_eq!(ratings[1].rating, 3.5);
        assert_eq!(ratings[1].timestamp, 1147868817);
    }

    #[test]
    fn test_row_without_timestamp_dropped() {
        let data = "userId,movieId,rating,timestamp
3,10,4.0
4,11,2.5,964982703
";
        let ratings = RatingsLoader::from_reader(data.as_bytes()).unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].user_id, 4);
        assert_eq!(ratings[0].item_id, ItemId(11));
    }

    #[test]
    fn test_empty_ratings_ok() {
        let ratings = RatingsLoader::from_reader("user_id,item_id,rating,timestamp\n".as_bytes()).unwrap();
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        assert!(matches!(
            RatingsLoader::load("/nonexistent/ratings.csv"),
            Err(Error::Load(_))
        ));
    }
}
