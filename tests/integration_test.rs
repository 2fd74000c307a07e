// Integration tests for CineRank
use cinerank_core::{
    Catalog, CollaborativeRecommender, ContentRecommender, EngineConfig, Error,
    RecommendationRequest, Recommender,
};
use cinerank_storage::{CatalogLoader, RatingsLoader};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const MOVIES: &str = "movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,Grumpier Old Men (1995),Comedy|Romance
4,Waiting to Exhale (1995),Comedy|Drama|Romance
5,Father of the Bride Part II (1995),Comedy
6,Heat (1995),Action|Crime|Thriller
7,Sabrina (1995),Comedy|Romance
8,Tom and Huck (1995),Adventure|Children
9,Sudden Death (1995),Action
10,GoldenEye (1995),Action|Adventure|Thriller
11,\"American President, The (1995)\",Comedy|Drama|Romance
12,Dracula: Dead and Loving It (1995),Comedy|Horror
13,Balto (1995),Adventure|Animation|Children
14,Nixon (1995),Drama
15,Cutthroat Island (1995),Action|Adventure|Romance
16,Casino (1995),Crime|Drama
17,Sense and Sensibility (1995),Drama|Romance
18,Four Rooms (1995),Comedy
19,Ace Ventura: When Nature Calls (1995),Comedy
20,Money Train (1995),Action|Comedy|Crime|Drama|Thriller
21,Broken Row (1995),
22,,Drama
";

const RATINGS: &str = "userId,movieId,rating,timestamp
1,1,5.0,964982703
1,2,4.0,964981247
1,13,4.5,964982224
1,8,4.0,964983815
2,6,5.0,964982931
2,10,4.0,964982400
2,16,4.5,964980868
2,20,3.5,964982176
3,1,4.0,964982703
3,13,5.0,964981247
3,2,3.0,964982224
4,6,4.0,964982931
4,16,5.0,964982400
4,9,3.0,964980868
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", contents).expect("write fixture");
    file
}

fn load_catalog() -> Catalog {
    let file = write_temp(MOVIES);
    CatalogLoader::load(file.path(), &EngineConfig::default()).expect("load catalog")
}

fn seeds() -> [&'static str; 3] {
    ["Toy Story (1995)", "Heat (1995)", "Casino (1995)"]
}

#[test]
fn test_catalog_drops_incomplete_rows() {
    let catalog = load_catalog();
    assert_eq!(catalog.len(), 20);
    assert!(catalog.resolve("Broken Row (1995)").is_err());
}

#[test]
fn test_content_model_end_to_end() {
    let engine = ContentRecommender::new(load_catalog(), EngineConfig::default()).unwrap();
    let result = engine.content_model(&seeds(), 10).unwrap();

    assert_eq!(result.len(), 10);
    for seed in seeds() {
        assert!(!result.iter().any(|t| t == seed));
    }
    let mut unique = result.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), result.len());

    // Equal scores keep catalog order
    assert_eq!(
        &result[..4],
        &["Jumanji (1995)", "Balto (1995)", "Money Train (1995)", "Nixon (1995)"]
    );
}

#[test]
fn test_content_similarity_properties() {
    let engine = ContentRecommender::new(load_catalog(), EngineConfig::default()).unwrap();
    let index = engine.index();
    for i in 0..index.len() {
        for j in 0..index.len() {
            assert_eq!(index.get(i, j), index.get(j, i));
            assert!(index.get(i, i) >= index.get(i, j));
        }
    }
}

#[test]
fn test_result_bounded_by_catalog() {
    let engine = ContentRecommender::new(load_catalog(), EngineConfig::default()).unwrap();
    let result = engine.content_model(&seeds(), 1000).unwrap();
    assert!(result.len() <= engine.catalog().len() - 3);
}

#[test]
fn test_small_candidate_pool_shortens_result() {
    let config = EngineConfig {
        candidate_pool: 5,
        ..Default::default()
    };
    let engine = ContentRecommender::new(load_catalog(), config).unwrap();
    let result = engine.content_model(&seeds(), 10).unwrap();
    assert!(result.len() <= 5);
    assert!(!result.is_empty());
}

#[test]
fn test_dense_and_on_demand_agree() {
    let dense = ContentRecommender::new(load_catalog(), EngineConfig::default()).unwrap();
    let lazy = ContentRecommender::new(
        load_catalog(),
        EngineConfig {
            dense_limit: 0,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(dense.index().is_dense());
    assert!(!lazy.index().is_dense());
    assert_eq!(
        dense.content_model(&seeds(), 10).unwrap(),
        lazy.content_model(&seeds(), 10).unwrap()
    );
}

#[test]
fn test_unknown_seed_fails() {
    let engine = ContentRecommender::new(load_catalog(), EngineConfig::default()).unwrap();
    let err = engine
        .content_model(&["Toy Story (1995)", "toy story (1995)", "Heat (1995)"], 5)
        .unwrap_err();
    assert!(matches!(err, Error::TitlesNotFound(ref t) if t == &vec!["toy story (1995)".to_string()]));
}

#[test]
fn test_strategies_are_interchangeable() {
    let catalog = load_catalog();
    let ratings_file = write_temp(RATINGS);
    let ratings = RatingsLoader::load(ratings_file.path()).unwrap();

    let strategies: Vec<Arc<dyn Recommender>> = vec![
        Arc::new(ContentRecommender::new(catalog.clone(), EngineConfig::default()).unwrap()),
        Arc::new(CollaborativeRecommender::new(catalog, ratings, EngineConfig::default()).unwrap()),
    ];

    let request = RecommendationRequest::new(&seeds(), 5).unwrap();
    let bad = RecommendationRequest::new(&["Toy Story (1995)", "Heat (1995)", "Nope"], 5).unwrap();
    for strategy in &strategies {
        let result = strategy.recommend(&request).unwrap();
        assert_eq!(result.len(), 5, "{}", strategy.name());
        for seed in seeds() {
            assert!(!result.iter().any(|t| t == seed));
        }
        assert!(matches!(strategy.recommend(&bad), Err(Error::TitlesNotFound(_))));
    }
}

#[test]
fn test_collaborative_uses_co_ratings() {
    let catalog = load_catalog();
    let ratings = RatingsLoader::from_reader(RATINGS.as_bytes()).unwrap();
    let model = CollaborativeRecommender::new(catalog, ratings, EngineConfig::default()).unwrap();
    let result = model.collab_model(&seeds(), 6).unwrap();
    assert_eq!(&result[..2], &["Jumanji (1995)", "Balto (1995)"]);
    // Everything rated by the same users as the seeds
    for title in [
        "Tom and Huck (1995)",
        "GoldenEye (1995)",
        "Money Train (1995)",
        "Sudden Death (1995)",
    ] {
        assert!(result.contains(&title.to_string()), "missing {title}");
    }
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = Arc::new(ContentRecommender::new(load_catalog(), EngineConfig::default()).unwrap());
    let expected = engine.content_model(&seeds(), 10).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.content_model(&seeds(), 10).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_empty_catalog_is_load_error() {
    let file = write_temp("movieId,title,genres\n1,,Drama\n2,Blank,\n");
    assert!(matches!(
        CatalogLoader::load(file.path(), &EngineConfig::default()),
        Err(Error::Load(_))
    ));
}

#[test]
fn test_item_invariants_hold_after_load() {
    let catalog = load_catalog();
    for item in catalog.items() {
        assert!(!item.title.is_empty());
        assert!(!item.tags.is_empty());
    }
}
