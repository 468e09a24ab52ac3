//! End-to-end session flows over a catalog file and a JSON watch history.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use catalog::{Catalog, JsonWatchHistory, WatchHistory};
use pipeline::Preferences;
use session::{MovieNightSession, ReplaceOutcome};

// netflix = 8, hulu = 15; movie 30 streams nowhere the user subscribes
const CATALOG_JSON: &str = r#"{
  "movies": [
    { "id": 10, "title": "Ten", "runtime": 100, "vote_average": 8.0, "vote_count": 900,
      "original_language": "en", "available_on": [8] },
    { "id": 11, "title": "Eleven", "runtime": 85, "vote_average": 7.5, "vote_count": 900,
      "original_language": "en", "available_on": [8] },
    { "id": 12, "title": "Twelve", "runtime": 95, "vote_average": 7.0, "vote_count": 900,
      "original_language": "en", "available_on": [8] },
    { "id": 20, "title": "Twenty", "runtime": 90, "vote_average": 7.8, "vote_count": 900,
      "original_language": "en", "available_on": [15] },
    { "id": 21, "title": "Twenty-One", "runtime": 95, "vote_average": 7.2, "vote_count": 900,
      "original_language": "en", "available_on": [15] },
    { "id": 30, "title": "Thirty", "runtime": 90, "vote_average": 9.0, "vote_count": 900,
      "original_language": "en", "available_on": [999] }
  ]
}"#;

fn load_catalog(dir: &tempfile::TempDir) -> Arc<Catalog> {
    let path = dir.path().join("catalog.json");
    fs::write(&path, CATALOG_JSON).unwrap();
    Arc::new(Catalog::load_from_file(&path).unwrap())
}

fn three_hours_on(providers: &[&str]) -> Preferences {
    Preferences {
        total_hours: Some(3.0),
        streaming_providers: providers.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn test_per_provider_search() {
    let dir = tempfile::tempdir().unwrap();
    let history = JsonWatchHistory::open(dir.path().join("watched.json")).unwrap();
    let mut session = MovieNightSession::new(load_catalog(&dir));

    session.search(three_hours_on(&["netflix", "hulu"]), &history).unwrap();

    let combinations = session.combinations();
    assert_eq!(combinations.len(), 2);
    assert_eq!(combinations[0].provider.as_deref(), Some("netflix"));
    assert_eq!(combinations[1].provider.as_deref(), Some("hulu"));

    let mut seen = HashSet::new();
    for combination in combinations {
        assert!((150..=210).contains(&combination.total_runtime));
        for id in combination.movie_ids() {
            assert!(seen.insert(id), "movie {id} shown twice");
        }
    }
    assert!(!seen.contains(&30));
}

#[test]
fn test_watched_movie_stays_hidden_in_later_searches() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&dir);
    let history_path = dir.path().join("watched.json");

    {
        let mut history = JsonWatchHistory::open(&history_path).unwrap();
        let mut session = MovieNightSession::new(catalog.clone());
        session.search(three_hours_on(&["hulu"]), &history).unwrap();

        let outcome = session.mark_watched(20, false, &mut history).unwrap();
        // the only other hulu movie is already in the same bundle
        assert_eq!(outcome, ReplaceOutcome::NoReplacement);
    }

    let history = JsonWatchHistory::open(&history_path).unwrap();
    assert!(history.should_exclude(20));

    let mut session = MovieNightSession::new(catalog);
    session.search(Preferences::default(), &history).unwrap();
    assert!(session.listed().iter().all(|m| m.id != 20));
    assert!(session.pool().iter().any(|m| m.id == 21));
}

#[test]
fn test_replacements_never_repeat_across_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let history = JsonWatchHistory::open(dir.path().join("watched.json")).unwrap();
    let mut session = MovieNightSession::new(load_catalog(&dir)).with_combination_count(1);

    // no provider filter: every movie but the unreachable one is in the pool
    session
        .search(
            Preferences {
                total_hours: Some(1.5),
                ..Default::default()
            },
            &history,
        )
        .unwrap();

    let mut shown = session.combinations()[0].movies[0].id;
    let mut seen = vec![shown];
    while let ReplaceOutcome::Replaced { added, .. } = session.replace_movie(0, shown).unwrap() {
        assert!(!seen.contains(&added.id), "movie {} offered twice", added.id);
        seen.push(added.id);
        shown = added.id;
    }
    assert_eq!(seen.len(), session.pool().len());
}
