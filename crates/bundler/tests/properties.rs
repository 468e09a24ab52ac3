//! Property-style tests for the combination engine on a larger,
//! deterministic pool.

use bundler::{
    displayed_ids, find_replacement, CombinationGenerator, ExclusionHistory, SlotKey,
    PER_PROVIDER_COUNT,
};
use catalog::{Movie, MovieId, ProviderDirectory};
use std::collections::HashSet;

/// 120 movies with runtimes spread over 75..=174 minutes and ratings over
/// 4.0..=9.9, with a handful of entries missing runtimes.
fn synthetic_pool() -> Vec<Movie> {
    (1..=120u32)
        .map(|id| {
            let runtime = if id % 17 == 0 { None } else { Some(75 + (id * 37) % 100) };
            let rating = 4.0 + ((id * 53) % 60) as f32 / 10.0;
            let mut movie = Movie::new(id, format!("Movie {id}"), runtime, rating);
            movie.available_on = match id % 3 {
                0 => vec![8],
                1 => vec![9, 15],
                _ => vec![15],
            };
            movie
        })
        .collect()
}

fn assert_disjoint(combinations: &[bundler::Combination]) {
    let mut seen = HashSet::new();
    for combination in combinations {
        for id in combination.movie_ids() {
            assert!(seen.insert(id), "movie {id} appears in two combinations");
        }
    }
}

#[test]
fn generated_batches_are_disjoint_and_in_window() {
    let pool = synthetic_pool();
    let generator = CombinationGenerator::new();

    for hours in [1.5, 2.0, 3.0, 4.5, 6.0] {
        let result = generator.generate(&pool, hours, 5);
        assert!(result.len() <= 5);
        assert_disjoint(&result);

        let band = generator.band(hours).unwrap();
        for combination in &result {
            assert!(band.contains(combination.total_runtime));
            assert!((1..=5).contains(&combination.size()));
            assert!(combination.movies.iter().all(|m| m.known_runtime().is_some()));
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let pool = synthetic_pool();
    let generator = CombinationGenerator::new();

    let first = generator.generate(&pool, 4.0, 5);
    let second = generator.generate(&pool, 4.0, 5);
    assert_eq!(first, second);
}

#[test]
fn per_provider_batches_respect_bounds() {
    let pool = synthetic_pool();
    let generator = CombinationGenerator::new();
    let directory = ProviderDirectory::streaming_services();
    let providers = ["netflix", "prime", "hulu"];

    let result = generator.generate_per_provider(&pool, 3.0, &providers, &directory);
    assert_disjoint(&result);

    for provider in providers {
        let count = result
            .iter()
            .filter(|c| c.provider.as_deref() == Some(provider))
            .count();
        assert!(count <= PER_PROVIDER_COUNT);
    }
}

#[test]
fn replacements_stay_close_and_exclusive() {
    let pool = synthetic_pool();
    let generator = CombinationGenerator::new();
    let combinations = generator.generate(&pool, 3.0, 5);
    let displayed = displayed_ids(&combinations);

    for combination in &combinations {
        for original in &combination.movies {
            let strict_exists = pool.iter().any(|m| {
                m.id != original.id
                    && !displayed.contains(&m.id)
                    && m.known_runtime()
                        .is_some_and(|r| r.abs_diff(original.runtime.unwrap_or(0)) <= 15)
            });

            if let Some(replacement) = find_replacement(original, &pool, &displayed) {
                assert_ne!(replacement.id, original.id);
                assert!(!displayed.contains(&replacement.id));

                let drift = replacement.known_runtime().unwrap().abs_diff(original.runtime.unwrap());
                if strict_exists {
                    assert!(drift <= 15);
                } else {
                    assert!(drift <= 30);
                }
            }
        }
    }
}

#[test]
fn sequential_replacements_never_repeat_in_a_slot() {
    // Small fixed pool: one bundle slot and four 100±10 minute alternatives
    let pool: Vec<Movie> = vec![
        Movie::new(1, "Original", Some(100), 6.0),
        Movie::new(2, "Alt A", Some(95), 9.0),
        Movie::new(3, "Alt B", Some(105), 8.0),
        Movie::new(4, "Alt C", Some(110), 7.0),
        Movie::new(5, "Alt D", Some(90), 5.0),
        Movie::new(6, "Partner", Some(20), 5.0),
    ];
    let mut combinations = vec![bundler::Combination::new(vec![pool[0].clone(), pool[5].clone()])];
    let mut history = ExclusionHistory::new();
    let slot = SlotKey::new(0, 0);

    let mut offered: Vec<MovieId> = Vec::new();
    loop {
        let excluded = history.excluded_for(slot, &combinations);
        let current = combinations[0].movies[slot.position].clone();
        let Some(replacement) = find_replacement(&current, &pool, &excluded) else {
            break;
        };
        offered.push(replacement.id);
        combinations[0].replace_at(slot.position, replacement.clone());
        history.record_replaced(slot, current.id);
    }

    // Best-rated first, every alternative exactly once, then exhausted
    assert_eq!(offered, vec![2, 3, 4, 5]);
    assert_eq!(history.replaced_in(slot), &[1, 2, 3, 4]);
    // The partner never moved
    assert_eq!(combinations[0].movies[1].id, 6);
}

#[test]
fn slot_positions_survive_repairs() {
    let pool: Vec<Movie> = vec![
        Movie::new(1, "First", Some(60), 7.0),
        Movie::new(2, "Second", Some(60), 7.0),
        Movie::new(3, "Sub for second", Some(62), 8.0),
        Movie::new(4, "Sub for first", Some(58), 6.0),
    ];
    let mut combinations = vec![bundler::Combination::new(vec![pool[0].clone(), pool[1].clone()])];
    let mut history = ExclusionHistory::new();

    // Replace the second movie, then the first: the second slot's history
    // must not leak into the first, and positions must not shift.
    let second = SlotKey::new(0, 1);
    let excluded = history.excluded_for(second, &combinations);
    let replacement = find_replacement(&pool[1], &pool, &excluded).unwrap().clone();
    assert_eq!(replacement.id, 3);
    combinations[0].replace_at(1, replacement);
    history.record_replaced(second, 2);

    let first = SlotKey::new(0, 0);
    assert_eq!(combinations[0].position_of(3), Some(1));
    let excluded = history.excluded_for(first, &combinations);
    let replacement = find_replacement(&pool[0], &pool, &excluded).unwrap();
    // Movie 2 was only rotated out of the second slot, so it is a valid
    // (and better rated) substitute for the first
    assert_eq!(replacement.id, 2);
}
