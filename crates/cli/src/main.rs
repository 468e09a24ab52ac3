use anyhow::{Context, Result, anyhow};
use bundler::{Combination, format_runtime};
use catalog::{
    Catalog, JsonWatchHistory, Movie, MovieId, WatchHistory, STREAMING_PROVIDERS,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use pipeline::{LanguagePreference, Preferences, LANGUAGE_OPTIONS};
use session::{MovieNightSession, ReplaceOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Movie Night - pick what to watch tonight
#[derive(Parser)]
#[command(name = "movie-night")]
#[command(about = "Find movies, or bundles of movies that fill an evening", long_about = None)]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(short, long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Path to the watch-history JSON file (created on first write)
    #[arg(short, long, default_value = "data/watched.json")]
    watched: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the best matching movies
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Mark a listed movie watched and show what replaces it (repeatable)
        #[arg(long = "mark-watched", value_name = "MOVIE_ID")]
        mark_watched: Vec<MovieId>,
    },

    /// Bundle movies whose runtimes add up to a viewing-time budget
    Bundles {
        #[command(flatten)]
        filters: FilterArgs,

        /// Hours available tonight
        #[arg(long)]
        hours: f64,

        /// Number of bundles when no provider is selected
        #[arg(long, default_value = "5")]
        count: usize,

        /// Reshuffle with this seed for a different batch
        #[arg(long)]
        seed: Option<u64>,

        /// Swap a movie out of a bundle, as COMBINATION:MOVIE_ID (repeatable, applied in order)
        #[arg(long, value_parser = parse_replacement, value_name = "COMBINATION:MOVIE_ID")]
        replace: Vec<(usize, MovieId)>,

        /// Mark a movie watched and repair the bundle showing it (repeatable)
        #[arg(long = "mark-watched", value_name = "MOVIE_ID")]
        mark_watched: Vec<MovieId>,

        /// Print the final bundles as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the watch history
    Watched {
        #[command(subcommand)]
        action: WatchedAction,
    },

    /// Show the supported streaming services and languages
    Providers,

    /// Time combination generation over the filtered pool
    Benchmark {
        #[command(flatten)]
        filters: FilterArgs,

        /// Number of generation runs (target hours are randomized per run)
        #[arg(long, default_value = "100")]
        runs: usize,
    },
}

#[derive(Subcommand)]
enum WatchedAction {
    /// Record a movie as watched
    Mark {
        movie_id: MovieId,

        /// Keep suggesting it anyway
        #[arg(long)]
        might_watch_again: bool,
    },
    /// Forget that a movie was watched
    Unmark { movie_id: MovieId },
    /// Print the watch history
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    English,
    International,
    All,
}

impl From<LanguageArg> for LanguagePreference {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::English => LanguagePreference::English,
            LanguageArg::International => LanguagePreference::International,
            LanguageArg::All => LanguagePreference::All,
        }
    }
}

/// Filters shared by every search command
#[derive(Args)]
struct FilterArgs {
    /// Genre id every result must have (repeatable)
    #[arg(long = "genre", value_name = "GENRE_ID")]
    genres: Vec<u32>,

    /// Minimum average rating (0-10)
    #[arg(long, default_value = "0")]
    min_score: f32,

    #[arg(long, value_enum, default_value = "all")]
    language: LanguageArg,

    /// International language ids such as korean,japanese or other
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,

    /// Streaming service ids such as netflix,hulu
    #[arg(long, value_delimiter = ',')]
    providers: Vec<String>,

    #[arg(long)]
    from_year: Option<u16>,

    #[arg(long)]
    to_year: Option<u16>,
}

impl FilterArgs {
    fn into_preferences(self, total_hours: Option<f64>) -> Preferences {
        Preferences {
            genres: self.genres,
            min_score: self.min_score,
            language: self.language.into(),
            international_languages: self.languages,
            streaming_providers: self.providers,
            from_year: self.from_year,
            to_year: self.to_year,
            total_hours,
        }
    }
}

fn parse_replacement(value: &str) -> std::result::Result<(usize, MovieId), String> {
    let (combination, movie) = value
        .split_once(':')
        .ok_or_else(|| format!("expected COMBINATION:MOVIE_ID, got '{value}'"))?;
    let combination = combination
        .trim()
        .parse()
        .map_err(|e| format!("bad combination index '{combination}': {e}"))?;
    let movie = movie
        .trim()
        .parse()
        .map_err(|e| format!("bad movie id '{movie}': {e}"))?;
    Ok((combination, movie))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            filters,
            mark_watched,
        } => {
            let catalog = load_catalog(&cli.catalog)?;
            let mut history = open_history(&cli.watched)?;
            handle_list(catalog, &mut history, filters, &mark_watched)?
        }
        Commands::Bundles {
            filters,
            hours,
            count,
            seed,
            replace,
            mark_watched,
            json,
        } => {
            let catalog = load_catalog(&cli.catalog)?;
            let mut history = open_history(&cli.watched)?;
            let options = BundleOptions {
                hours,
                count,
                seed,
                replace,
                mark_watched,
                json,
            };
            handle_bundles(catalog, &mut history, filters, options)?
        }
        Commands::Watched { action } => {
            let mut history = open_history(&cli.watched)?;
            handle_watched(&mut history, action)?
        }
        Commands::Providers => handle_providers(),
        Commands::Benchmark { filters, runs } => {
            let catalog = load_catalog(&cli.catalog)?;
            let history = open_history(&cli.watched)?;
            handle_benchmark(catalog, &history, filters, runs)?
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Arc<Catalog>> {
    let start = Instant::now();
    let catalog = Catalog::load_from_file(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
    info!("Loaded {} movies in {:?}", catalog.len(), start.elapsed());
    Ok(Arc::new(catalog))
}

fn open_history(path: &Path) -> Result<JsonWatchHistory> {
    JsonWatchHistory::open(path)
        .with_context(|| format!("Failed to open watch history at {}", path.display()))
}

/// Handle the 'list' command
fn handle_list(
    catalog: Arc<Catalog>,
    history: &mut JsonWatchHistory,
    filters: FilterArgs,
    mark_watched: &[MovieId],
) -> Result<()> {
    let mut session = MovieNightSession::new(catalog);
    session.search(filters.into_preferences(None), history)?;

    for &movie_id in mark_watched {
        let outcome = session.mark_watched(movie_id, false, history)?;
        print_outcome(movie_id, &outcome);
    }

    if session.listed().is_empty() {
        println!("{}", "No movies match these filters.".yellow());
        return Ok(());
    }

    println!("{}", "Movies for tonight:".bold().blue());
    for (rank, movie) in session.listed().iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), describe(movie));
    }
    Ok(())
}

struct BundleOptions {
    hours: f64,
    count: usize,
    seed: Option<u64>,
    replace: Vec<(usize, MovieId)>,
    mark_watched: Vec<MovieId>,
    json: bool,
}

/// Handle the 'bundles' command
fn handle_bundles(
    catalog: Arc<Catalog>,
    history: &mut JsonWatchHistory,
    filters: FilterArgs,
    options: BundleOptions,
) -> Result<()> {
    if !(options.hours.is_finite() && options.hours > 0.0) {
        return Err(anyhow!("--hours must be a positive number, got {}", options.hours));
    }

    let mut session = MovieNightSession::new(catalog).with_combination_count(options.count);
    let summary = session.search(filters.into_preferences(Some(options.hours)), history)?;
    info!("{} movies in the pool", summary.pool);

    if let Some(seed) = options.seed {
        session.regenerate(seed)?;
    }

    for &(combination, movie_id) in &options.replace {
        let outcome = session
            .replace_movie(combination, movie_id)
            .with_context(|| format!("Cannot replace movie {movie_id} in bundle {combination}"))?;
        print_outcome(movie_id, &outcome);
    }

    for &movie_id in &options.mark_watched {
        let outcome = session.mark_watched(movie_id, false, history)?;
        print_outcome(movie_id, &outcome);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(session.combinations())?);
        return Ok(());
    }

    print_combinations(session.combinations(), options.hours);
    Ok(())
}

/// Handle the 'watched' command
fn handle_watched(history: &mut JsonWatchHistory, action: WatchedAction) -> Result<()> {
    match action {
        WatchedAction::Mark {
            movie_id,
            might_watch_again,
        } => {
            history.mark_watched(movie_id, might_watch_again)?;
            println!("{} Marked {} as watched", "✓".green(), movie_id);
        }
        WatchedAction::Unmark { movie_id } => {
            history.unmark_watched(movie_id)?;
            println!("{} Removed {} from watch history", "✓".green(), movie_id);
        }
        WatchedAction::Show => {
            let mut entries = history.all();
            entries.sort_by_key(|entry| std::cmp::Reverse(entry.watched_at));
            println!("{}", format!("Watched ({}):", entries.len()).bold().blue());
            for entry in entries {
                let again = if entry.might_watch_again { " (might watch again)" } else { "" };
                println!("  - {}{}", entry.id, again.cyan());
            }
        }
    }
    Ok(())
}

/// Handle the 'providers' command
fn handle_providers() {
    println!("{}", "Streaming services:".bold().blue());
    for provider in STREAMING_PROVIDERS {
        println!("  {:<10} {} (catalog id {})", provider.id, provider.name, provider.catalog_id);
    }
    println!("{}", "International languages:".bold().blue());
    for option in LANGUAGE_OPTIONS {
        let code = if option.code.is_empty() { "-" } else { option.code };
        println!("  {:<10} {} ({})", option.id, option.name, code);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(
    catalog: Arc<Catalog>,
    history: &JsonWatchHistory,
    filters: FilterArgs,
    runs: usize,
) -> Result<()> {
    if runs == 0 {
        return Err(anyhow!("--runs must be at least 1"));
    }

    let mut session = MovieNightSession::new(catalog);
    let filters = filters.into_preferences(None);

    let mut timings: Vec<Duration> = Vec::with_capacity(runs);
    for _ in 0..runs {
        let hours: f64 = rand::random_range(1.5..5.0);
        let preferences = Preferences {
            total_hours: Some(hours),
            ..filters.clone()
        };
        let start = Instant::now();
        session.search(preferences, history)?;
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p) as usize];
    let throughput = runs as f64 / total_time.as_secs_f64();

    println!("Benchmark results ({} movies in pool):", session.pool().len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} searches/second", throughput);

    Ok(())
}

fn describe(movie: &Movie) -> String {
    let year = movie
        .release_year
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let runtime = movie
        .known_runtime()
        .map(format_runtime)
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{}{} - {} - ★ {:.1} [#{}]",
        movie.title, year, runtime, movie.vote_average, movie.id
    )
}

fn print_outcome(movie_id: MovieId, outcome: &ReplaceOutcome) {
    match outcome {
        ReplaceOutcome::Replaced { removed, added } => println!(
            "{} Replaced {} with {}",
            "↻".green(),
            removed.title,
            added.title
        ),
        ReplaceOutcome::Removed(movie) => {
            println!("{} Removed {} (nothing similar left)", "−".yellow(), movie.title)
        }
        ReplaceOutcome::NoReplacement => {
            println!("{} No replacement found for {}", "!".yellow(), movie_id)
        }
        ReplaceOutcome::NotShown => println!("{} Movie {} is not on display", "!".yellow(), movie_id),
    }
}

fn print_combinations(combinations: &[Combination], hours: f64) {
    if combinations.is_empty() {
        println!(
            "{}",
            format!("No movie combinations fit {hours} hours. Try a different time or fewer filters.")
                .yellow()
        );
        return;
    }

    println!("{}", format!("Bundles for {hours} hours:").bold().blue());
    for (index, combination) in combinations.iter().enumerate() {
        let provider = combination
            .provider
            .as_deref()
            .map(|p| format!(" [{p}]"))
            .unwrap_or_default();
        println!("{}. {}{}", index.to_string().green(), combination, provider.cyan());
        for movie in &combination.movies {
            println!("     - {}", describe(movie));
        }
    }
}
