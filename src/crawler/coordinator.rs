//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl fans out twice:
//! 1. One task per state key walks that state's listing page for cities
//! 2. Within each state task, every discovered city page is extracted in
//!    document order
//!
//! Tasks append to shared collectors. The coordinator waits on a join barrier
//! for every state task before draining them. A failure at either level is
//! logged and skipped; it never stops sibling states or cities.

use crate::config::Config;
use crate::crawler::collector::Collector;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::scheduler::{Pacer, Scheduler};
use crate::crawler::walker::walk;
use crate::model::{DirectoryEntry, LocationRecord, StateKey};
use crate::output::{
    print_statistics, reconcile, write_outputs, CountMismatch, CrawlStatistics, Progress,
    Reconciliation,
};
use crate::url::state_url;
use crate::CrawlError;
use chrono::Utc;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// The crawl level a failure happened at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureLevel {
    /// The state listing could not be walked; the state contributes nothing
    State,
    /// A city page could not be extracted; the city contributes no records
    City,
}

impl fmt::Display for FailureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => f.write_str("state"),
            Self::City => f.write_str("city"),
        }
    }
}

/// A skipped unit of work
#[derive(Debug, Clone)]
pub struct CrawlFailure {
    pub level: FailureLevel,
    pub state: StateKey,
    pub url: String,
    pub message: String,
}

/// Everything a completed crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// City entries, sorted by state code, then place name
    pub cities: Vec<DirectoryEntry>,

    /// Location records, sorted by state, then city
    pub locations: Vec<LocationRecord>,

    /// Cities whose declared count differed from what was extracted
    pub mismatches: Vec<CountMismatch>,

    /// States and cities that were skipped
    pub failures: Vec<CrawlFailure>,

    pub stats: CrawlStatistics,
}

/// State shared by every state task
struct CrawlContext {
    origin: String,
    max_cities_per_state: Option<usize>,
    client: Client,
    extractor: Extractor,
    scheduler: Scheduler,
    progress: Progress,
    cities: Collector<DirectoryEntry>,
    locations: Collector<LocationRecord>,
    mismatches: Collector<CountMismatch>,
    failures: Collector<CrawlFailure>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    context: Arc<CrawlContext>,
    states: Vec<StateKey>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `progress` - Where per-state and per-city progress lines go
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn new(config: &Config, progress: Progress) -> Result<Self, CrawlError> {
        Self::with_extractor(config, progress, Extractor::default())
    }

    /// Creates a coordinator that extracts city pages with a custom strategy chain
    pub fn with_extractor(
        config: &Config,
        progress: Progress,
        extractor: Extractor,
    ) -> Result<Self, CrawlError> {
        let client = build_http_client(config).map_err(|source| CrawlError::Http {
            url: config.site.origin.clone(),
            source,
        })?;

        let context = CrawlContext {
            origin: config.site.origin.clone(),
            max_cities_per_state: config.crawler.max_cities_per_state,
            client,
            extractor,
            scheduler: Scheduler::new(&config.crawler),
            progress,
            cities: Collector::new(),
            locations: Collector::new(),
            mismatches: Collector::new(),
            failures: Collector::new(),
        };

        Ok(Self {
            context: Arc::new(context),
            states: config.site.states.clone(),
        })
    }

    /// Runs the crawl to completion
    ///
    /// Never fails: every state and every discovered city is attempted, and
    /// whatever was extracted is returned.
    pub async fn run(&self) -> CrawlOutcome {
        let started_at = Utc::now();
        let start_time = Instant::now();

        tracing::info!(
            "Starting crawl of {} states from {}",
            self.states.len(),
            self.context.origin
        );

        let mut tasks = JoinSet::new();
        for &state in &self.states {
            let context = Arc::clone(&self.context);
            tasks.spawn(async move { crawl_state(&context, state).await });
        }

        // Join barrier: every producer has finished before the collectors drain
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("State task did not complete: {}", e);
            }
        }

        let mut cities = self.context.cities.drain();
        let mut locations = self.context.locations.drain();
        let mismatches = self.context.mismatches.drain();
        let failures = self.context.failures.drain();

        cities.sort_by(|a, b| {
            a.state
                .cmp(&b.state)
                .then_with(|| a.place_name.cmp(&b.place_name))
                .then_with(|| a.url.cmp(&b.url))
        });
        // Stable: records of one city keep their document order
        locations.sort_by(|a, b| a.state.cmp(&b.state).then_with(|| a.city.cmp(&b.city)));

        let count_failures =
            |level: FailureLevel| failures.iter().filter(|f| f.level == level).count();
        let stats = CrawlStatistics {
            started_at,
            elapsed: start_time.elapsed(),
            states_attempted: self.states.len(),
            states_failed: count_failures(FailureLevel::State),
            cities_discovered: cities.len(),
            cities_failed: count_failures(FailureLevel::City),
            locations_extracted: locations.len(),
            locations_with_coordinates: locations
                .iter()
                .filter(|l| l.has_coordinates())
                .count(),
            count_mismatches: mismatches.len(),
        };

        tracing::info!(
            "Crawl completed: {} cities, {} locations in {:?}",
            stats.cities_discovered,
            stats.locations_extracted,
            stats.elapsed
        );

        CrawlOutcome {
            cities,
            locations,
            mismatches,
            failures,
            stats,
        }
    }
}

/// Walks one state listing, then extracts each of its cities in order
async fn crawl_state(context: &CrawlContext, state: StateKey) {
    let mut pacer = context.scheduler.pacer();
    let url = state_url(&context.origin, state);

    context.progress.state_started(state);

    let walked = {
        let _permit = pacer.acquire().await;
        walk(&context.client, &url, state, &context.origin).await
    };

    let mut cities = match walked {
        Ok(cities) => cities,
        Err(e) => {
            tracing::warn!("Error fetching {}: {}", state, e);
            context.progress.state_failed(state);
            context.failures.push(CrawlFailure {
                level: FailureLevel::State,
                state,
                url,
                message: e.to_string(),
            });
            return;
        }
    };

    if let Some(limit) = context.max_cities_per_state {
        if cities.len() > limit {
            tracing::debug!(
                "Keeping the first {} of {} cities in {}",
                limit,
                cities.len(),
                state.upper()
            );
            cities.truncate(limit);
        }
    }

    context.progress.state_walked(state, cities.len());
    context.cities.extend(cities.iter().cloned());

    for city in &cities {
        crawl_city(context, &mut pacer, city).await;
    }
}

/// Extracts one city page and reconciles its count
async fn crawl_city(context: &CrawlContext, pacer: &mut Pacer, city: &DirectoryEntry) {
    context.progress.city_started(city.state, &city.place_name);

    let extracted = {
        let _permit = pacer.acquire().await;
        context.extractor.extract(&context.client, &city.url).await
    };

    match extracted {
        Ok(records) => {
            context
                .progress
                .city_extracted(records.len(), city.declared_count);

            if let Reconciliation::Mismatch(mismatch) = reconcile(city, records.len()) {
                context.mismatches.push(mismatch);
            }

            context.locations.extend(records);
        }
        Err(e) => {
            tracing::warn!("Error fetching locations from {}: {}", city.url, e);
            context.progress.city_failed();
            context.failures.push(CrawlFailure {
                level: FailureLevel::City,
                state: city.state,
                url: city.url.clone(),
                message: e.to_string(),
            });
        }
    }
}

/// Runs the main crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the HTTP client and scheduler
/// 2. Walk every configured state listing concurrently
/// 3. Extract every discovered city page
/// 4. Write the city and location CSV files
/// 5. Print the summary (unless progress is silent)
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed and results were written
/// * `Err(CrawlError)` - The client could not be built or results could not be written
///
/// # Example
///
/// ```no_run
/// use locator_sweep::config::load_config;
/// use locator_sweep::crawler::run_crawl;
/// use locator_sweep::output::Progress;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("sweep.toml"))?;
/// run_crawl(config, Progress::console()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, progress: Progress) -> Result<CrawlOutcome, CrawlError> {
    let coordinator = Coordinator::new(&config, progress)?;
    let outcome = coordinator.run().await;

    write_outputs(&config.output, &outcome.cities, &outcome.locations)?;

    if progress.is_enabled() {
        print_statistics(&outcome.stats);
    }

    Ok(outcome)
}
