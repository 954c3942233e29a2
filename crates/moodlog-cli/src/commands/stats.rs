use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use moodlog_core::journal::{parse_date, validate_rating};
use moodlog_core::error::Result;
use moodlog_core::{
    Config, DateRange, FilterParams, FlushOutcome, Metric, Snapshot, StatisticsCache,
};
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print every computed dataset
    Compute {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the highlight cards to display
    Highlights {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Report availability and significance of one metric
    Check {
        /// Metric name (e.g. "mood_avg", "tags_peaks")
        metric: Metric,
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// Journal snapshot JSON file
    #[arg(long, short)]
    input: PathBuf,
    /// Day the trailing windows end on (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<String>,
    /// Keep entries carrying any of these tag ids
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// First day of the date filter (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Last day of the date filter (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Keep entries with one of these ratings
    #[arg(long = "rating")]
    ratings: Vec<u8>,
    /// Keep only entries with (true) or without (false) a note
    #[arg(long)]
    has_text: Option<bool>,
    /// Config file to read instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct MetricCheck {
    metric: Metric,
    available: bool,
    highlighted: bool,
    shown: bool,
}

impl InputArgs {
    fn today(&self) -> Result<NaiveDate> {
        match self.today.as_deref() {
            Some(value) => Ok(parse_date(value)?),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }

    fn filters(&self, today: NaiveDate) -> Result<FilterParams> {
        let mut filters = FilterParams::new();
        if !self.tags.is_empty() {
            filters = filters.with_tag_ids(self.tags.iter().cloned());
        }
        if self.from.is_some() || self.to.is_some() {
            let start = match self.from.as_deref() {
                Some(value) => parse_date(value)?,
                None => NaiveDate::MIN,
            };
            let end = match self.to.as_deref() {
                Some(value) => parse_date(value)?,
                None => today,
            };
            filters = filters.with_date_range(DateRange::new(start, end));
        }
        if !self.ratings.is_empty() {
            let ratings = self
                .ratings
                .iter()
                .map(|r| validate_rating(*r))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            filters = filters.with_ratings(ratings);
        }
        if let Some(has_text) = self.has_text {
            filters = filters.with_has_text(has_text);
        }
        Ok(filters)
    }

    fn config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Ok(Config::load_from(path)?),
            None => Ok(Config::load_or_default()),
        }
    }

    /// Load everything and aggregate once.
    fn cache(&self) -> Result<StatisticsCache> {
        let config = self.config()?;
        let today = self.today()?;
        let filters = self.filters(today)?;
        let snapshot = Snapshot::from_path(&self.input)?;
        tracing::debug!(
            input = %self.input.display(),
            items = snapshot.items.len(),
            %today,
            "snapshot loaded"
        );

        let cache = StatisticsCache::new(config.stats());
        match cache.update(snapshot, filters, today) {
            FlushOutcome::Published(_) | FlushOutcome::Unchanged(_) => {}
            other => tracing::warn!(outcome = ?other, "statistics not published"),
        }
        Ok(cache)
    }
}

pub fn run(action: StatsAction) -> std::result::Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Compute { input } => {
            let cache = input.cache()?;
            println!("{}", serde_json::to_string_pretty(&*cache.current())?);
        }
        StatsAction::Highlights { input } => {
            let cache = input.cache()?;
            println!("{}", serde_json::to_string_pretty(&cache.highlights())?);
        }
        StatsAction::Check { metric, input } => {
            let cache = input.cache()?;
            let state = cache.current();
            let selector = cache.selector();
            let check = MetricCheck {
                metric,
                available: selector.is_available(&state, metric),
                highlighted: selector.is_highlighted(&state, metric),
                shown: selector.is_shown(&state, metric),
            };
            println!("{}", serde_json::to_string_pretty(&check)?);
        }
    }
    Ok(())
}
