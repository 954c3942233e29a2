//! Synthetic journal generator.
//!
//! Produces realistic-looking snapshots for demos, manual testing of the
//! highlights screen, and load tests of the aggregation engine. With a fixed
//! seed the output is fully reproducible.

use chrono::{Days, NaiveDate, NaiveTime};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::journal::{LogItem, Snapshot, Tag, TagColor};

const TAGS: [(&str, &str, TagColor); 6] = [
    ("tag-work", "Work", TagColor::Blue),
    ("tag-family", "Family", TagColor::Rose),
    ("tag-sport", "Sport", TagColor::Green),
    ("tag-friends", "Friends", TagColor::Amber),
    ("tag-sleep", "Good sleep", TagColor::Indigo),
    ("tag-outdoors", "Outdoors", TagColor::Emerald),
];

/// Longest history that can be generated, a century.
pub const MAX_SIMULATION_DAYS: u32 = 36_600;

/// Referenced by some entries but absent from the registry.
const DELETED_TAG: &str = "tag-deleted";

const EMOTIONS: [&str; 8] = [
    "anxious", "calm", "excited", "grateful", "irritated", "lonely", "proud", "tired",
];

/// Configuration for journal generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Days of history ending today
    pub days: u32,
    /// Upper bound of entries written per day
    pub max_entries_per_day: u32,
    /// Probability that an entry carries a rating (0.0-1.0)
    pub rated_probability: f64,
    /// Probability that an entry carries a note (0.0-1.0)
    pub text_probability: f64,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 60,
            max_entries_per_day: 2,
            rated_probability: 0.9,
            text_probability: 0.4,
            seed: None,
        }
    }
}

/// Generate a snapshot covering `[today - days + 1, today]`.
///
/// # Errors
///
/// Returns an error if `config.days` exceeds [`MAX_SIMULATION_DAYS`].
pub fn generate_journal(
    config: &SimulationConfig,
    today: NaiveDate,
) -> Result<Snapshot, ValidationError> {
    if config.days > MAX_SIMULATION_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "days",
            value: u64::from(config.days),
            max: u64::from(MAX_SIMULATION_DAYS),
        });
    }

    let mut rng = match config.seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    };

    let tags: Vec<Tag> = TAGS
        .iter()
        .map(|(id, title, color)| Tag::new(*id, *title, *color))
        .collect();

    // Mood drifts slowly so peaks cluster like real journals do.
    let mut mood: f64 = 3.0;
    let mut items = Vec::new();

    for offset in (0..config.days).rev() {
        // Days before the calendar's start are skipped.
        let Some(date) = today.checked_sub_days(Days::new(u64::from(offset))) else {
            continue;
        };
        mood = (mood + rng.gen_range(-0.8..=0.8)).clamp(1.0, 5.0);

        let entries = rng.gen_range(0..=config.max_entries_per_day);
        for _ in 0..entries {
            items.push(generate_entry(&mut rng, config, date, mood));
        }
    }

    Ok(Snapshot::new(items, tags))
}

fn generate_entry(
    rng: &mut Mcg128Xsl64,
    config: &SimulationConfig,
    date: NaiveDate,
    mood: f64,
) -> LogItem {
    let time = NaiveTime::from_hms_opt(rng.gen_range(6..23), rng.gen_range(0..60), 0)
        .unwrap_or_default();
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string();
    let mut item = LogItem::new(id, date.and_time(time));

    if rng.gen_bool(config.rated_probability.clamp(0.0, 1.0)) {
        let jitter: f64 = rng.gen_range(-0.6..=0.6);
        item.rating = Some((mood + jitter).round().clamp(1.0, 5.0) as u8);
    }

    let tag_count = rng.gen_range(0..=2);
    let mut tag_ids: Vec<&str> = TAGS
        .choose_multiple(rng, tag_count)
        .map(|(id, _, _)| *id)
        .collect();
    if rng.gen_bool(0.05) {
        tag_ids.push(DELETED_TAG);
    }
    item = item.with_tags(tag_ids);

    let emotion_count = rng.gen_range(0..=2);
    item = item.with_emotions(EMOTIONS.choose_multiple(rng, emotion_count).copied());

    if rng.gen_bool(config.text_probability.clamp(0.0, 1.0)) {
        item = item.with_text("Generated entry");
    }

    item
}
