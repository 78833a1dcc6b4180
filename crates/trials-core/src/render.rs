//! Display formatting for trial cards and simulation metrics
//!
//! Components only place these strings; every number and date transform
//! happens here.

use chrono::{DateTime, NaiveDate};

use crate::model::{SimulationResult, TrialPage, TrialRecord};

pub const LOADING_CAPTION: &str = "Loading clinical trials data...";
pub const SIMULATING_CAPTION: &str = "Running simulation...";

/// `fraction * 100` with exactly one decimal place, e.g. `0.573` -> `"57.3%"`.
///
/// Ties round away from zero: `0.0025` -> `"0.3%"`.
pub fn percent(fraction: f64) -> String {
    let tenths = (fraction * 100.0 * 10.0).round();
    // -0.0 prints with its sign
    let tenths = if tenths == 0.0 { 0.0 } else { tenths };
    format!("{:.1}%", tenths / 10.0)
}

/// Render an ISO date or RFC 3339 timestamp as `M/D/YYYY`.
///
/// Anything unparseable is returned as given.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .or_else(|_| {
            // Timestamps without an offset, e.g. "2024-01-15T00:00:00"
            trimmed
                .split_once('T')
                .ok_or(())
                .and_then(|(day, _)| NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| ()))
        });

    match date {
        Ok(d) => d.format("%-m/%-d/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Everything a trial card shows
#[derive(Clone, Debug, PartialEq)]
pub struct TrialCard {
    pub title: String,
    pub subtitle: String,
    pub participants_badge: String,
    pub start_date: String,
    pub completion_date: Option<String>,
    pub conditions: Vec<String>,
    pub interventions: Vec<String>,
}

impl TrialCard {
    pub fn from_record(trial: &TrialRecord) -> Self {
        Self {
            title: format!("Trial ID: {}", trial.id),
            subtitle: format!("Phase {} \u{2022} {}", trial.phase, trial.status),
            participants_badge: format!("{} participants", trial.participants),
            start_date: format_date(&trial.start_date),
            completion_date: trial.completion_date.as_deref().map(format_date),
            conditions: trial.conditions.clone(),
            interventions: trial.interventions.clone(),
        }
    }
}

pub fn trial_cards(page: &TrialPage) -> Vec<TrialCard> {
    page.trials.iter().map(TrialCard::from_record).collect()
}

/// Footer under the trial list: `(showing, page_of)`
pub fn pagination_footer(page: &TrialPage) -> (String, String) {
    (
        format!("Showing {} of {} trials", page.trials.len(), page.total_trials),
        format!("Page {} of {}", page.page, page.total_pages()),
    )
}

/// Formatted simulation metrics
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationMetrics {
    pub population_size: String,
    pub response_rate: String,
    pub survival_gain: String,
    pub toxicity_mean: String,
    pub toxicity_std: String,
    pub adverse_mild: String,
    pub adverse_moderate: String,
    pub adverse_severe: String,
}

impl SimulationMetrics {
    pub fn from_result(result: &SimulationResult) -> Self {
        Self {
            population_size: result.population_size.to_string(),
            response_rate: percent(result.efficacy_metrics.response_rate),
            survival_gain: result.efficacy_metrics.survival_gain.to_string(),
            toxicity_mean: percent(result.toxicity_scores.mean),
            toxicity_std: percent(result.toxicity_scores.std),
            adverse_mild: percent(result.adverse_events.mild),
            adverse_moderate: percent(result.adverse_events.moderate),
            adverse_severe: percent(result.adverse_events.severe),
        }
    }
}
