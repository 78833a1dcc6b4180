//! Trial and Digital Twin Data Model
//!
//! Wire types returned by the trials collaborator and the digital twin
//! simulation service. Trial records use the camelCase names of the
//! trials endpoint; simulation payloads keep the snake_case names of the
//! simulation service.

use serde::{Deserialize, Serialize};

/// Simulated horizon used for every twin run
pub const DEFAULT_DURATION_MONTHS: u32 = 12;

/// Accepts a count sent either as an integer or as a whole-valued float
/// (`50` or `50.0`); fractional and negative values are rejected.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct Count;

    impl<'de> de::Visitor<'de> for Count {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
            u64::try_from(value)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
            if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
                Ok(value as u64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(Count)
}

// ==================== TRIAL DATA ====================

/// One clinical trial as reported by the trials collaborator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    pub id: String,
    /// Phase label as reported, e.g. "II" or "2/3"
    pub phase: String,
    pub status: String,
    /// Enrolled participant count
    #[serde(deserialize_with = "deserialize_count")]
    pub participants: u64,
    /// ISO date or RFC 3339 timestamp
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub interventions: Vec<String>,
}

/// A page of trial records plus pagination metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialPage {
    pub trials: Vec<TrialRecord>,
    pub total_trials: u64,
    pub page: u64,
    pub page_size: u64,
}

impl TrialPage {
    /// First record on the page, the seed for the twin simulation
    pub fn first(&self) -> Option<&TrialRecord> {
        self.trials.first()
    }

    /// Number of pages needed for `total_trials`, rounded up.
    ///
    /// A zero page size yields zero pages rather than dividing by zero.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_trials.div_ceil(self.page_size)
    }
}

// ==================== SIMULATION REQUEST ====================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoleculeParameters {
    pub id: String,
    pub phase: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetPopulation {
    pub size: u64,
    pub conditions: Vec<String>,
}

/// Fixed run configuration merged into every simulation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub duration_months: u32,
    pub include_adverse_events: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration_months: DEFAULT_DURATION_MONTHS,
            include_adverse_events: true,
        }
    }
}

/// Caller-supplied part of a simulation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub molecule_parameters: MoleculeParameters,
    pub target_population: TargetPopulation,
}

impl SimulationParams {
    /// Derive twin inputs from a trial: its id and phase describe the
    /// molecule, its participants and conditions describe the population.
    pub fn from_trial(trial: &TrialRecord) -> Self {
        Self {
            molecule_parameters: MoleculeParameters {
                id: trial.id.clone(),
                phase: trial.phase.clone(),
            },
            target_population: TargetPopulation {
                size: trial.participants,
                conditions: trial.conditions.clone(),
            },
        }
    }

    pub fn with_config(self, simulation_config: SimulationConfig) -> SimulationRequest {
        SimulationRequest {
            molecule_parameters: self.molecule_parameters,
            target_population: self.target_population,
            simulation_config,
        }
    }
}

/// Full body posted to the digital twin service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub molecule_parameters: MoleculeParameters,
    pub target_population: TargetPopulation,
    pub simulation_config: SimulationConfig,
}

// ==================== SIMULATION RESULT ====================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EfficacyMetrics {
    /// Fraction of responders, 0.0..=1.0
    pub response_rate: f64,
    pub survival_gain: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToxicityScores {
    pub mean: f64,
    pub std: f64,
}

/// Adverse event rates by severity, each a fraction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdverseEventRates {
    pub mild: f64,
    pub moderate: f64,
    pub severe: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(deserialize_with = "deserialize_count")]
    pub population_size: u64,
    pub efficacy_metrics: EfficacyMetrics,
    pub toxicity_scores: ToxicityScores,
    pub adverse_events: AdverseEventRates,
}

// ==================== UPLOADS ====================

/// A user-selected file, read into memory before upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}
