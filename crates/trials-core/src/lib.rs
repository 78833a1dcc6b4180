//! Clinical Trials Monitor Core
//!
//! Target-independent half of the trials monitor: everything except the
//! DOM and the HTTP transport.
//!
//! # Modules
//!
//! - [`model`]: trial pages, simulation requests and results
//! - [`api`]: the `{ data, error }` collaborator boundary and endpoints
//! - [`view`]: the trials view state machine with request-id guarding
//! - [`controller`]: async fetch -> simulate flow over any [`ViewStore`]
//! - [`render`]: card and metric formatting
//! - [`shell`]: document skeleton and theme
//!
//! # Example
//!
//! ```rust
//! use trials_core::{Screen, TrialsView};
//!
//! let mut view = TrialsView::default();
//! let ticket = view.begin_fetch();
//! assert_eq!(view.screen(), Screen::Loading);
//!
//! view.complete_fetch(ticket, Err(trials_core::ApiError::Remote("network down".into())));
//! assert_eq!(view.screen(), Screen::Error("network down"));
//! ```

pub mod api;
pub mod controller;
pub mod model;
pub mod render;
pub mod shell;
pub mod view;

pub use api::{ApiConfig, ApiError, ApiResponse, TrialsApi, FETCH_FALLBACK_MESSAGE};
pub use controller::{TrialsController, ViewStore};
pub use model::{
    AdverseEventRates, EfficacyMetrics, MoleculeParameters, SimulationConfig, SimulationParams,
    SimulationRequest, SimulationResult, TargetPopulation, ToxicityScores, TrialPage, TrialRecord,
    UploadFile,
};
pub use render::{percent, SimulationMetrics, TrialCard};
pub use shell::{ShellConfig, Theme};
pub use view::{PendingSimulation, Screen, SimulationPanel, Ticket, TrialsView};
