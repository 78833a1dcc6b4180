//! Trials View State Machine
//!
//! `Idle -> Loading -> {Error | Loaded}`, with `Loaded` nesting the
//! simulation sub-machine `SimIdle -> Simulating -> SimDone`.
//!
//! Every fetch and every simulation is issued a [`Ticket`]. Only the most
//! recent ticket per target may complete; older completions are dropped, so
//! overlapping requests resolve last-request-wins whatever order they
//! finish in.

use log::{debug, error, warn};

use crate::api::ApiError;
use crate::model::{
    SimulationConfig, SimulationParams, SimulationRequest, SimulationResult, TrialPage,
};

/// Request id handed out by [`TrialsView`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A simulation the view has entered `Simulating` for and that the caller
/// must now send
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSimulation {
    pub ticket: Ticket,
    pub request: SimulationRequest,
}

#[derive(Clone, Debug, PartialEq)]
enum FetchPhase {
    Idle,
    /// Page shown before this fetch, restored if the response is empty
    Loading { previous: Option<TrialPage> },
    Failed(String),
    Loaded(TrialPage),
}

/// What the page should draw, one arm per visual state
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Loaded {
        page: &'a TrialPage,
        simulation: SimulationPanel<'a>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimulationPanel<'a> {
    Simulating,
    Result(&'a SimulationResult),
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrialsView {
    phase: FetchPhase,
    simulating: bool,
    simulation: Option<SimulationResult>,
    simulation_config: SimulationConfig,
    next_ticket: u64,
    latest_fetch: Option<Ticket>,
    latest_simulation: Option<Ticket>,
    mounted: bool,
}

impl Default for TrialsView {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl TrialsView {
    pub fn new(simulation_config: SimulationConfig) -> Self {
        Self {
            phase: FetchPhase::Idle,
            simulating: false,
            simulation: None,
            simulation_config,
            next_ticket: 0,
            latest_fetch: None,
            latest_simulation: None,
            mounted: false,
        }
    }

    fn issue(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    /// Returns true exactly once, on the first call
    pub fn mark_mounted(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    // ==================== TRIALS FETCH ====================

    /// Enter `Loading` and clear any error
    pub fn begin_fetch(&mut self) -> Ticket {
        let previous = match std::mem::replace(&mut self.phase, FetchPhase::Idle) {
            FetchPhase::Loaded(page) => Some(page),
            FetchPhase::Loading { previous } => previous,
            FetchPhase::Idle | FetchPhase::Failed(_) => None,
        };
        self.phase = FetchPhase::Loading { previous };

        let ticket = self.issue();
        self.latest_fetch = Some(ticket);
        debug!("Fetching trials data (request {})", ticket.id());
        ticket
    }

    /// Apply a fetch outcome.
    ///
    /// A page with at least one record immediately enters `Simulating` for
    /// that first record; the returned request must be sent by the caller.
    pub fn complete_fetch(
        &mut self,
        ticket: Ticket,
        outcome: Result<Option<TrialPage>, ApiError>,
    ) -> Option<PendingSimulation> {
        if self.latest_fetch != Some(ticket) {
            warn!("Discarding stale trials response (request {})", ticket.id());
            return None;
        }
        self.latest_fetch = None;

        let previous = match std::mem::replace(&mut self.phase, FetchPhase::Idle) {
            FetchPhase::Loading { previous } => previous,
            _ => None,
        };

        match outcome {
            Ok(Some(page)) => {
                debug!(
                    "Loaded {} of {} trials (request {})",
                    page.trials.len(),
                    page.total_trials,
                    ticket.id()
                );
                let params = page.first().map(SimulationParams::from_trial);
                self.phase = FetchPhase::Loaded(page);
                params.map(|p| self.begin_simulation(p))
            }
            Ok(None) => {
                self.phase = previous.map_or(FetchPhase::Idle, FetchPhase::Loaded);
                None
            }
            Err(e) => {
                let message = e.user_message();
                debug!("Trials fetch failed (request {}): {}", ticket.id(), message);
                self.phase = FetchPhase::Failed(message);
                None
            }
        }
    }

    // ==================== SIMULATION ====================

    /// Enter `Simulating`, merging `params` with the fixed run config
    pub fn begin_simulation(&mut self, params: SimulationParams) -> PendingSimulation {
        let ticket = self.issue();
        self.simulating = true;
        self.latest_simulation = Some(ticket);
        debug!(
            "Running digital twin simulation for {} (request {})",
            params.molecule_parameters.id,
            ticket.id()
        );
        PendingSimulation {
            ticket,
            request: params.with_config(self.simulation_config.clone()),
        }
    }

    /// Apply a simulation outcome. Failures are logged and otherwise leave
    /// the view untouched.
    pub fn complete_simulation(
        &mut self,
        ticket: Ticket,
        outcome: Result<Option<SimulationResult>, ApiError>,
    ) {
        if self.latest_simulation != Some(ticket) {
            warn!("Discarding stale simulation response (request {})", ticket.id());
            return;
        }
        self.latest_simulation = None;
        self.simulating = false;

        match outcome {
            Ok(Some(result)) => self.simulation = Some(result),
            Ok(None) => {}
            Err(e) => error!("Simulation error: {}", e),
        }
    }

    // ==================== ACCESSORS ====================

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading { .. })
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            FetchPhase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn trials(&self) -> Option<&TrialPage> {
        match &self.phase {
            FetchPhase::Loaded(page) => Some(page),
            _ => None,
        }
    }

    /// Last successful simulation, kept across failed runs
    pub fn simulation_result(&self) -> Option<&SimulationResult> {
        self.simulation.as_ref()
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.phase {
            FetchPhase::Idle => Screen::Idle,
            FetchPhase::Loading { .. } => Screen::Loading,
            FetchPhase::Failed(message) => Screen::Error(message.as_str()),
            FetchPhase::Loaded(page) => Screen::Loaded {
                page,
                simulation: if self.simulating {
                    SimulationPanel::Simulating
                } else {
                    match &self.simulation {
                        Some(result) => SimulationPanel::Result(result),
                        None => SimulationPanel::Empty,
                    }
                },
            },
        }
    }
}
