//! Integration tests for the trials controller
//!
//! Drives the full mount -> fetch -> simulate flow against a scripted
//! collaborator and checks what the page would render.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use pollster::block_on;
use trials_core::render::{pagination_footer, trial_cards};
use trials_core::{
    AdverseEventRates, ApiResponse, EfficacyMetrics, Screen, SimulationMetrics, SimulationPanel,
    SimulationRequest, SimulationResult, ToxicityScores, TrialPage, TrialRecord, TrialsApi,
    TrialsController, TrialsView, UploadFile,
};

// =============================================================================
// Scripted collaborator
// =============================================================================

#[derive(Default)]
struct ScriptedApi {
    trial_responses: RefCell<VecDeque<ApiResponse<TrialPage>>>,
    simulation_responses: RefCell<VecDeque<ApiResponse<SimulationResult>>>,
    uploads: RefCell<Vec<Option<String>>>,
    simulation_requests: RefCell<Vec<SimulationRequest>>,
}

impl ScriptedApi {
    fn with_trials(self, response: ApiResponse<TrialPage>) -> Self {
        self.trial_responses.borrow_mut().push_back(response);
        self
    }

    fn with_simulation(self, response: ApiResponse<SimulationResult>) -> Self {
        self.simulation_responses.borrow_mut().push_back(response);
        self
    }
}

impl TrialsApi for ScriptedApi {
    async fn get_trial_data(&self, file: Option<UploadFile>) -> ApiResponse<TrialPage> {
        self.uploads.borrow_mut().push(file.map(|f| f.name));
        self.trial_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::err("no scripted trials response"))
    }

    async fn run_digital_twin_simulation(
        &self,
        request: SimulationRequest,
    ) -> ApiResponse<SimulationResult> {
        self.simulation_requests.borrow_mut().push(request);
        self.simulation_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::err("no scripted simulation response"))
    }
}

type Controller = TrialsController<ScriptedApi, Rc<RefCell<TrialsView>>>;

fn controller(api: ScriptedApi) -> Controller {
    TrialsController::new(api, Rc::new(RefCell::new(TrialsView::default())))
}

fn diabetes_trial() -> TrialRecord {
    TrialRecord {
        id: "NCT04000001".to_string(),
        phase: "II".to_string(),
        status: "Recruiting".to_string(),
        participants: 50,
        start_date: "2024-01-15".to_string(),
        completion_date: Some("2025-07-01".to_string()),
        conditions: vec!["diabetes".to_string()],
        interventions: vec!["Metformin XR".to_string()],
    }
}

fn demo_page(trials: Vec<TrialRecord>) -> TrialPage {
    TrialPage {
        total_trials: 12,
        page: 1,
        page_size: 5,
        trials,
    }
}

fn twin_result() -> SimulationResult {
    SimulationResult {
        population_size: 50,
        efficacy_metrics: EfficacyMetrics {
            response_rate: 0.573,
            survival_gain: 4.2,
        },
        toxicity_scores: ToxicityScores {
            mean: 0.1234,
            std: 0.0567,
        },
        adverse_events: AdverseEventRates {
            mild: 0.31,
            moderate: 0.12,
            severe: 0.035,
        },
    }
}

// =============================================================================
// Mount
// =============================================================================

#[test]
fn test_mount_simulates_first_trial() {
    let ctrl = controller(
        ScriptedApi::default()
            .with_trials(ApiResponse::ok(demo_page(vec![diabetes_trial()])))
            .with_simulation(ApiResponse::ok(twin_result())),
    );

    block_on(ctrl.load());

    let requests = ctrl.api().simulation_requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].molecule_parameters.id, "NCT04000001");
    assert_eq!(requests[0].molecule_parameters.phase, "II");
    assert_eq!(requests[0].target_population.size, 50);
    assert_eq!(requests[0].target_population.conditions, vec!["diabetes"]);
    assert_eq!(requests[0].simulation_config.duration_months, 12);
    assert!(requests[0].simulation_config.include_adverse_events);

    let view = ctrl.store().borrow();
    match view.screen() {
        Screen::Loaded {
            page,
            simulation: SimulationPanel::Result(result),
        } => {
            let cards = trial_cards(page);
            assert_eq!(cards[0].start_date, "1/15/2024");
            assert_eq!(cards[0].completion_date.as_deref(), Some("7/1/2025"));

            let (showing, page_of) = pagination_footer(page);
            assert_eq!(showing, "Showing 1 of 12 trials");
            assert_eq!(page_of, "Page 1 of 3");

            let metrics = SimulationMetrics::from_result(result);
            assert_eq!(metrics.response_rate, "57.3%");
            assert_eq!(metrics.toxicity_mean, "12.3%");
            assert_eq!(metrics.toxicity_std, "5.7%");
            assert_eq!(metrics.survival_gain, "4.2");
        }
        other => panic!("expected loaded page with result, got {:?}", other),
    }
}

#[test]
fn test_load_only_fetches_once() {
    let ctrl = controller(
        ScriptedApi::default()
            .with_trials(ApiResponse::ok(demo_page(vec![])))
            .with_trials(ApiResponse::ok(demo_page(vec![]))),
    );

    block_on(ctrl.load());
    block_on(ctrl.load());

    assert_eq!(ctrl.api().uploads.borrow().len(), 1);
}

#[test]
fn test_empty_page_issues_no_simulation() {
    let ctrl = controller(ScriptedApi::default().with_trials(ApiResponse::ok(demo_page(vec![]))));

    block_on(ctrl.load());

    assert!(ctrl.api().simulation_requests.borrow().is_empty());
    assert!(matches!(
        ctrl.store().borrow().screen(),
        Screen::Loaded { simulation: SimulationPanel::Empty, .. }
    ));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_fetch_error_shows_message_verbatim() {
    let ctrl = controller(ScriptedApi::default().with_trials(ApiResponse::err("network down")));

    block_on(ctrl.fetch_trials(None));

    let view = ctrl.store().borrow();
    assert_eq!(view.screen(), Screen::Error("network down"));
    assert!(view.trials().is_none());
    assert!(!view.is_loading());
    assert!(ctrl.api().simulation_requests.borrow().is_empty());
}

#[test]
fn test_blank_error_uses_fallback() {
    let ctrl = controller(ScriptedApi::default().with_trials(ApiResponse::err("")));

    block_on(ctrl.fetch_trials(None));

    assert_eq!(
        ctrl.store().borrow().error(),
        Some("Failed to fetch trial data")
    );
}

#[test]
fn test_failed_reload_clears_previous_trials() {
    let ctrl = controller(
        ScriptedApi::default()
            .with_trials(ApiResponse::ok(demo_page(vec![])))
            .with_trials(ApiResponse::err("upstream timeout")),
    );

    block_on(ctrl.fetch_trials(None));
    assert!(ctrl.store().borrow().trials().is_some());

    block_on(ctrl.fetch_trials(None));
    let view = ctrl.store().borrow();
    assert!(view.trials().is_none());
    assert_eq!(view.error(), Some("upstream timeout"));
}

#[test]
fn test_simulation_failure_keeps_trials_and_prior_result() {
    let ctrl = controller(
        ScriptedApi::default()
            .with_trials(ApiResponse::ok(demo_page(vec![diabetes_trial()])))
            .with_simulation(ApiResponse::ok(twin_result()))
            .with_trials(ApiResponse::ok(demo_page(vec![diabetes_trial()])))
            .with_simulation(ApiResponse::err("twin service unavailable")),
    );

    block_on(ctrl.fetch_trials(None));
    block_on(ctrl.fetch_trials(None));

    let view = ctrl.store().borrow();
    assert!(view.error().is_none());
    assert!(view.trials().is_some());
    assert!(!view.is_simulating());
    assert_eq!(view.simulation_result(), Some(&twin_result()));
}

// =============================================================================
// Uploads and manual simulation
// =============================================================================

#[test]
fn test_upload_is_forwarded_to_collaborator() {
    let ctrl = controller(ScriptedApi::default().with_trials(ApiResponse::ok(demo_page(vec![]))));

    let file = UploadFile::new("site-b.csv", b"id,phase\nT-9,III\n".to_vec());
    block_on(ctrl.fetch_trials(Some(file)));

    assert_eq!(
        *ctrl.api().uploads.borrow(),
        vec![Some("site-b.csv".to_string())]
    );
}

#[test]
fn test_manual_simulation_run() {
    let ctrl = controller(ScriptedApi::default().with_simulation(ApiResponse::ok(twin_result())));

    block_on(ctrl.run_simulation(trials_core::SimulationParams::from_trial(&diabetes_trial())));

    let view = ctrl.store().borrow();
    assert_eq!(view.simulation_result(), Some(&twin_result()));
    // No page yet, so nothing to draw the result in.
    assert_eq!(view.screen(), Screen::Idle);
}
