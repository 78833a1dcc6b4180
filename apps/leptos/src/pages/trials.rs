//! Clinical Trials Monitor page
//!
//! The view lives in a signal; the controller mutates it from
//! `spawn_local` tasks and the page re-renders from [`TrialsView::screen`].

use leptos::prelude::*;
use leptos::task::spawn_local;
use trials_core::render::{
    pagination_footer, trial_cards, LOADING_CAPTION, SIMULATING_CAPTION,
};
use trials_core::{
    Screen, SimulationMetrics, SimulationPanel, TrialCard, TrialsController, TrialsView,
    UploadFile, ViewStore,
};
use web_sys::HtmlInputElement;

use crate::api::HttpTrialsApi;
use crate::config;
use crate::upload::read_first_file;

const UPLOAD_INPUT_ID: &str = "trial-data-upload";

/// Reactive [`ViewStore`]: every mutation notifies the page
#[derive(Clone, Copy)]
pub struct SignalStore(RwSignal<TrialsView>);

impl ViewStore for SignalStore {
    fn with_view<R>(&self, f: impl FnOnce(&mut TrialsView) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

type Controller = TrialsController<HttpTrialsApi, SignalStore>;

#[component]
pub fn TrialsPage() -> impl IntoView {
    let api_config = config::api_config();
    let state = RwSignal::new(TrialsView::new(api_config.simulation.clone()));
    let controller = StoredValue::new_local(Controller::new(
        HttpTrialsApi::new(api_config),
        SignalStore(state),
    ));

    let spawn_fetch = move |file: Option<UploadFile>| {
        let ctrl = controller.get_value();
        spawn_local(async move { ctrl.fetch_trials(file).await });
    };

    // Mount: demo data, once per view
    {
        let ctrl = controller.get_value();
        spawn_local(async move { ctrl.load().await });
    }

    let on_upload = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let ctrl = controller.get_value();
        spawn_local(async move {
            if let Some(file) = read_first_file(&input).await {
                ctrl.fetch_trials(Some(file)).await;
            }
        });
    };

    let loading = move || state.with(TrialsView::is_loading);

    move || {
        if loading() {
            return view! { <LoadingScreen /> }.into_any();
        }

        let body = state.with(|v| render_screen(v.screen()));
        view! {
            <div class="space-y-6">
                <div class="flex justify-between items-center">
                    <div>
                        <h1 class="text-4xl font-bold">"Clinical Trials Monitor"</h1>
                        <p class="text-lg text-muted-foreground mt-2">
                            "Monitor and analyze ongoing clinical trials."
                        </p>
                    </div>
                    <div class="flex items-center space-x-4">
                        <input
                            type="file"
                            accept=".csv"
                            class="hidden"
                            id=UPLOAD_INPUT_ID
                            on:change=on_upload
                        />
                        <label for=UPLOAD_INPUT_ID class="card cursor-pointer px-4 py-2 text-sm">
                            "Upload Trial Data"
                        </label>
                        <button
                            class="card px-4 py-2 text-sm"
                            disabled=loading
                            on:click=move |_| spawn_fetch(None)
                        >
                            {move || if loading() {
                                view! {
                                    <span class="flex items-center space-x-2">
                                        <span class="spinner spinner-sm"></span>
                                        <span>"Loading..."</span>
                                    </span>
                                }.into_any()
                            } else {
                                "Load Demo Data".into_any()
                            }}
                        </button>
                    </div>
                </div>
                {body}
            </div>
        }
        .into_any()
    }
}

fn render_screen(screen: Screen<'_>) -> AnyView {
    match screen {
        Screen::Idle | Screen::Loading => ().into_any(),
        Screen::Error(message) => {
            let message = message.to_string();
            view! {
                <div class="card border-destructive p-6">
                    <p class="text-center text-destructive">{message}</p>
                </div>
            }
            .into_any()
        }
        Screen::Loaded { page, simulation } => {
            let cards = trial_cards(page);
            let (showing, page_of) = pagination_footer(page);
            let panel = render_simulation(simulation);
            view! {
                <div class="grid-2">
                    <div class="space-y-4">
                        <h2 class="text-2xl font-semibold">"Clinical Trials"</h2>
                        <div class="grid gap-4">
                            {cards.into_iter().map(|card| view! { <TrialCardView card=card /> }).collect_view()}
                        </div>
                        <div class="flex justify-between items-center text-sm text-muted-foreground">
                            <span>{showing}</span>
                            <span>{page_of}</span>
                        </div>
                    </div>
                    <div class="space-y-4">
                        <h2 class="text-2xl font-semibold">"Digital Twin Simulation"</h2>
                        {panel}
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

fn render_simulation(panel: SimulationPanel<'_>) -> AnyView {
    match panel {
        SimulationPanel::Simulating => view! {
            <div class="card p-6">
                <div class="flex items-center justify-center space-x-4">
                    <div class="spinner"></div>
                    <p>{SIMULATING_CAPTION}</p>
                </div>
            </div>
        }
        .into_any(),
        SimulationPanel::Result(result) => {
            let metrics = SimulationMetrics::from_result(result);
            view! { <SimulationMetricsView metrics=metrics /> }.into_any()
        }
        SimulationPanel::Empty => ().into_any(),
    }
}

#[component]
fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="flex flex-col items-center space-y-4">
                <div class="spinner"></div>
                <p class="text-muted-foreground">{LOADING_CAPTION}</p>
            </div>
        </div>
    }
}

#[component]
fn TrialCardView(card: TrialCard) -> impl IntoView {
    let TrialCard {
        title,
        subtitle,
        participants_badge,
        start_date,
        completion_date,
        conditions,
        interventions,
    } = card;

    view! {
        <div class="card p-6">
            <div class="flex justify-between items-start mb-4">
                <div>
                    <h3 class="font-medium">{title}</h3>
                    <p class="text-sm text-muted-foreground">{subtitle}</p>
                </div>
                <span class="chip bg-secondary text-xs">{participants_badge}</span>
            </div>
            <div class="space-y-2">
                <div>
                    <span class="font-medium">"Start Date:"</span>
                    <span class="ml-2">{start_date}</span>
                    {completion_date.map(|date| view! {
                        <span class="mx-2">"\u{2022}"</span>
                        <span class="font-medium">"Completion:"</span>
                        <span class="ml-2">{date}</span>
                    })}
                </div>
                <div>
                    <span class="font-medium">"Conditions:"</span>
                    <div class="flex flex-wrap gap-2 mt-1">
                        {conditions.into_iter().map(|c| view! { <span class="chip bg-secondary">{c}</span> }).collect_view()}
                    </div>
                </div>
                <div>
                    <span class="font-medium">"Interventions:"</span>
                    <div class="flex flex-wrap gap-2 mt-1">
                        {interventions.into_iter().map(|i| view! { <span class="chip chip-primary">{i}</span> }).collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn SimulationMetricsView(metrics: SimulationMetrics) -> impl IntoView {
    view! {
        <div class="card p-6 space-y-4">
            <div>
                <h3 class="font-medium mb-2">"Population Metrics"</h3>
                <div class="grid grid-cols-2 gap-4">
                    <div>
                        <p class="text-sm text-muted-foreground">"Population Size"</p>
                        <p class="text-2xl font-semibold">{metrics.population_size}</p>
                    </div>
                    <div>
                        <p class="text-sm text-muted-foreground">"Response Rate"</p>
                        <p class="text-2xl font-semibold">{metrics.response_rate}</p>
                    </div>
                </div>
            </div>
            <div>
                <h3 class="font-medium mb-2">"Survival Gain"</h3>
                <p class="text-2xl font-semibold">{metrics.survival_gain}</p>
            </div>
            <MetricRows
                heading="Toxicity Profile"
                rows=vec![
                    ("Mean Score", metrics.toxicity_mean),
                    ("Standard Deviation", metrics.toxicity_std),
                ]
            />
            <MetricRows
                heading="Adverse Events"
                rows=vec![
                    ("Mild", metrics.adverse_mild),
                    ("Moderate", metrics.adverse_moderate),
                    ("Severe", metrics.adverse_severe),
                ]
            />
        </div>
    }
}

#[component]
fn MetricRows(heading: &'static str, rows: Vec<(&'static str, String)>) -> impl IntoView {
    view! {
        <div>
            <h3 class="font-medium mb-2">{heading}</h3>
            <div class="space-y-2">
                {rows.into_iter().map(|(label, value)| view! {
                    <div class="flex justify-between items-center">
                        <span class="text-sm">{label}</span>
                        <span class="font-medium">{value}</span>
                    </div>
                }).collect_view()}
            </div>
        </div>
    }
}
