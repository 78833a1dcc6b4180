//! Drives a [`TrialsView`] against a [`TrialsApi`].
//!
//! The view lives behind a [`ViewStore`] so the same flow runs over a plain
//! `Rc<RefCell<_>>` in tests and over a reactive signal in the browser.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::api::TrialsApi;
use crate::model::{SimulationParams, UploadFile};
use crate::view::{PendingSimulation, TrialsView};

/// Shared, mutable home of a [`TrialsView`]
pub trait ViewStore {
    /// Run `f` against the view. `None` once the store has been disposed.
    fn with_view<R>(&self, f: impl FnOnce(&mut TrialsView) -> R) -> Option<R>;
}

impl ViewStore for Rc<RefCell<TrialsView>> {
    fn with_view<R>(&self, f: impl FnOnce(&mut TrialsView) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

pub struct TrialsController<A, S> {
    api: Rc<A>,
    store: S,
}

impl<A, S: Clone> Clone for TrialsController<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            store: self.store.clone(),
        }
    }
}

impl<A: TrialsApi, S: ViewStore> TrialsController<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api: Rc::new(api),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Mount entry point: fetches demo data the first time only
    pub async fn load(&self) {
        if self.store.with_view(TrialsView::mark_mounted) == Some(true) {
            self.fetch_trials(None).await;
        }
    }

    /// Fetch trials, then run the dependent simulation when the page has
    /// a first record
    pub async fn fetch_trials(&self, file: Option<UploadFile>) {
        let Some(ticket) = self.store.with_view(TrialsView::begin_fetch) else {
            return;
        };
        if let Some(file) = &file {
            debug!("Uploading trial data from {} ({} bytes)", file.name, file.bytes.len());
        }

        let outcome = self.api.get_trial_data(file).await.into_result();
        let pending = self
            .store
            .with_view(|view| view.complete_fetch(ticket, outcome))
            .flatten();

        if let Some(pending) = pending {
            self.simulate(pending).await;
        }
    }

    pub async fn run_simulation(&self, params: SimulationParams) {
        if let Some(pending) = self.store.with_view(|view| view.begin_simulation(params)) {
            self.simulate(pending).await;
        }
    }

    async fn simulate(&self, pending: PendingSimulation) {
        let PendingSimulation { ticket, request } = pending;
        let outcome = self.api.run_digital_twin_simulation(request).await.into_result();
        self.store
            .with_view(|view| view.complete_simulation(ticket, outcome));
    }
}
